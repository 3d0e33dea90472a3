//! # Bills Client
//!
//! Terminal client for the bills proxy. Owns the favourites store: favourite
//! keys live on this machine only and are resolved into full bills on demand.
//!
//! ```sh
//! bills-cli list --page 0 --page-size 10 --bill-type Public
//! bills-cli toggle 45/2021
//! bills-cli favourites
//! bills-cli show 45/2021
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use bills::{
    BillKey, BillSource, BillTypeFilter, PageRequest,
    favourites::{FavouriteStore, Storage, Toggle},
    listing::list_bills,
    resolver::FavouritesResolver,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

pub mod models;
pub mod proxy;
pub mod render;
pub mod utils;

use models::BillView;
use utils::unique_bill_types;

pub async fn list<S: Storage>(
    source: &dyn BillSource,
    store: &FavouriteStore<S>,
    request: PageRequest,
    filter: &BillTypeFilter,
) -> Result<String> {
    let bills = list_bills(source, request, filter)
        .await
        .context("Failed to fetch bills")?;

    let views: Vec<BillView> = bills.data.iter().map(BillView::from_record).collect();
    let types = unique_bill_types(&views);

    let mut out = render::bills_table(&bills.data, store.set());
    out.push_str(&render::pagination(&bills.pagination));

    if !types.is_empty() {
        out.push_str(&format!("\nBill types on this page: {}", types.join(", ")));
    }

    Ok(out)
}

pub async fn favourites<S: Storage>(
    source: Arc<dyn BillSource>,
    store: &FavouriteStore<S>,
    request: PageRequest,
    max_in_flight: usize,
) -> String {
    if store.set().is_empty() {
        return "No favourited bills yet".to_string();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Resolving {} favourite bills", store.set().len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let resolver = FavouritesResolver::new(source).with_max_in_flight(max_in_flight);
    let page = resolver.resolve(store.set().iter(), request).await;

    spinner.finish_and_clear();

    let mut out = render::bills_table(&page.records, store.set());
    out.push_str(&render::pagination(&page.descriptor));
    out
}

pub fn toggle<S: Storage>(store: &mut FavouriteStore<S>, raw_key: &str) -> Result<String> {
    let key: BillKey = raw_key
        .trim()
        .parse()
        .with_context(|| format!("Invalid bill key {raw_key:?}, expected <billNo>/<billYear>"))?;

    let message = match store.toggle(&key.to_string())? {
        Toggle::Added => format!("Bill {key} added to favourites"),
        Toggle::Removed => format!("Bill {key} removed from favourites"),
    };

    info!("{message}");

    Ok(message)
}

pub async fn show(source: &dyn BillSource, raw_key: &str) -> Result<String> {
    let key: BillKey = raw_key
        .trim()
        .parse()
        .with_context(|| format!("Invalid bill key {raw_key:?}, expected <billNo>/<billYear>"))?;

    let record = source
        .lookup(&key)
        .await
        .with_context(|| format!("Failed to fetch bill {key}"))?;

    Ok(match record {
        Some(record) => render::bill_detail(&record),
        None => format!("No bill found for {key}"),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bills::{
        BillRecord, ListQuery, Listing, SourceError,
        favourites::{FAVOURITES_KEY, FileStorage, MemoryStorage},
    };
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        lookups: AtomicUsize,
    }

    fn record(no: &str, year: &str, bill_type: &str) -> BillRecord {
        BillRecord::new(json!({ "bill": {
            "billNo": no,
            "billYear": year,
            "billType": bill_type,
            "status": "Current",
            "shortTitleEn": format!("Bill {no} of {year}"),
        }}))
    }

    #[async_trait]
    impl BillSource for FakeSource {
        async fn list(&self, query: &ListQuery) -> Result<Listing, SourceError> {
            let records = vec![record("1", "2022", "Public"), record("2", "2022", "Private")];

            Ok(Listing {
                records,
                total_count: Some(query.skip + 12),
                head: json!({}),
            })
        }

        async fn lookup(&self, key: &BillKey) -> Result<Option<BillRecord>, SourceError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);

            match key.bill_year() {
                "2023" => Err(SourceError::Status {
                    url: "fake://bills/individual".into(),
                    status: 502,
                }),
                year => Ok(Some(record(key.bill_no(), year, "Public"))),
            }
        }
    }

    #[tokio::test]
    async fn test_list_marks_favourites_and_types() {
        let storage = MemoryStorage::with_entry(FAVOURITES_KEY, r#"["2/2022"]"#);
        let store = FavouriteStore::load(storage);

        let out = list(&FakeSource::default(), &store, PageRequest::new(0, 2).unwrap(), &BillTypeFilter::All)
            .await
            .unwrap();

        assert!(out.contains("* 2/2022"));
        assert!(out.contains("Page 1 of 6 (12 bills, 2 per page)"));
        assert!(out.ends_with("Bill types on this page: Private, Public"));
    }

    #[tokio::test]
    async fn test_favourites_skips_failures() {
        let storage = MemoryStorage::with_entry(FAVOURITES_KEY, r#"["1/2022","2/2023","bad-key"]"#);
        let store = FavouriteStore::load(storage);
        let source = Arc::new(FakeSource::default());

        let out = favourites(source.clone(), &store, PageRequest::default(), 4).await;

        assert!(out.contains("* 1/2022"));
        assert!(!out.contains("2/2023"));
        assert!(out.contains("Page 1 of 1 (1 bills, 10 per page)"));
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_favourites_empty() {
        let store = FavouriteStore::load(MemoryStorage::new());
        let source = Arc::new(FakeSource::default());

        let out = favourites(source.clone(), &store, PageRequest::default(), 4).await;

        assert_eq!(out, "No favourited bills yet");
        assert_eq!(source.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_toggle() {
        let mut store = FavouriteStore::load(MemoryStorage::new());

        assert_eq!(toggle(&mut store, " 45/2021 ").unwrap(), "Bill 45/2021 added to favourites");
        assert!(store.contains("45/2021"));
        assert_eq!(toggle(&mut store, "45/2021").unwrap(), "Bill 45/2021 removed from favourites");
        assert!(store.set().is_empty());

        assert!(toggle(&mut store, "45/undefined").is_err());
        assert!(store.set().is_empty());
    }

    #[test]
    fn test_toggle_survives_restart() {
        let temp = TempDir::new().expect("tempdir");

        let mut store = FavouriteStore::load(FileStorage::new(temp.path()));
        toggle(&mut store, "1/2022").unwrap();
        toggle(&mut store, "2/2023").unwrap();

        let reloaded = FavouriteStore::load(FileStorage::new(temp.path()));
        assert_eq!(reloaded.set().iter().collect::<Vec<_>>(), vec!["1/2022", "2/2023"]);
    }

    #[tokio::test]
    async fn test_show() {
        let out = show(&FakeSource::default(), "7/2020").await.unwrap();
        assert!(out.starts_with("Bill 7/2020 (Public, Current)"));

        assert!(show(&FakeSource::default(), "7/2023").await.is_err());
        assert!(show(&FakeSource::default(), "nope").await.is_err());
    }
}
