use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, RawQuery, State as AxumState},
};
use bills::listing::{IndividualBills, PaginatedBills, list_bills};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    error::AppError,
    state::State,
    utils::{BillsParams, IndividualParams},
};

pub async fn bills_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<BillsParams>,
) -> Result<Json<PaginatedBills>, AppError> {
    let request = params.page_request()?;
    let filter = params.filter();

    let bills = list_bills(state.source.as_ref(), request, &filter)
        .await
        .map_err(|e| {
            error!("Bills proxy error: {e}");
            AppError::upstream("Failed to fetch bills")(e)
        })?;

    Ok(Json(bills))
}

pub async fn individual_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<IndividualParams>,
) -> Result<Json<IndividualBills>, AppError> {
    let ids = params.bill_ids()?;
    let request = params.page_request(ids.len())?;

    let page = state.resolver.resolve(ids, request).await;
    info!("Returning {} individual bills", page.records.len());

    Ok(Json(page.into()))
}

pub async fn relay_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, AppError> {
    info!("Relaying {path} to {}", state.relay.base_url());

    let data = state
        .relay
        .fetch_raw(&path, query.as_deref())
        .await
        .map_err(|e| {
            error!("Relay error: {e}");
            AppError::upstream("Failed to fetch data")(e)
        })?;

    #[cfg(feature = "verbose")]
    tracing::debug!("Upstream response: {data:#}");

    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use bills::{
        BillKey, BillRecord, ListQuery, Listing, SourceError, remote::OireachtasSource,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::Config;

    struct StubSource;

    fn record(no: &str, year: &str) -> BillRecord {
        BillRecord::new(json!({ "bill": { "billNo": no, "billYear": year, "billType": "Public" } }))
    }

    #[async_trait]
    impl bills::BillSource for StubSource {
        async fn list(&self, query: &ListQuery) -> Result<Listing, SourceError> {
            if query.bill_type.as_deref() == Some("Broken") {
                return Err(SourceError::Status {
                    url: "stub://legislation".into(),
                    status: 500,
                });
            }

            let records = (query.skip..query.skip + query.limit)
                .map(|n| record(&n.to_string(), "2024"))
                .collect();

            Ok(Listing {
                records,
                total_count: Some(42),
                head: json!({ "counts": { "billCount": 42 } }),
            })
        }

        async fn lookup(&self, key: &BillKey) -> Result<Option<BillRecord>, SourceError> {
            match key.bill_year() {
                "2023" => Err(SourceError::Status {
                    url: "stub://legislation".into(),
                    status: 503,
                }),
                "1900" => Ok(None),
                year => Ok(Some(record(key.bill_no(), year))),
            }
        }
    }

    fn state() -> Arc<State> {
        let relay = OireachtasSource::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        State::from_parts(Config::default(), Arc::new(StubSource), relay)
    }

    #[tokio::test]
    async fn test_bills_handler() {
        let params = BillsParams {
            page: Some("1".into()),
            page_size: Some("10".into()),
            bill_type: None,
        };

        let Json(bills) = bills_handler(AxumState(state()), Query(params)).await.unwrap();

        assert_eq!(bills.data.len(), 10);
        assert_eq!(bills.data[0].key().unwrap().to_string(), "10/2024");
        assert_eq!(bills.pagination.total_count(), 42);
        assert_eq!(bills.pagination.total_pages(), 5);
        assert!(bills.pagination.has_next_page());
        assert!(bills.pagination.has_prev_page());
    }

    #[tokio::test]
    async fn test_bills_handler_upstream_failure() {
        let params = BillsParams {
            bill_type: Some("Broken".into()),
            ..Default::default()
        };

        let result = bills_handler(AxumState(state()), Query(params)).await;

        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_individual_handler_absorbs_misses() {
        let params = IndividualParams {
            bill_ids: Some("1/2022,2/2023,bad-key,4/1900,5/2024".into()),
            ..Default::default()
        };

        let Json(body) = individual_handler(AxumState(state()), Query(params)).await.unwrap();
        let keys: Vec<String> = body
            .results
            .iter()
            .map(|r| r.key().unwrap().to_string())
            .collect();

        assert_eq!(keys, vec!["1/2022", "5/2024"]);
        assert_eq!(body.pagination.unwrap().total_count(), 2);
    }

    #[tokio::test]
    async fn test_individual_handler_requires_ids() {
        let result = individual_handler(AxumState(state()), Query(IndividualParams::default())).await;

        assert!(matches!(result, Err(AppError::MissingBillIds)));
    }
}
