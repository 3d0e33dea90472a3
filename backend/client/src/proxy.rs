//! # Proxy Client
//!
//! [`BillSource`] over the proxy relay rather than the upstream API. The relay
//! pages by `page`/`pageSize`, so a listing query is translated back from
//! `skip`/`limit`; single lookups go through the batch endpoint with one key.
use std::time::Duration;

use async_trait::async_trait;
use bills::{
    BillKey, BillRecord, BillSource, ListQuery, Listing, SourceError,
    listing::{IndividualBills, PaginatedBills},
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct ProxySource {
    client: Client,
    base_url: String,
}

impl ProxySource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, SourceError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url} {params:?}");

        let transport = |source| SourceError::Transport {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).query(params).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// `skip` is always a multiple of `limit` when it comes from a page request.
fn page_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let limit = query.limit.max(1);

    vec![
        ("page", (query.skip / limit).to_string()),
        ("pageSize", limit.to_string()),
        (
            "billType",
            query.bill_type.clone().unwrap_or_else(|| bills::models::ALL_BILL_TYPES.to_string()),
        ),
    ]
}

#[async_trait]
impl BillSource for ProxySource {
    async fn list(&self, query: &ListQuery) -> Result<Listing, SourceError> {
        let body: PaginatedBills = self.get("bills", &page_params(query)).await?;

        Ok(Listing {
            records: body.data,
            total_count: Some(body.pagination.total_count()),
            head: body.meta,
        })
    }

    async fn lookup(&self, key: &BillKey) -> Result<Option<BillRecord>, SourceError> {
        let body: IndividualBills = self
            .get("bills/individual", &[("billIds", key.to_string())])
            .await?;

        Ok(body.results.into_iter().next())
    }
}
