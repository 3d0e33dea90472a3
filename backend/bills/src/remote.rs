//! # Oireachtas API
//!
//! Upstream legislation source. Listing and single lookups both hit
//! `/legislation`; the response is `{ "head": { "counts": { "billCount": n } }, "results": [...] }`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::SourceError,
    models::{BillKey, BillRecord},
    source::{BillSource, ListQuery, Listing},
};

pub const OIREACHTAS_API: &str = "https://api.oireachtas.ie/v1";
const LEGISLATION: &str = "legislation";

#[derive(Deserialize)]
struct LegislationResponse {
    #[serde(default)]
    head: Value,
    #[serde(default)]
    results: Vec<BillRecord>,
}

impl LegislationResponse {
    fn bill_count(&self) -> Option<usize> {
        self.head
            .pointer("/counts/billCount")
            .and_then(Value::as_u64)
            .map(|count| count as usize)
    }
}

pub struct OireachtasSource {
    client: Client,
    base_url: String,
}

impl OireachtasSource {
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `<base>/<path>?<query>` and hand back whatever JSON the upstream sent.
    pub async fn fetch_raw(&self, path: &str, query: Option<&str>) -> Result<Value, SourceError> {
        let url = match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/{}?{}", self.base_url, path.trim_start_matches('/'), query),
            None => format!("{}/{}", self.base_url, path.trim_start_matches('/')),
        };

        self.get_json(&url, &[]).await
    }

    async fn legislation(&self, params: &[(&str, String)]) -> Result<LegislationResponse, SourceError> {
        let url = format!("{}/{LEGISLATION}", self.base_url);
        let value = self.get_json(&url, params).await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, SourceError> {
        debug!("GET {url} {params:?}");

        let transport = |source| SourceError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).query(params).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BillSource for OireachtasSource {
    async fn list(&self, query: &ListQuery) -> Result<Listing, SourceError> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("skip", query.skip.to_string()),
        ];

        if let Some(bill_type) = &query.bill_type {
            params.push(("bill_type", bill_type.clone()));
        }

        let response = self.legislation(&params).await?;
        let total_count = response.bill_count();

        Ok(Listing {
            records: response.results,
            total_count,
            head: response.head,
        })
    }

    async fn lookup(&self, key: &BillKey) -> Result<Option<BillRecord>, SourceError> {
        let params = [
            ("bill_no", key.bill_no().to_string()),
            ("bill_year", key.bill_year().to_string()),
        ];

        let response = self.legislation(&params).await?;

        Ok(response.results.into_iter().next())
    }
}
