use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::SourceError,
    models::{BillKey, BillRecord},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: usize,
    pub limit: usize,
    pub bill_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub records: Vec<BillRecord>,
    pub total_count: Option<usize>,
    /// Upstream metadata, relayed untouched.
    pub head: Value,
}

/// Anything that can list bills page by page and look one up by key.
#[async_trait]
pub trait BillSource: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Listing, SourceError>;

    /// `Ok(None)` is a soft miss: the source answered but has no such bill.
    async fn lookup(&self, key: &BillKey) -> Result<Option<BillRecord>, SourceError>;
}
