use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{
    error::SourceError,
    models::{BillRecord, BillTypeFilter},
    pagination::{Page, PageDescriptor, PageRequest},
    source::{BillSource, ListQuery},
};

/// Response body of the bills listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedBills {
    pub data: Vec<BillRecord>,
    pub pagination: PageDescriptor,
    #[serde(default)]
    pub meta: Value,
}

/// Response body of the batch lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualBills {
    pub results: Vec<BillRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageDescriptor>,
}

impl From<Page<BillRecord>> for IndividualBills {
    fn from(page: Page<BillRecord>) -> Self {
        Self {
            results: page.records,
            pagination: Some(page.descriptor),
        }
    }
}

pub async fn list_bills(
    source: &dyn BillSource,
    request: PageRequest,
    filter: &BillTypeFilter,
) -> Result<PaginatedBills, SourceError> {
    let query = ListQuery {
        skip: request.skip(),
        limit: request.page_size(),
        bill_type: filter.as_option().map(str::to_string),
    };

    let listing = source.list(&query).await?;
    let pagination = PageDescriptor::from_remote(request, listing.total_count, listing.records.len());

    info!(
        "Returning {} bills (page {}/{})",
        listing.records.len(),
        request.page().saturating_add(1),
        pagination.total_pages()
    );

    let meta = match listing.head {
        Value::Null => Value::Object(Default::default()),
        head => head,
    };

    Ok(PaginatedBills {
        data: listing.records,
        pagination,
        meta,
    })
}
