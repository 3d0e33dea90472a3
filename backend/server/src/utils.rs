use bills::{BillTypeFilter, PageRequest, pagination::DEFAULT_PAGE_SIZE};
use serde::Deserialize;

use crate::error::AppError;

/// Raw paging params; kept as strings so a bad value is a 400 with our own message.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillsParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub bill_type: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndividualParams {
    pub bill_ids: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl BillsParams {
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        page_request(self.page.as_deref(), self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }

    pub fn filter(&self) -> BillTypeFilter {
        BillTypeFilter::from_param(self.bill_type.as_deref())
    }
}

impl IndividualParams {
    pub fn bill_ids(&self) -> Result<Vec<&str>, AppError> {
        let ids = split_bill_ids(self.bill_ids.as_deref().unwrap_or_default());

        if ids.is_empty() {
            return Err(AppError::MissingBillIds);
        }

        Ok(ids)
    }

    /// Without a page size the whole batch comes back as a single page.
    pub fn page_request(&self, batch_len: usize) -> Result<PageRequest, AppError> {
        page_request(self.page.as_deref(), self.page_size.as_deref(), batch_len.max(1))
    }
}

pub fn split_bill_ids(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|id| !id.is_empty()).collect()
}

fn page_request(page: Option<&str>, page_size: Option<&str>, default_size: usize) -> Result<PageRequest, AppError> {
    let page = parse_number("page", page, 0)?;
    let page_size = parse_number("pageSize", page_size, default_size)?;

    PageRequest::new(page, page_size).map_err(|e| AppError::MalformedRequest(e.to_string()))
}

fn parse_number(name: &str, raw: Option<&str>, default: usize) -> Result<usize, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|e| AppError::MalformedRequest(format!("{name}={value}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bill_ids() {
        assert_eq!(split_bill_ids("123/2022,456/2023"), vec!["123/2022", "456/2023"]);
        assert_eq!(split_bill_ids(" 1/2020 ,, ,2/2021,"), vec!["1/2020", "2/2021"]);
        assert!(split_bill_ids("").is_empty());
    }

    #[test]
    fn test_bills_params_defaults() {
        let params = BillsParams::default();
        let request = params.page_request().unwrap();

        assert_eq!(request.page(), 0);
        assert_eq!(request.page_size(), 10);
        assert_eq!(params.filter(), BillTypeFilter::All);
    }

    #[test]
    fn test_bills_params_invalid() {
        let zero = BillsParams {
            page_size: Some("0".into()),
            ..Default::default()
        };
        assert!(matches!(zero.page_request(), Err(AppError::MalformedRequest(_))));

        let negative = BillsParams {
            page: Some("-1".into()),
            ..Default::default()
        };
        assert!(matches!(negative.page_request(), Err(AppError::MalformedRequest(_))));
    }

    #[test]
    fn test_individual_params() {
        let missing = IndividualParams::default();
        assert!(matches!(missing.bill_ids(), Err(AppError::MissingBillIds)));

        let params = IndividualParams {
            bill_ids: Some("1/2022,2/2023,3/2024".into()),
            ..Default::default()
        };
        let ids = params.bill_ids().unwrap();
        let request = params.page_request(ids.len()).unwrap();

        assert_eq!(request.page_size(), 3);
        assert_eq!(request.page(), 0);
    }
}
