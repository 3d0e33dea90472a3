//! # Pagination
//!
//! Page descriptors are always derived from a request and a total count, never
//! assembled by hand.
//!
//! - Remote-count mode: the upstream pages natively, we forward `skip = page * page_size`
//!   and derive the descriptor from the count it reports.
//! - Local-slice mode: a collection assembled in memory (favourites) is sliced here,
//!   and the total is the length of the whole collection.
//!
//! Out-of-range pages are not clamped. They produce an empty slice and a
//! descriptor computed by the same formulas.
use serde::{Deserialize, Serialize};

use crate::error::PaginationError;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn skip(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    page: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
    has_next_page: bool,
    has_prev_page: bool,
}

impl PageDescriptor {
    pub fn derive(request: PageRequest, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(request.page_size);

        Self {
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages,
            has_next_page: request.page.saturating_add(1) < total_pages,
            has_prev_page: request.page > 0,
        }
    }

    /// Remote-count mode. An unreported (or zero) upstream total falls back to the
    /// number of records in the current response, which under-counts pages when
    /// the upstream omits its metadata.
    pub fn from_remote(request: PageRequest, reported_total: Option<usize>, returned: usize) -> Self {
        let total_count = reported_total.filter(|&total| total > 0).unwrap_or(returned);

        Self::derive(request, total_count)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_prev_page(&self) -> bool {
        self.has_prev_page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub descriptor: PageDescriptor,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            records: Vec::new(),
            descriptor: PageDescriptor::derive(request, 0),
        }
    }
}

/// Local-slice mode: `[page * page_size, page * page_size + page_size)` of `items`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let descriptor = PageDescriptor::derive(request, items.len());
    let records = items
        .into_iter()
        .skip(request.skip())
        .take(request.page_size)
        .collect();

    Page { records, descriptor }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(page: usize, page_size: usize) -> PageRequest {
        PageRequest::new(page, page_size).unwrap()
    }

    #[test]
    fn test_zero_page_size() {
        assert_eq!(PageRequest::new(0, 0), Err(PaginationError::ZeroPageSize));
    }

    #[test]
    fn test_descriptor_formulas() {
        for total_count in 0usize..=40 {
            for page_size in 1..=12 {
                let total_pages = total_count.div_ceil(page_size);

                for page in 0..total_pages {
                    let descriptor = PageDescriptor::derive(request(page, page_size), total_count);

                    assert_eq!(descriptor.total_pages, total_pages);
                    assert_ne!(descriptor.has_next_page, page == total_pages - 1);
                    assert_eq!(descriptor.has_prev_page, page > 0);
                }
            }
        }
    }

    #[test]
    fn test_empty_total() {
        let descriptor = PageDescriptor::derive(request(0, 10), 0);

        assert_eq!(
            descriptor,
            PageDescriptor {
                page: 0,
                page_size: 10,
                total_count: 0,
                total_pages: 0,
                has_next_page: false,
                has_prev_page: false,
            }
        );
    }

    #[test]
    fn test_local_slice() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(items, request(1, 10));

        assert_eq!(page.records, (10..20).collect::<Vec<_>>());
        assert_eq!(
            page.descriptor,
            PageDescriptor {
                page: 1,
                page_size: 10,
                total_count: 25,
                total_pages: 3,
                has_next_page: true,
                has_prev_page: true,
            }
        );
    }

    #[test]
    fn test_local_slice_last_and_out_of_range() {
        let last = paginate((0..25).collect::<Vec<usize>>(), request(2, 10));
        assert_eq!(last.records, (20..25).collect::<Vec<_>>());
        assert!(!last.descriptor.has_next_page);

        let beyond = paginate((0..25).collect::<Vec<usize>>(), request(7, 10));
        assert!(beyond.records.is_empty());
        assert_eq!(beyond.descriptor.total_count, 25);
        assert!(!beyond.descriptor.has_next_page);
        assert!(beyond.descriptor.has_prev_page);
    }

    #[test]
    fn test_remote_count() {
        let req = request(3, 20);
        assert_eq!(req.skip(), 60);

        let reported = PageDescriptor::from_remote(req, Some(95), 20);
        assert_eq!(reported.total_count, 95);
        assert_eq!(reported.total_pages, 5);
        assert!(reported.has_next_page);
    }

    #[test]
    fn test_remote_count_unreported() {
        let req = request(0, 10);

        let missing = PageDescriptor::from_remote(req, None, 7);
        assert_eq!(missing.total_count, 7);
        assert_eq!(missing.total_pages, 1);
        assert!(!missing.has_next_page);

        let zero = PageDescriptor::from_remote(req, Some(0), 4);
        assert_eq!(zero.total_count, 4);
    }

    #[test]
    fn test_descriptor_wire_names() {
        let value = serde_json::to_value(PageDescriptor::derive(request(0, 10), 11)).unwrap();

        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["totalCount"], 11);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["hasNextPage"], true);
        assert_eq!(value["hasPrevPage"], false);
    }

    #[test]
    fn test_descriptor_read_back() {
        let derived = PageDescriptor::derive(request(2, 5), 11);
        let decoded: PageDescriptor = serde_json::from_value(serde_json::to_value(derived).unwrap()).unwrap();

        assert_eq!(decoded, derived);
        assert_eq!(decoded.page(), 2);
        assert_eq!(decoded.page_size(), 5);
        assert_eq!(decoded.total_count(), 11);
        assert_eq!(decoded.total_pages(), 3);
        assert!(!decoded.has_next_page());
        assert!(decoded.has_prev_page());
    }
}
