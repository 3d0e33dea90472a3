//! Irish legislation bills: keys, pagination, favourites, and the remote source.
//!
//! Shared by the proxy relay and the client runtime.
//!
//! - [`pagination`] derives page descriptors, either from an upstream count or by
//!   slicing an in-memory collection.
//! - [`favourites`] keeps the locally persisted set of favourite bill keys.
//! - [`resolver`] resolves favourite keys into full records, absorbing misses.
//! - [`listing`] is the all-bills flow over any [`source::BillSource`].
//! - [`remote`] talks to the Oireachtas API.
pub mod error;
pub mod favourites;
pub mod listing;
pub mod models;
pub mod pagination;
pub mod remote;
pub mod resolver;
pub mod source;

pub use error::{KeyError, PaginationError, SourceError, StorageError};
pub use models::{BillKey, BillRecord, BillTypeFilter};
pub use pagination::{Page, PageDescriptor, PageRequest};
pub use source::{BillSource, ListQuery, Listing};
