//! Library circulation: the catalog of items and its fine ledger.

pub mod catalog;

pub use catalog::{Catalog, CatalogSnapshot};
