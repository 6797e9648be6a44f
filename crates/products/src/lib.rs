//! Products domain module.
//!
//! This crate contains business rules for the product catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage):
//! - `product`: the validated `Product` record and its invariants
//! - `row`: turning one untyped CSV row into a `Product` (or a rejection)
//! - `filter`: catalog search predicates

pub mod filter;
pub mod product;
pub mod row;

pub use filter::SearchFilter;
pub use product::{NewProduct, Product, ProductViolation};
pub use row::{INVALID_DATA, MISSING_SKU, REQUIRED_FIELDS, RawRow, RejectReason, RowRejection, validate_row};
