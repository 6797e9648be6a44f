//! Per-row validation of uploaded catalog data.
//!
//! A `RawRow` is the untyped intermediate form of one CSV record (header name
//! to cell text). `validate_row` turns it into a `Product` or a
//! `RowRejection` naming the identifier to report back to the uploader.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;

use streamoid_core::Sku;

use crate::product::{NewProduct, Product, ProductViolation};

/// Reported in place of a SKU when a row fails the presence check without one.
pub const MISSING_SKU: &str = "Missing SKU";

/// Reported in place of a SKU when the row could not be read at all.
pub const INVALID_DATA: &str = "Invalid Data";

/// Columns that must be present and non-empty on every row.
pub const REQUIRED_FIELDS: [&str; 5] = ["sku", "name", "brand", "mrp", "price"];

/// One untyped record: column name -> cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Cell value with surrounding whitespace removed; `None` when the column is
    /// absent or the cell is blank.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Why a row was not stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Violation(#[from] ProductViolation),

    #[error("unreadable record: {0}")]
    Malformed(String),
}

/// A rejected row: the identifier reported to the caller plus the reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("row {identifier} rejected: {reason}")]
pub struct RowRejection {
    pub identifier: String,
    pub reason: RejectReason,
}

impl RowRejection {
    fn new(identifier: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            identifier: identifier.into(),
            reason,
        }
    }

    /// Rejection for a record that could not be decoded into cells.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(INVALID_DATA, RejectReason::Malformed(detail.into()))
    }
}

/// Validate one row and build the typed product.
///
/// Checks run in order: required-field presence, numeric coercion, business
/// rules. A blank or absent `quantity` means 0.
pub fn validate_row(row: &RawRow) -> Result<Product, RowRejection> {
    let Ok(sku) = Sku::new(row.field("sku").unwrap_or_default()) else {
        return Err(RowRejection::new(MISSING_SKU, RejectReason::MissingField("sku")));
    };
    let reject = |reason: RejectReason| RowRejection::new(sku.as_str(), reason);

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| row.field(f).is_none()) {
        return Err(reject(RejectReason::MissingField(*missing)));
    }

    let mrp = parse_decimal("mrp", row.field("mrp")).map_err(reject)?;
    let price = parse_decimal("price", row.field("price")).map_err(reject)?;
    let quantity = match row.field("quantity") {
        None => 0,
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            reject(RejectReason::InvalidNumber {
                field: "quantity",
                value: raw.to_string(),
            })
        })?,
    };

    Product::new(NewProduct {
        sku: sku.clone(),
        name: row.field("name").unwrap_or_default().to_string(),
        brand: row.field("brand").unwrap_or_default().to_string(),
        color: row.field("color").map(str::to_string),
        size: row.field("size").map(str::to_string),
        mrp,
        price,
        quantity,
    })
    .map_err(|v| reject(v.into()))
}

fn parse_decimal(field: &'static str, raw: Option<&str>) -> Result<Decimal, RejectReason> {
    let raw = raw.ok_or(RejectReason::MissingField(field))?;
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| decimal_from_float_text(raw))
        .ok_or_else(|| RejectReason::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Float syntax the exact parsers refuse, e.g. exponents past 28 decimal
/// places. Magnitudes below one that still don't fit round to zero.
fn decimal_from_float_text(raw: &str) -> Option<Decimal> {
    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Decimal::from_f64(value).or_else(|| (value.abs() < 1.0).then_some(Decimal::ZERO))
}
