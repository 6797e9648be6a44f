use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use streamoid_core::{DomainError, Sku};

/// Invariant violations detected while constructing a `Product`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductViolation {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("price {price} exceeds mrp {mrp}")]
    PriceExceedsMrp { price: Decimal, mrp: Decimal },

    #[error("quantity {0} is negative")]
    NegativeQuantity(i64),
}

impl From<ProductViolation> for DomainError {
    fn from(v: ProductViolation) -> Self {
        DomainError::invariant(v.to_string())
    }
}

/// Unvalidated product attributes, consumed by `Product::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub sku: Sku,
    pub name: String,
    pub brand: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub mrp: Decimal,
    pub price: Decimal,
    pub quantity: i64,
}

/// A catalog product.
///
/// Always satisfies `price <= mrp` and `quantity >= 0`; `name` and `brand`
/// are non-empty. Serializes to the wire shape
/// `{sku, name, brand, color, size, mrp, price, quantity}` with decimals as
/// JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    sku: Sku,
    name: String,
    brand: String,
    color: Option<String>,
    size: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    mrp: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: i64,
}

impl Product {
    pub fn new(draft: NewProduct) -> Result<Self, ProductViolation> {
        if draft.name.trim().is_empty() {
            return Err(ProductViolation::EmptyField("name"));
        }
        if draft.brand.trim().is_empty() {
            return Err(ProductViolation::EmptyField("brand"));
        }
        if draft.price > draft.mrp {
            return Err(ProductViolation::PriceExceedsMrp {
                price: draft.price,
                mrp: draft.mrp,
            });
        }
        if draft.quantity < 0 {
            return Err(ProductViolation::NegativeQuantity(draft.quantity));
        }

        Ok(Self {
            sku: draft.sku,
            name: draft.name,
            brand: draft.brand,
            color: draft.color.filter(|c| !c.trim().is_empty()),
            size: draft.size.filter(|s| !s.trim().is_empty()),
            mrp: draft.mrp,
            price: draft.price,
            quantity: draft.quantity,
        })
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn mrp(&self) -> Decimal {
        self.mrp
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}
