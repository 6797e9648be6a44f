//! Catalog search predicates.

use rust_decimal::Decimal;

use crate::product::Product;

/// Conjunction of optional search predicates.
///
/// - `brand` / `color`: case-insensitive substring match
/// - `min_price` / `max_price`: inclusive bounds on the selling price
///
/// An omitted predicate places no constraint. Blank text predicates count as
/// omitted. A color predicate never matches a product without a color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    brand: Option<String>,
    color: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: Option<impl Into<String>>) -> Self {
        self.brand = non_blank(brand);
        self
    }

    pub fn with_color(mut self, color: Option<impl Into<String>>) -> Self {
        self.color = non_blank(color);
        self
    }

    pub fn with_min_price(mut self, min_price: Option<Decimal>) -> Self {
        self.min_price = min_price;
        self
    }

    pub fn with_max_price(mut self, max_price: Option<Decimal>) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    /// True when no predicate is set (the whole catalog matches).
    pub fn is_unconstrained(&self) -> bool {
        self.brand.is_none()
            && self.color.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(brand) = &self.brand {
            if !contains_ignore_case(product.brand(), brand) {
                return false;
            }
        }
        if let Some(color) = &self.color {
            match product.color() {
                Some(c) if contains_ignore_case(c, color) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_price {
            if product.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price() > max {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
