use std::str::FromStr;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use streamoid_products::SearchFilter;

use crate::app::errors;

// -------------------------
// Query-string DTOs
// -------------------------
//
// Fields arrive as raw strings so malformed values get the JSON error
// envelope instead of the framework's plain-text rejection.

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub brand: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl ListQuery {
    /// `(page, limit)`; blank values count as absent. Bounds are checked later.
    pub fn parse(&self) -> Result<(Option<u32>, Option<u32>), axum::response::Response> {
        Ok((
            parse_optional::<u32>("page", self.page.as_deref())?,
            parse_optional::<u32>("limit", self.limit.as_deref())?,
        ))
    }
}

impl SearchQuery {
    pub fn to_filter(&self) -> Result<SearchFilter, axum::response::Response> {
        let min_price = parse_price("minPrice", self.min_price.as_deref())?;
        let max_price = parse_price("maxPrice", self.max_price.as_deref())?;

        Ok(SearchFilter::new()
            .with_brand(self.brand.clone())
            .with_color(self.color.clone())
            .with_min_price(min_price)
            .with_max_price(max_price))
    }
}

fn parse_optional<T: FromStr>(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, axum::response::Response> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("{name} must be a positive integer (got {v:?})"),
            )
        }),
    }
}

fn parse_price(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, axum::response::Response> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Decimal::from_str(v)
            .or_else(|_| Decimal::from_scientific(v))
            .map(Some)
            .map_err(|_| {
                errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("{name} must be a number (got {v:?})"),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_paging_values_fall_back_to_defaults() {
        let q = ListQuery {
            page: Some(" ".to_string()),
            limit: None,
        };
        assert_eq!(q.parse().unwrap(), (None, None));
    }

    #[test]
    fn non_numeric_paging_is_rejected() {
        let q = ListQuery {
            page: Some("two".to_string()),
            limit: None,
        };
        assert_eq!(q.parse().unwrap_err().status(), StatusCode::BAD_REQUEST);

        let q = ListQuery {
            page: None,
            limit: Some("-1".to_string()),
        };
        assert_eq!(q.parse().unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn search_query_maps_every_predicate() {
        let q = SearchQuery {
            brand: Some("brandx".to_string()),
            color: Some(String::new()),
            min_price: Some("100.50".to_string()),
            max_price: Some("1e3".to_string()),
        };
        let filter = q.to_filter().unwrap();

        assert_eq!(filter.brand(), Some("brandx"));
        assert_eq!(filter.color(), None);
        assert_eq!(filter.min_price(), Some(Decimal::new(10050, 2)));
        assert_eq!(filter.max_price(), Some(Decimal::new(1000, 0)));
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let q = SearchQuery {
            min_price: Some("cheap".to_string()),
            ..SearchQuery::default()
        };
        assert_eq!(q.to_filter().unwrap_err().status(), StatusCode::BAD_REQUEST);
    }
}
