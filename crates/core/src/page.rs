//! Page-based pagination parameters.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// A validated, 1-based page request.
///
/// `page >= 1` and `1 <= limit <= PageRequest::MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(page: u32, limit: u32) -> DomainResult<Self> {
        if page < 1 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if limit < 1 {
            return Err(DomainError::validation("limit must be at least 1"));
        }
        if limit > Self::MAX_LIMIT {
            return Err(DomainError::validation(format!(
                "limit must be at most {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    /// Build from optional query values, falling back to the defaults.
    pub fn from_optional(page: Option<u32>, limit: Option<u32>) -> DomainResult<Self> {
        Self::new(
            page.unwrap_or(Self::DEFAULT_PAGE),
            limit.unwrap_or(Self::DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 25).unwrap().offset(), 50);
    }

    #[test]
    fn offset_does_not_overflow_u32() {
        let req = PageRequest::new(u32::MAX, 100).unwrap();
        assert_eq!(req.offset(), u64::from(u32::MAX - 1) * 100);
    }

    #[test]
    fn defaults_apply_to_missing_values() {
        let req = PageRequest::from_optional(None, None).unwrap();
        assert_eq!(req, PageRequest::default());
        assert_eq!((req.page(), req.limit()), (1, 10));

        let req = PageRequest::from_optional(Some(4), None).unwrap();
        assert_eq!((req.page(), req.limit()), (4, 10));
    }

    #[test]
    fn bounds_are_enforced() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 101).is_err());
        assert!(PageRequest::new(1, 100).is_ok());
    }
}
