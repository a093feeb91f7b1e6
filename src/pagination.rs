//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest number of items a client may request per page.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// A validated, 1-indexed page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Apply the defaults from `config` to the requested `page` and `per_page`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPage] if `page` is zero, or
    /// [Error::InvalidPageSize] if `per_page` is zero. A `per_page` above
    /// `config.max_page_size` is lowered to the maximum.
    pub fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = page.unwrap_or(config.default_page);
        let per_page = per_page.unwrap_or(config.default_page_size);

        if page == 0 {
            return Err(Error::InvalidPage);
        }

        if per_page == 0 {
            return Err(Error::InvalidPageSize);
        }

        Ok(Self {
            page,
            per_page: per_page.min(config.max_page_size),
        })
    }

    /// The number of items before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{PageRequest, PaginationConfig};

    #[test]
    fn uses_defaults() {
        let got = PageRequest::new(None, None, &PaginationConfig::default()).unwrap();

        assert_eq!(got, PageRequest { page: 1, per_page: 10 });
        assert_eq!(got.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let got = PageRequest::new(Some(3), Some(25), &PaginationConfig::default()).unwrap();

        assert_eq!(got.offset(), 50);
    }

    #[test]
    fn rejects_page_zero() {
        let got = PageRequest::new(Some(0), None, &PaginationConfig::default());

        assert!(matches!(got, Err(Error::InvalidPage)));
    }

    #[test]
    fn rejects_page_size_zero() {
        let got = PageRequest::new(None, Some(0), &PaginationConfig::default());

        assert!(matches!(got, Err(Error::InvalidPageSize)));
    }

    #[test]
    fn clamps_page_size_to_maximum() {
        let config = PaginationConfig::default();

        let got = PageRequest::new(Some(2), Some(config.max_page_size + 1), &config).unwrap();

        assert_eq!(got, PageRequest { page: 2, per_page: 100 });
        assert_eq!(got.offset(), 100);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let got = PageRequest::new(Some(u64::MAX), Some(100), &PaginationConfig::default()).unwrap();

        assert_eq!(got.offset(), u64::MAX);
    }
}
