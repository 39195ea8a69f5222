//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
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

/// A validated page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of records on the page.
    pub page_size: u64,
}

impl PageRequest {
    /// Coerce raw query parameters into a page request.
    ///
    /// Missing, non-numeric and non-positive values fall back to the defaults
    /// in `config`. The page size is capped at [PaginationConfig::max_page_size].
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        config: &PaginationConfig,
    ) -> Self {
        let page = coerce_positive(page).unwrap_or(config.default_page);
        let page_size = coerce_positive(page_size)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Self { page, page_size }
    }

    /// The number of records that come before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

fn coerce_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|&value| value > 0)
}

#[cfg(test)]
mod tests {
    use crate::pagination::{PageRequest, PaginationConfig};

    #[test]
    fn uses_defaults_when_missing() {
        let got = PageRequest::from_params(None, None, &PaginationConfig::default());

        assert_eq!(
            got,
            PageRequest {
                page: 1,
                page_size: 10
            }
        );
    }

    #[test]
    fn uses_valid_values() {
        let got = PageRequest::from_params(Some("3"), Some(" 25 "), &PaginationConfig::default());

        assert_eq!(
            got,
            PageRequest {
                page: 3,
                page_size: 25
            }
        );
    }

    #[test]
    fn falls_back_on_invalid_values() {
        let config = PaginationConfig::default();

        for raw in ["0", "-2", "abc", "", "1.5"] {
            let got = PageRequest::from_params(Some(raw), Some(raw), &config);

            assert_eq!(
                got,
                PageRequest {
                    page: 1,
                    page_size: 10
                },
                "for input {raw:?}"
            );
        }
    }

    #[test]
    fn caps_page_size() {
        let config = PaginationConfig {
            max_page_size: 50,
            ..Default::default()
        };

        let got = PageRequest::from_params(None, Some("1000"), &config);

        assert_eq!(got.page_size, 50);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest {
            page: 4,
            page_size: 10,
        };

        assert_eq!(request.offset(), 30);
    }

    #[test]
    fn offset_saturates() {
        let request = PageRequest {
            page: u64::MAX,
            page_size: u64::MAX,
        };

        assert_eq!(request.offset(), u64::MAX);
    }
}
