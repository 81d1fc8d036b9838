//! Pagination-related DTOs for the user listing.

use serde::{Deserialize, Serialize};

use super::UserResponse;

/// Page size used when `limit` is missing or unusable.
pub const DEFAULT_LIMIT: i64 = 10;

/// Normalized `limit`/`offset` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PaginationParams {
    /// Builds parameters from raw query pairs.
    ///
    /// The first occurrence of each key wins. A limit that is missing,
    /// non-numeric or not positive falls back to [`DEFAULT_LIMIT`]; an offset
    /// that is missing, non-numeric or negative falls back to 0.
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| v.parse::<i64>().ok())
        };

        Self {
            limit: first("limit").filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            offset: first("offset").filter(|o| *o >= 0).unwrap_or(0),
        }
    }
}

/// Listing body. Not wrapped in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct PagedUsersResponse {
    pub data: Vec<UserResponse>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PagedUsersResponse {
    pub fn new(data: Vec<UserResponse>, total_count: i64, params: PaginationParams) -> Self {
        Self {
            data,
            total_count,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(
            PaginationParams::from_query(&[]),
            PaginationParams {
                limit: 10,
                offset: 0
            }
        );
    }

    #[test]
    fn test_valid_values() {
        let params = PaginationParams::from_query(&query(&[("limit", "25"), ("offset", "50")]));
        assert_eq!(params.limit, 25);
        assert_eq!(params.offset, 50);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let params = PaginationParams::from_query(&query(&[("limit", "-1"), ("offset", "-1")]));
        assert_eq!(params, PaginationParams::default());

        let params = PaginationParams::from_query(&query(&[("limit", "abc"), ("offset", "1.5")]));
        assert_eq!(params, PaginationParams::default());

        let params = PaginationParams::from_query(&query(&[("limit", "0"), ("offset", "0")]));
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = PaginationParams::from_query(&query(&[
            ("limit", "5"),
            ("limit", "7"),
            ("offset", "x"),
            ("offset", "3"),
        ]));
        assert_eq!(params.limit, 5);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_no_upper_cap_and_sign_prefix() {
        let params =
            PaginationParams::from_query(&query(&[("limit", "100000"), ("offset", "+4")]));
        assert_eq!(params.limit, 100000);
        assert_eq!(params.offset, 4);
    }

    proptest! {
        #[test]
        fn test_limit_always_positive_offset_never_negative(
            limit in ".{0,12}",
            offset in ".{0,12}",
        ) {
            let params = PaginationParams::from_query(&[
                ("limit".to_string(), limit),
                ("offset".to_string(), offset),
            ]);
            prop_assert!(params.limit > 0);
            prop_assert!(params.offset >= 0);
        }

        #[test]
        fn test_numeric_values_pass_through(limit in 1i64..=i64::MAX, offset in 0i64..=i64::MAX) {
            let params = PaginationParams::from_query(&[
                ("limit".to_string(), limit.to_string()),
                ("offset".to_string(), offset.to_string()),
            ]);
            prop_assert_eq!(params, PaginationParams { limit, offset });
        }
    }
}
