//! Retrieval limits.
//!
//! Checked by the service before any statement reaches the store.

use crate::domain::wallets::errors::WalletsServiceError;

/// Largest page any listing or search returns.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Longest accepted search query, in characters.
pub const MAX_SEARCH_QUERY_CHARS: usize = 100;

/// Minimum trigram similarity for a name to match a search query.
///
/// Same as the `pg_trgm.similarity_threshold` default.
pub const MIN_NAME_SIMILARITY: f32 = 0.3;

/// Ensure `limit` is within `1..=MAX_PAGE_LIMIT`.
///
/// # Errors
///
/// Returns [`WalletsServiceError::InvalidArgument`] when it is not.
pub fn check_limit(limit: i64) -> Result<(), WalletsServiceError> {
    if limit <= 0 {
        return Err(WalletsServiceError::InvalidArgument(
            "limit must be positive".to_string(),
        ));
    }

    if limit > MAX_PAGE_LIMIT {
        return Err(WalletsServiceError::InvalidArgument(format!(
            "limit must not exceed {MAX_PAGE_LIMIT}"
        )));
    }

    Ok(())
}

/// Ensure `offset` is not negative.
///
/// # Errors
///
/// Returns [`WalletsServiceError::InvalidArgument`] when it is.
pub fn check_offset(offset: i64) -> Result<(), WalletsServiceError> {
    if offset < 0 {
        return Err(WalletsServiceError::InvalidArgument(
            "offset must not be negative".to_string(),
        ));
    }

    Ok(())
}

/// Check a search query's length and normalize it.
///
/// Returns `None` for an empty or whitespace-only query, which means
/// "no filtering".
///
/// # Errors
///
/// Returns [`WalletsServiceError::InvalidArgument`] when the query is longer
/// than [`MAX_SEARCH_QUERY_CHARS`].
pub fn search_term(query: &str) -> Result<Option<&str>, WalletsServiceError> {
    if query.chars().count() > MAX_SEARCH_QUERY_CHARS {
        return Err(WalletsServiceError::InvalidArgument(format!(
            "query must not exceed {MAX_SEARCH_QUERY_CHARS} characters"
        )));
    }

    let term = query.trim();

    Ok((!term.is_empty()).then_some(term))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn rejection(result: Result<impl std::fmt::Debug, WalletsServiceError>) -> String {
        match result {
            Err(WalletsServiceError::InvalidArgument(message)) => message,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn limit_within_bounds_is_accepted() -> TestResult {
        check_limit(1)?;
        check_limit(20)?;
        check_limit(MAX_PAGE_LIMIT)?;

        Ok(())
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        assert_eq!(rejection(check_limit(0)), "limit must be positive");
        assert_eq!(rejection(check_limit(-5)), "limit must be positive");
        assert_eq!(rejection(check_limit(i64::MIN)), "limit must be positive");
    }

    #[test]
    fn limit_above_ceiling_is_rejected() {
        assert_eq!(
            rejection(check_limit(MAX_PAGE_LIMIT + 1)),
            "limit must not exceed 100"
        );
    }

    #[test]
    fn negative_offset_is_rejected() -> TestResult {
        check_offset(0)?;
        check_offset(250)?;

        assert_eq!(rejection(check_offset(-1)), "offset must not be negative");

        Ok(())
    }

    #[test]
    fn query_at_ceiling_is_accepted() -> TestResult {
        let query = "w".repeat(MAX_SEARCH_QUERY_CHARS);

        assert_eq!(search_term(&query)?, Some(query.as_str()));

        Ok(())
    }

    #[test]
    fn query_over_ceiling_is_rejected() {
        let query = "w".repeat(MAX_SEARCH_QUERY_CHARS + 1);

        assert_eq!(
            rejection(search_term(&query)),
            "query must not exceed 100 characters"
        );
    }

    #[test]
    fn query_length_counts_characters_not_bytes() -> TestResult {
        let query = "é".repeat(MAX_SEARCH_QUERY_CHARS);

        assert!(query.len() > MAX_SEARCH_QUERY_CHARS, "multi-byte input");
        assert!(search_term(&query)?.is_some(), "100 characters is allowed");

        Ok(())
    }

    #[test]
    fn blank_query_means_no_filter() -> TestResult {
        assert_eq!(search_term("")?, None);
        assert_eq!(search_term("   \t")?, None);

        Ok(())
    }

    #[test]
    fn query_is_trimmed() -> TestResult {
        assert_eq!(search_term("  wallet ")?, Some("wallet"));

        Ok(())
    }
}
