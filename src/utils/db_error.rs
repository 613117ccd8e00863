/// Name of the `(domain, code)` uniqueness constraint on `shortened_urls`.
pub const DOMAIN_CODE_CONSTRAINT: &str = "shortened_urls_domain_code_key";

/// Returns true if `e` is a unique violation on the `(domain, code)` constraint.
///
/// Unique violations on any other constraint are not collisions and must not
/// be retried.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(DOMAIN_CODE_CONSTRAINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_collision() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }
}
