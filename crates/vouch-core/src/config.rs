//! Configuration constants and environment overrides
//!
//! Nothing here is read implicitly. Engines take their limits from the
//! options value passed to each call; [`max_depth_from_env`] is only consulted
//! when a caller builds options with `EquivalenceOptions::from_env`.

use thiserror::Error;

/// Default recursion limit for the equivalence engine
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Environment variable overriding [`DEFAULT_MAX_DEPTH`]
pub const MAX_DEPTH_ENV_VAR: &str = "VOUCH_ASSERT_EQUIVALENT_MAX_DEPTH";

/// Number of elements shown around a sequence divergence
pub const WINDOW_SIZE: usize = 5;

/// Number of items the renderer prints before truncating a collection
pub const MAX_ENUMERABLE_LENGTH: usize = 5;

/// Number of members the renderer prints before truncating a record
pub const MAX_OBJECT_MEMBER_COUNT: usize = 5;

/// Nesting depth after which the renderer elides containers
pub const MAX_OBJECT_DEPTH: usize = 3;

/// Characters of a string the renderer prints before truncating it
pub const MAX_STRING_LENGTH: usize = 50;

/// Marker for omitted content
pub const ELLIPSIS: &str = "···";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid max depth {value:?} in {var}: expected a positive integer")]
    InvalidMaxDepth { var: String, value: String },
}

/// Parse a max depth override
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMaxDepth`] when `raw` is not a positive integer.
pub fn parse_max_depth(var: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(ConfigError::InvalidMaxDepth {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Read the max depth override from [`MAX_DEPTH_ENV_VAR`]
///
/// Returns `Ok(None)` when the variable is unset.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMaxDepth`] when the variable is set to
/// something other than a positive integer.
pub fn max_depth_from_env() -> Result<Option<usize>, ConfigError> {
    match std::env::var(MAX_DEPTH_ENV_VAR) {
        Ok(raw) => parse_max_depth(MAX_DEPTH_ENV_VAR, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_depth_accepts_positive() {
        assert_eq!(parse_max_depth("X", "12"), Ok(12));
        assert_eq!(parse_max_depth("X", " 7 "), Ok(7));
    }

    #[test]
    fn test_parse_max_depth_rejects_zero_and_garbage() {
        assert!(matches!(
            parse_max_depth("X", "0"),
            Err(ConfigError::InvalidMaxDepth { .. })
        ));
        let err = parse_max_depth("X", "deep").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid max depth \"deep\" in X: expected a positive integer"
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_MAX_DEPTH, 50);
        assert_eq!(WINDOW_SIZE, 5);
        assert_eq!(ELLIPSIS.chars().count(), 3);
    }
}
