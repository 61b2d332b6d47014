//! Environment variable helpers

use crate::domain::errors::LogError;

/// Disables spinner animation outright when true
pub const DISABLE_SPINNER_ENV_VAR: &str = "STAGELOG_DISABLE_SPINNER";

/// Parse a boolean using the grammar shared with other CLI tooling:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Read a boolean environment variable.
///
/// Unset or empty means false. An unparseable value also means false and is
/// returned as the error alongside, so the caller can warn about it.
pub fn load_bool(name: &str) -> (bool, Option<LogError>) {
    let value = std::env::var(name).unwrap_or_default();
    if value.is_empty() {
        return (false, None);
    }
    match parse_bool(&value) {
        Some(b) => (b, None),
        None => (
            false,
            Some(LogError::InvalidBool {
                name: name.to_string(),
                value,
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VAR: &str = "STAGELOG_TEST_BOOL";

    #[test]
    fn test_parse_bool_grammar() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRUE"), None);
    }

    #[test]
    fn test_load_bool_unset_is_false() {
        temp_env::with_var_unset(VAR, || {
            let (value, err) = load_bool(VAR);
            assert!(!value);
            assert!(err.is_none());
        });
    }

    #[test]
    fn test_load_bool_true() {
        temp_env::with_var(VAR, Some("true"), || {
            assert!(load_bool(VAR).0);
        });
    }

    #[test]
    fn test_load_bool_invalid_is_false_with_warning() {
        temp_env::with_var(VAR, Some("maybe"), || {
            let (value, err) = load_bool(VAR);
            assert!(!value);
            let message = err.unwrap().to_string();
            assert_eq!(
                message,
                "'maybe' is not a valid value for environment variable STAGELOG_TEST_BOOL"
            );
        });
    }
}
