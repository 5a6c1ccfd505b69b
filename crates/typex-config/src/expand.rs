//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` (common in
/// Typst input values) is never touched. An unset variable without a default
/// is reported against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_program_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TYPEX_TEST_TYPST_BIN", "/opt/typst/bin/typst");
        }
        let result = expand_env("${TYPEX_TEST_TYPST_BIN}", "renderer.program").unwrap();
        assert_eq!(result, "/opt/typst/bin/typst");
        unsafe {
            std::env::remove_var("TYPEX_TEST_TYPST_BIN");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TYPEX_TEST_UNSET");
        }
        let result = expand_env("${TYPEX_TEST_UNSET:-typst}", "renderer.program").unwrap();
        assert_eq!(result, "typst");
    }

    #[test]
    fn test_expand_embedded_in_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TYPEX_TEST_HOME", "/home/author");
        }
        let result = expand_env("${TYPEX_TEST_HOME}/fonts", "renderer.font_paths").unwrap();
        assert_eq!(result, "/home/author/fonts");
        unsafe {
            std::env::remove_var("TYPEX_TEST_HOME");
        }
    }

    #[test]
    fn test_expand_missing_var_reports_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TYPEX_TEST_MISSING");
        }
        let err = expand_env("${TYPEX_TEST_MISSING}", "renderer.program").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TYPEX_TEST_MISSING"));
        assert!(err.to_string().contains("renderer.program"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("price=$5", "renderer.inputs.price").unwrap();
        assert_eq!(result, "price=$5");
    }
}
