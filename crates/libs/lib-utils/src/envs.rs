//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.
//!
//! Empty values count as unset, so `FOO=` in a `.env` file falls back to
//! the default instead of producing an empty setting.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Get an environment variable, or `default` when it is unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Parse an environment variable, or use `default` when it is unset.
///
/// A value that is present but malformed is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

/// Read a `1`/`true`/`yes` style flag. Anything else is `false`.
pub fn get_env_flag(name: &'static str) -> bool {
    get_env(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} is not set"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.

    #[test]
    fn test_missing_and_empty_are_unset() {
        assert_eq!(get_env("LIB_UTILS_TEST_NEVER_SET"), Err(Error::MissingEnv("LIB_UTILS_TEST_NEVER_SET")));

        env::set_var("LIB_UTILS_TEST_EMPTY", "  ");
        assert_eq!(get_env_or("LIB_UTILS_TEST_EMPTY", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_PARSE_UNSET", 30u64), Ok(30));

        env::set_var("LIB_UTILS_TEST_PARSE_SET", " 45 ");
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_PARSE_SET", 30u64), Ok(45));

        env::set_var("LIB_UTILS_TEST_PARSE_BAD", "soon");
        assert_eq!(
            get_env_parse_or("LIB_UTILS_TEST_PARSE_BAD", 30u64),
            Err(Error::WrongFormat("LIB_UTILS_TEST_PARSE_BAD"))
        );
    }

    #[test]
    fn test_flag() {
        env::set_var("LIB_UTILS_TEST_FLAG_ON", "TRUE");
        env::set_var("LIB_UTILS_TEST_FLAG_OFF", "0");
        assert!(get_env_flag("LIB_UTILS_TEST_FLAG_ON"));
        assert!(!get_env_flag("LIB_UTILS_TEST_FLAG_OFF"));
        assert!(!get_env_flag("LIB_UTILS_TEST_FLAG_UNSET"));
    }
}
