//! # Shared Utility Functions
//!
//! ## Token Display
//!
//! Credentials must never be written to logs or screens in full.
//! [`mask_secret`] keeps a short prefix and suffix so two tokens can still be
//! told apart while debugging a rotation.
//!
//! ```rust
//! use shared::utils::mask_secret;
//!
//! assert_eq!(mask_secret("eyJhbGciOiJIUzI1NiJ9.payload.sig", 4, 3), "eyJh...sig");
//! ```

/// Shorten a secret to its first `prefix_len` and last `suffix_len` characters.
///
/// Secrets too short to hide anything are replaced by `***` entirely.
///
/// # Examples
///
/// ```rust
/// use shared::utils::mask_secret;
///
/// assert_eq!(mask_secret("r-0123456789abcdef", 4, 4), "r-01...cdef");
/// assert_eq!(mask_secret("short", 4, 4), "***");
/// ```
pub fn mask_secret(secret: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = secret.chars().collect();

    // Leave at least as many hidden characters as shown ones
    if chars.len() < (prefix_len + suffix_len) * 2 {
        return "***".to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

/// [`mask_secret`] with the default 4/4 split.
pub fn fingerprint(secret: &str) -> String {
    mask_secret(secret, 4, 4)
}
