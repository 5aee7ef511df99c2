//! Sensitive data marker for automatic redaction
//!
//! API tokens double as source descriptors on the command line, so they pass
//! through logging call sites. `Sensitive<T>` keeps them out of log output.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper for secrets that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use datosync_core_types::Sensitive;
///
/// let token = Sensitive::new("site-api-token".to_string());
/// assert_eq!(format!("{}", token), "***REDACTED***");
/// assert_eq!(token.expose(), "site-api-token");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only call this where the secret has to leave the process, e.g. as an
    /// `Authorization` header.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<str>> Sensitive<T> {
    /// Short, non-reversible hint for log lines: the length and last two characters.
    pub fn hint(&self) -> String {
        let value = self.0.as_ref();
        let count = value.chars().count();
        if count <= 6 {
            return format!("len={count}");
        }
        let tail: String = value.chars().skip(count - 2).collect();
        format!("len={count} ..{tail}")
    }
}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Sensitive<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
