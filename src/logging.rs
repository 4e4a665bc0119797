//! Helpers for keeping secrets out of logs and console output.

use std::fmt;

/// Masked representation of a secret value
///
/// Shows at most the first 8 characters followed by `***`, so startup logs
/// and `config show` can confirm which credential is in use without
/// leaking it.
#[derive(Clone, Debug)]
pub struct SensitiveValue<'a> {
    inner: &'a str,
}

impl<'a> SensitiveValue<'a> {
    pub fn new(value: &'a str) -> Self {
        Self { inner: value }
    }
}

impl<'a> fmt::Display for SensitiveValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 8.min(self.inner.len());
        if self.inner.len() <= visible_len {
            write!(f, "***")
        } else {
            write!(f, "{}***", &self.inner[..visible_len])
        }
    }
}
