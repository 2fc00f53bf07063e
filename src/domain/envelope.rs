//! Final transport envelope.

use crate::domain::constants::{PKCS7_BEGIN_MARKER, PKCS7_END_MARKER};
use std::fmt;

/// `-----BEGIN PKCS7-----`, the base64 body lines, `-----END PKCS7-----`.
///
/// The body is kept exactly as extracted: one newline-terminated line per
/// body line of the encrypted envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEnvelope {
    body: String,
}

impl OutputEnvelope {
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PKCS7_BEGIN_MARKER}")?;
        f.write_str(&self.body)?;
        writeln!(f, "{PKCS7_END_MARKER}")
    }
}
