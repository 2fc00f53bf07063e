//! Re-wraps the encrypted S/MIME envelope in PKCS7 marker lines.

use crate::domain::envelope::OutputEnvelope;
use crate::infra::error::EncryptResult;
use crate::services::mime::MimeBodyExtractor;
use std::path::Path;

/// Turns the encryptor's S/MIME output into the transport envelope.
/// The base64 body is passed through as text, never decoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvelopeWrapper {
    extractor: MimeBodyExtractor,
}

impl EnvelopeWrapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn wrap(&self, body: String) -> OutputEnvelope {
        OutputEnvelope::new(body)
    }

    pub fn wrap_file(&self, path: &Path) -> EncryptResult<OutputEnvelope> {
        let body = self.extractor.extract_file(path)?;
        Ok(self.wrap(body))
    }
}
