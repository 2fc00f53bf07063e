//! Binary normalization of the signed envelope.
//!
//! The signing primitive writes an S/MIME text envelope even when binary
//! output is requested, while the encryption step needs the raw DER
//! PKCS#7 structure as input. This service extracts the base64 body and
//! replaces the envelope with the decoded bytes.

use crate::infra::error::{EncryptError, EncryptResult};
use crate::services::mime::MimeBodyExtractor;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryNormalizer {
    extractor: MimeBodyExtractor,
}

impl BinaryNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly decode an extracted body. Line breaks and other ASCII
    /// whitespace are ignored; anything else must be standard base64.
    pub fn decode_body(&self, body: &str) -> EncryptResult<Vec<u8>> {
        let compact: String = body.split_ascii_whitespace().collect();
        if compact.is_empty() {
            return Err(EncryptError::DecodeError(
                "envelope body is empty".to_string(),
            ));
        }
        Ok(STANDARD.decode(compact.as_bytes())?)
    }

    /// Extract and decode the envelope at `path`, then overwrite the file
    /// with exactly the decoded bytes. Returns the decoded length.
    pub fn normalize_file(&self, path: &Path) -> EncryptResult<usize> {
        let body = self.extractor.extract_file(path)?;
        let raw = self.decode_body(&body)?;

        let mut file = File::create(path)
            .map_err(|e| EncryptError::io(path, format!("can't open for write: {e}")))?;
        file.write_all(&raw)
            .and_then(|()| file.flush())
            .map_err(|e| EncryptError::io(path, e))?;

        log::debug!(
            "Normalized {} to {} raw bytes",
            path.display(),
            raw.len()
        );
        Ok(raw.len())
    }
}
