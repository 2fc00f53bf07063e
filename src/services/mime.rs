//! MIME body extraction.
//!
//! Signing and encryption primitives emit S/MIME text: header lines, one
//! blank line, then the base64 body. This service drops everything up to
//! and including the first blank line and returns the non-blank lines that
//! follow, each newline-terminated.

use crate::infra::error::{EncryptError, EncryptResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Stateless header stripper for S/MIME text envelopes
#[derive(Debug, Default, Clone, Copy)]
pub struct MimeBodyExtractor;

impl MimeBodyExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract the body from any line-oriented reader.
    ///
    /// Trailing whitespace is trimmed from every line and blank lines are
    /// never emitted, so every returned line is body text. An envelope
    /// without a blank separator line, or one that is not UTF-8, is rejected
    /// with [`EncryptError::DecodeError`].
    pub fn extract<R: BufRead>(&self, mut reader: R, resource: &str) -> EncryptResult<String> {
        let mut body = String::new();
        let mut in_body = false;
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::InvalidData => EncryptError::DecodeError(format!(
                        "envelope '{resource}' is not valid UTF-8 text"
                    )),
                    _ => EncryptError::io(resource, e),
                })?;
            if read == 0 {
                break;
            }

            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                in_body = true;
                continue;
            }
            if !in_body {
                continue;
            }

            body.push_str(trimmed);
            body.push('\n');
        }

        if !in_body {
            return Err(EncryptError::DecodeError(format!(
                "no blank line separating headers from body in '{resource}'"
            )));
        }

        Ok(body)
    }

    /// Extract the body of an envelope stored in a file.
    pub fn extract_file(&self, path: &Path) -> EncryptResult<String> {
        let file = File::open(path)
            .map_err(|e| EncryptError::io(path, format!("can't open for read: {e}")))?;
        self.extract(BufReader::new(file), &path.display().to_string())
    }
}
