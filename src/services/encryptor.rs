//! PKCS#7 enveloping of the raw signed structure for one recipient.

use crate::infra::config::ContentCipher;
use crate::infra::error::{EncryptError, EncryptResult};
use openssl::error::ErrorStack;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::stack::Stack;
use openssl::x509::X509;
use std::fs;
use std::path::Path;

pub struct Pkcs7Encryptor {
    recipients: Stack<X509>,
    cipher: ContentCipher,
    flags: Pkcs7Flags,
}

impl Pkcs7Encryptor {
    /// Parse the recipient certificate. PEM is expected, DER is accepted as well.
    pub fn from_pem(
        recipient_cert: &[u8],
        cipher: ContentCipher,
        flags: Pkcs7Flags,
    ) -> EncryptResult<Self> {
        let certificate = X509::from_pem(recipient_cert)
            .or_else(|_| X509::from_der(recipient_cert))
            .map_err(|e| encryption_error("invalid recipient certificate", &e))?;

        let mut recipients = Stack::<X509>::new().map_err(|e| encryption_error("stack", &e))?;
        recipients
            .push(certificate)
            .map_err(|e| encryption_error("stack", &e))?;

        Ok(Self {
            recipients,
            cipher,
            flags,
        })
    }

    #[must_use]
    pub fn cipher(&self) -> ContentCipher {
        self.cipher
    }

    /// Encrypt `raw` and return the textual enveloped-data envelope.
    pub fn encrypt(&self, raw: &[u8]) -> EncryptResult<Vec<u8>> {
        let pkcs7 = Pkcs7::encrypt(&self.recipients, raw, self.cipher.cipher(), self.flags)
            .map_err(|e| encryption_error("can't encrypt data of pkcs7", &e))?;

        pkcs7
            .to_smime(raw, self.flags)
            .map_err(|e| encryption_error("can't write encrypted envelope", &e))
    }

    /// Encrypt the contents of `input` into `output`.
    pub fn encrypt_file(&self, input: &Path, output: &Path) -> EncryptResult<()> {
        let raw = fs::read(input).map_err(|e| EncryptError::io(input, e))?;
        let envelope = self.encrypt(&raw)?;
        fs::write(output, &envelope).map_err(|e| EncryptError::io(output, e))?;
        log::debug!(
            "Encrypted {} raw bytes with {} into {} byte envelope",
            raw.len(),
            self.cipher,
            envelope.len()
        );
        Ok(())
    }
}

fn encryption_error(context: &str, error: &ErrorStack) -> EncryptError {
    EncryptError::EncryptionFailed(format!("{context}: {error}"))
}
