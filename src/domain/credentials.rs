//! Credential material held by a pipeline for its lifetime.

use crate::infra::error::{EncryptError, EncryptResult};
use std::fmt;

/// Signer private key, signer certificate and recipient certificate.
///
/// The buffers are opaque here; they are only parsed by the signing and
/// encryption services. Never mutated after construction.
#[derive(Clone)]
pub struct CredentialSet {
    signer_key: Box<[u8]>,
    signer_cert: Box<[u8]>,
    recipient_cert: Box<[u8]>,
}

impl CredentialSet {
    /// Create a credential set; every buffer must be non-empty.
    pub fn new(
        signer_key: Vec<u8>,
        signer_cert: Vec<u8>,
        recipient_cert: Vec<u8>,
    ) -> EncryptResult<Self> {
        for (what, buf) in [
            ("signer private key", &signer_key),
            ("signer certificate", &signer_cert),
            ("recipient certificate", &recipient_cert),
        ] {
            if buf.is_empty() {
                return Err(EncryptError::MissingCredential(format!("{what} is empty")));
            }
        }

        Ok(Self {
            signer_key: signer_key.into_boxed_slice(),
            signer_cert: signer_cert.into_boxed_slice(),
            recipient_cert: recipient_cert.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn signer_key(&self) -> &[u8] {
        &self.signer_key
    }

    #[must_use]
    pub fn signer_cert(&self) -> &[u8] {
        &self.signer_cert
    }

    #[must_use]
    pub fn recipient_cert(&self) -> &[u8] {
        &self.recipient_cert
    }
}

// Never print key material
impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CredentialSet(signer_key=[REDACTED; {}], signer_cert_len={}, recipient_cert_len={})",
            self.signer_key.len(),
            self.signer_cert.len(),
            self.recipient_cert.len()
        )
    }
}
