//! PKCS#7 signing of the canonical parameter stream.

use crate::infra::error::{EncryptError, EncryptResult};
use openssl::error::ErrorStack;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::X509;
use std::fs;
use std::path::Path;

/// Signs with the sender's certificate and private key.
///
/// Output is the S/MIME text envelope that OpenSSL writes for a signed
/// PKCS#7 structure; it still has to go through
/// [`BinaryNormalizer`](crate::services::BinaryNormalizer) before encryption.
pub struct Pkcs7Signer {
    certificate: X509,
    private_key: PKey<Private>,
    flags: Pkcs7Flags,
}

impl Pkcs7Signer {
    /// Parse signer credentials. PEM is expected, DER is accepted as well.
    pub fn from_pem(cert: &[u8], key: &[u8], flags: Pkcs7Flags) -> EncryptResult<Self> {
        let certificate = X509::from_pem(cert)
            .or_else(|_| X509::from_der(cert))
            .map_err(|e| signing_error("invalid signer certificate", &e))?;
        let private_key = PKey::private_key_from_pem(key)
            .or_else(|_| PKey::private_key_from_der(key))
            .map_err(|e| signing_error("invalid signer private key", &e))?;

        Ok(Self {
            certificate,
            private_key,
            flags,
        })
    }

    /// Sign `data` and return the textual signed envelope.
    pub fn sign(&self, data: &[u8]) -> EncryptResult<Vec<u8>> {
        let extra_certs = Stack::<X509>::new().map_err(|e| signing_error("stack", &e))?;
        let pkcs7 = Pkcs7::sign(
            &self.certificate,
            &self.private_key,
            &extra_certs,
            data,
            self.flags,
        )
        .map_err(|e| signing_error("can't sign data of pkcs7", &e))?;

        pkcs7
            .to_smime(data, self.flags)
            .map_err(|e| signing_error("can't write signed envelope", &e))
    }

    /// Sign the contents of `input` into `output`.
    pub fn sign_file(&self, input: &Path, output: &Path) -> EncryptResult<()> {
        let data = fs::read(input).map_err(|e| EncryptError::io(input, e))?;
        let envelope = self.sign(&data)?;
        fs::write(output, &envelope).map_err(|e| EncryptError::io(output, e))?;
        log::debug!(
            "Signed {} bytes into {} byte envelope",
            data.len(),
            envelope.len()
        );
        Ok(())
    }
}

fn signing_error(context: &str, error: &ErrorStack) -> EncryptError {
    EncryptError::SigningFailed(format!("{context}: {error}"))
}
