//! Construction-time loading of credential files.

use crate::domain::credentials::CredentialSet;
use crate::infra::config::CredentialFiles;
use crate::infra::error::{EncryptError, EncryptResult};
use std::fs;
use std::path::Path;

/// Reads the signer key, signer certificate and recipient certificate
/// from fixed file names inside one directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialLoader;

impl CredentialLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, dir: &Path, files: &CredentialFiles) -> EncryptResult<CredentialSet> {
        let signer_key = read_credential(dir, &files.signer_key, "signer private key")?;
        let signer_cert = read_credential(dir, &files.signer_cert, "signer certificate")?;
        let recipient_cert = read_credential(dir, &files.recipient_cert, "recipient certificate")?;

        log::info!("Loaded credentials from {}", dir.display());
        CredentialSet::new(signer_key, signer_cert, recipient_cert)
    }
}

fn read_credential(dir: &Path, name: &str, what: &str) -> EncryptResult<Vec<u8>> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(EncryptError::MissingCredential(format!(
            "can't find {what} at {}",
            path.display()
        )));
    }

    let bytes = fs::read(&path).map_err(|e| {
        EncryptError::MissingCredential(format!("can't open {what} at {}: {e}", path.display()))
    })?;

    if bytes.is_empty() {
        return Err(EncryptError::MissingCredential(format!(
            "{what} at {} is empty",
            path.display()
        )));
    }

    Ok(bytes)
}
