//! Per-call scratch storage.
//!
//! Three named temporary files (data, signed, encrypted) created with the
//! configured prefix. Names come from `tempfile`'s random generator so
//! concurrent calls never collide; the files are deleted when the
//! [`ScratchSpace`] is dropped, on success and failure alike.

use crate::infra::config::EnvelopeOptions;
use crate::infra::error::{EncryptError, EncryptResult};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

pub struct ScratchSpace {
    data: NamedTempFile,
    signed: NamedTempFile,
    encrypted: NamedTempFile,
}

impl ScratchSpace {
    /// Acquire all three slots. A partially acquired set is released
    /// before the error is returned.
    pub fn acquire(options: &EnvelopeOptions) -> EncryptResult<Self> {
        let dir = options
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);

        let data = create_slot(&dir, &options.temp_prefix)?;
        let signed = create_slot(&dir, &options.temp_prefix)?;
        let encrypted = create_slot(&dir, &options.temp_prefix)?;

        log::trace!(
            "Acquired scratch slots {}, {}, {}",
            data.path().display(),
            signed.path().display(),
            encrypted.path().display()
        );
        Ok(Self {
            data,
            signed,
            encrypted,
        })
    }

    #[must_use]
    pub fn data(&self) -> &Path {
        self.data.path()
    }

    #[must_use]
    pub fn signed(&self) -> &Path {
        self.signed.path()
    }

    #[must_use]
    pub fn encrypted(&self) -> &Path {
        self.encrypted.path()
    }

    /// Paths of every slot, for diagnostics and tests
    #[must_use]
    pub fn paths(&self) -> [PathBuf; 3] {
        [
            self.data().to_path_buf(),
            self.signed().to_path_buf(),
            self.encrypted().to_path_buf(),
        ]
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        log::trace!("Releasing scratch slots");
    }
}

fn create_slot(dir: &Path, prefix: &str) -> EncryptResult<NamedTempFile> {
    Builder::new()
        .prefix(prefix)
        .tempfile_in(dir)
        .map_err(|e| EncryptError::io(dir, format!("can't create scratch file: {e}")))
}
