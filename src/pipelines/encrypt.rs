//! `EncryptWorkflow` orchestrates the sign, normalize, encrypt and wrap steps.
//!
//! Each call owns a [`ScratchSpace`]; every stage reads and writes its
//! slots, and the whole set is released when the call returns, whichever
//! stage it stopped in.

use crate::{
    domain::{credentials::CredentialSet, params::ParameterSet},
    infra::config::{EnvelopeOptions, PipelineConfiguration},
    pipelines::{scratch::ScratchSpace, stage::PipelineStage},
    services::{
        BinaryNormalizer, CredentialLoader, EnvelopeWrapper, Pkcs7Encryptor, Pkcs7Signer,
    },
    EncryptError, EncryptResult,
};
use std::fs;
use std::path::Path;

pub struct EncryptWorkflow {
    credentials: CredentialSet,
    options: EnvelopeOptions,
}

impl EncryptWorkflow {
    #[must_use]
    pub fn new(credentials: CredentialSet, options: EnvelopeOptions) -> Self {
        Self {
            credentials,
            options,
        }
    }

    /// Load credentials as described by `config`. No scratch storage is
    /// touched; a missing credential file makes construction fail.
    pub fn from_config(config: &PipelineConfiguration) -> EncryptResult<Self> {
        config.validate()?;
        let credentials = CredentialLoader::new().load(&config.cert_dir, &config.files)?;
        Ok(Self::new(credentials, config.envelope_options()))
    }

    /// Default file names and options, credentials read from `cert_dir`.
    pub fn from_cert_dir<P: AsRef<Path>>(cert_dir: P) -> EncryptResult<Self> {
        Self::from_config(&PipelineConfiguration::with_cert_dir(cert_dir))
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    #[must_use]
    pub fn options(&self) -> &EnvelopeOptions {
        &self.options
    }

    /// Sign and encrypt `params`, returning the PKCS7 transport envelope.
    ///
    /// Atomic from the caller's view: either the complete envelope or an
    /// error, with all scratch files already removed in both cases.
    pub fn encrypt(&self, params: &ParameterSet) -> EncryptResult<String> {
        let mut stage = PipelineStage::Idle;
        let result = self.run(params, &mut stage);

        match &result {
            Ok(envelope) => {
                log::info!("Produced {} byte PKCS7 envelope", envelope.len());
            }
            Err(e) => {
                stage = stage.fail(e.kind());
                log::warn!("Encryption pipeline {stage}: {e}");
            }
        }
        result
    }

    fn run(&self, params: &ParameterSet, stage: &mut PipelineStage) -> EncryptResult<String> {
        let scratch = ScratchSpace::acquire(&self.options)?;

        advance(stage);
        let canonical = params.to_canonical_bytes();
        fs::write(scratch.data(), canonical.as_bytes())
            .map_err(|e| EncryptError::io(scratch.data(), e))?;

        advance(stage);
        let signer = Pkcs7Signer::from_pem(
            self.credentials.signer_cert(),
            self.credentials.signer_key(),
            self.options.flags,
        )?;
        signer.sign_file(scratch.data(), scratch.signed())?;

        advance(stage);
        BinaryNormalizer::new().normalize_file(scratch.signed())?;

        advance(stage);
        let encryptor = Pkcs7Encryptor::from_pem(
            self.credentials.recipient_cert(),
            self.options.cipher,
            self.options.flags,
        )?;
        encryptor.encrypt_file(scratch.signed(), scratch.encrypted())?;

        advance(stage);
        let envelope = EnvelopeWrapper::new().wrap_file(scratch.encrypted())?;

        advance(stage);
        Ok(envelope.into_string())
    }
}

fn advance(stage: &mut PipelineStage) {
    *stage = stage.next();
    log::debug!("Pipeline stage: {stage}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::self_signed;
    use tempfile::TempDir;

    fn workflow_in(scratch: &Path) -> EncryptWorkflow {
        let (signer_cert, signer_key) = self_signed("Merchant");
        let (recipient_cert, _) = self_signed("PayPal");
        let credentials = CredentialSet::new(signer_key, signer_cert, recipient_cert).unwrap();
        EncryptWorkflow::new(
            credentials,
            EnvelopeOptions {
                scratch_dir: Some(scratch.to_path_buf()),
                ..EnvelopeOptions::default()
            },
        )
    }

    #[test]
    fn test_workflow_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EncryptWorkflow>();
    }

    #[test]
    fn test_envelope_shape_and_cleanup() {
        let scratch = TempDir::new().unwrap();
        let workflow = workflow_in(scratch.path());

        let params = ParameterSet::new().with("cmd", "_xclick").with("amount", "5");
        let envelope = workflow.encrypt(&params).unwrap();

        assert!(envelope.starts_with("-----BEGIN PKCS7-----\n"));
        assert!(envelope.ends_with("-----END PKCS7-----\n"));
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_bad_recipient_is_encryption_failure_and_cleans_up() {
        let scratch = TempDir::new().unwrap();
        let (signer_cert, signer_key) = self_signed("Merchant");
        let credentials =
            CredentialSet::new(signer_key, signer_cert, b"not a certificate".to_vec()).unwrap();
        let workflow = EncryptWorkflow::new(
            credentials,
            EnvelopeOptions {
                scratch_dir: Some(scratch.path().to_path_buf()),
                ..EnvelopeOptions::default()
            },
        );

        let err = workflow
            .encrypt(&ParameterSet::new().with("a", "1"))
            .unwrap_err();
        assert!(matches!(err, EncryptError::EncryptionFailed(_)));
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }
}
