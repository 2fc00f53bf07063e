//! PayPal Encrypted Payments Library
//!
//! Signs an ordered set of payment parameters with the merchant's
//! certificate, encrypts the signed PKCS#7 structure for PayPal's
//! certificate and wraps the result in `-----BEGIN PKCS7-----` markers,
//! ready to be posted as the `encrypted` form field.
//!
//! ```no_run
//! use paypal_encrypt::{EncryptWorkflow, ParameterSet};
//!
//! let workflow = EncryptWorkflow::from_cert_dir("cert")?;
//! let params = ParameterSet::new()
//!     .with("cmd", "_xclick")
//!     .with("amount", "10.00")
//!     .with("currency_code", "USD");
//! let envelope = workflow.encrypt(&params)?;
//! # Ok::<(), paypal_encrypt::EncryptError>(())
//! ```

pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use infra::{config, error};

pub use domain::{CanonicalBytes, CredentialSet, OutputEnvelope, ParameterSet};
pub use infra::config::{ContentCipher, EnvelopeOptions, PipelineConfiguration};
pub use infra::error::{EncryptError, EncryptResult, ErrorKind};
pub use pipelines::{EncryptWorkflow, PipelineStage};
