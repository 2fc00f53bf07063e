//! Pure domain types: parameters, credentials and the transport envelope.

pub mod constants;
pub mod credentials;
pub mod envelope;
pub mod params;

pub use credentials::CredentialSet;
pub use envelope::OutputEnvelope;
pub use params::{CanonicalBytes, ParameterSet};
