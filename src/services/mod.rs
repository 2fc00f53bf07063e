//! Service layer module root.
//! One stateless service per pipeline component.

pub mod credentials;
pub mod encryptor;
pub mod mime;
pub mod normalizer;
pub mod signer;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod test_support;

pub use credentials::CredentialLoader;
pub use encryptor::Pkcs7Encryptor;
pub use mime::MimeBodyExtractor;
pub use normalizer::BinaryNormalizer;
pub use signer::Pkcs7Signer;
pub use wrapper::EnvelopeWrapper;
