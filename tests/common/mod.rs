//! Shared helpers for integration tests: self-signed identities, credential
//! directories and an envelope opener that decrypts and verifies.

#![allow(dead_code)]

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::stack::Stack;
use openssl::x509::store::X509StoreBuilder;
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use paypal_encrypt::PipelineConfiguration;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::TempDir;

/// PEM certificate and private key of a test party.
pub struct Identity {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

pub fn merchant() -> &'static Identity {
    static MERCHANT: OnceLock<Identity> = OnceLock::new();
    MERCHANT.get_or_init(|| create_identity("Test Merchant", 1))
}

pub fn paypal() -> &'static Identity {
    static PAYPAL: OnceLock<Identity> = OnceLock::new();
    PAYPAL.get_or_init(|| create_identity("Test PayPal", 2))
}

/// Create a self-signed RSA identity for tests.
///
/// Same builder as the crate's unit-test `self_signed`; integration tests
/// cannot reach `#[cfg(test)]` items, and the merchant and PayPal
/// identities need distinct serials.
pub fn create_identity(common_name: &str, serial: u32) -> Identity {
    let rsa = Rsa::generate(2048).expect("Should generate RSA key");
    let pkey = PKey::from_rsa(rsa).expect("Should create PKey");

    let mut name = X509NameBuilder::new().expect("Should create name builder");
    name.append_entry_by_text("CN", common_name)
        .expect("Should add CN");
    let name = name.build();

    let mut builder = X509Builder::new().expect("Should create X509 builder");
    builder.set_version(2).expect("Should set version");
    let serial = BigNum::from_u32(serial)
        .expect("Should create serial")
        .to_asn1_integer()
        .expect("Should convert serial");
    builder
        .set_serial_number(&serial)
        .expect("Should set serial");
    builder.set_subject_name(&name).expect("Should set subject");
    builder.set_issuer_name(&name).expect("Should set issuer");
    let not_before = Asn1Time::days_from_now(0).expect("Should create not_before");
    let not_after = Asn1Time::days_from_now(30).expect("Should create not_after");
    builder
        .set_not_before(&not_before)
        .expect("Should set not_before");
    builder
        .set_not_after(&not_after)
        .expect("Should set not_after");
    builder.set_pubkey(&pkey).expect("Should set pubkey");
    builder
        .sign(&pkey, MessageDigest::sha256())
        .expect("Should sign");

    Identity {
        cert_pem: builder.build().to_pem().expect("Should convert to PEM"),
        key_pem: pkey
            .private_key_to_pem_pkcs8()
            .expect("Should export private key"),
    }
}

/// Write the three credential files under their default names.
pub fn write_credentials(dir: &Path, signer: &Identity, recipient: &Identity) {
    let files = PipelineConfiguration::default().files;
    fs::write(dir.join(files.signer_key), &signer.key_pem).unwrap();
    fs::write(dir.join(files.signer_cert), &signer.cert_pem).unwrap();
    fs::write(dir.join(files.recipient_cert), &recipient.cert_pem).unwrap();
}

/// Certificate directory plus an isolated scratch directory.
pub struct Fixture {
    pub cert_dir: TempDir,
    pub scratch_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let cert_dir = TempDir::new().unwrap();
        write_credentials(cert_dir.path(), merchant(), paypal());
        Self {
            cert_dir,
            scratch_dir: TempDir::new().unwrap(),
        }
    }

    pub fn config(&self) -> PipelineConfiguration {
        let mut config = PipelineConfiguration::with_cert_dir(self.cert_dir.path());
        config.scratch_dir = Some(self.scratch_dir.path().to_path_buf());
        config
    }

    pub fn scratch_entries(&self) -> usize {
        fs::read_dir(self.scratch_dir.path()).unwrap().count()
    }
}

/// Parse the envelope as PEM, decrypt with the recipient key and verify
/// with the signer certificate. Returns the signed content.
pub fn open_envelope(envelope: &str, recipient: &Identity, signer: &Identity) -> Vec<u8> {
    assert!(envelope.starts_with("-----BEGIN PKCS7-----\n"));
    assert!(envelope.ends_with("-----END PKCS7-----\n"));

    let enveloped = Pkcs7::from_pem(envelope.as_bytes()).expect("Envelope should parse as PEM");
    let recipient_cert = X509::from_pem(&recipient.cert_pem).unwrap();
    let recipient_key = PKey::private_key_from_pem(&recipient.key_pem).unwrap();
    let signed_der = enveloped
        .decrypt(&recipient_key, &recipient_cert, Pkcs7Flags::empty())
        .expect("Should decrypt");

    let signed = Pkcs7::from_der(&signed_der).expect("Decrypted content should be DER PKCS7");
    let mut certs = Stack::<X509>::new().unwrap();
    certs.push(X509::from_pem(&signer.cert_pem).unwrap()).unwrap();
    let store = X509StoreBuilder::new().unwrap().build();

    let mut content = Vec::new();
    signed
        .verify(&certs, &store, None, Some(&mut content), Pkcs7Flags::NOVERIFY)
        .expect("Signature should verify");
    content
}
