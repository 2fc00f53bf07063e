//! Configuration management infrastructure.
//!
//! Holds every constant the pipeline depends on (credential file names,
//! scratch naming, content cipher and PKCS#7 flags) and persists them as TOML.

use crate::infra::error::{EncryptError, EncryptResult};
use openssl::pkcs7::Pkcs7Flags;
use openssl::symm::Cipher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Symmetric cipher used for the enveloped content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContentCipher {
    /// Triple-key DES in CBC mode, the algorithm PayPal expects
    #[default]
    #[serde(rename = "des-ede3-cbc")]
    DesEde3Cbc,
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
}

impl ContentCipher {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCipher::DesEde3Cbc => "des-ede3-cbc",
            ContentCipher::Aes128Cbc => "aes-128-cbc",
            ContentCipher::Aes256Cbc => "aes-256-cbc",
        }
    }

    #[must_use]
    pub fn cipher(&self) -> Cipher {
        match self {
            ContentCipher::DesEde3Cbc => Cipher::des_ede3_cbc(),
            ContentCipher::Aes128Cbc => Cipher::aes_128_cbc(),
            ContentCipher::Aes256Cbc => Cipher::aes_256_cbc(),
        }
    }
}

impl FromStr for ContentCipher {
    type Err = EncryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "des-ede3-cbc" | "3des" => Ok(ContentCipher::DesEde3Cbc),
            "aes-128-cbc" => Ok(ContentCipher::Aes128Cbc),
            "aes-256-cbc" => Ok(ContentCipher::Aes256Cbc),
            _ => Err(EncryptError::ConfigurationError(format!(
                "Unsupported content cipher: {s}"
            ))),
        }
    }
}

impl fmt::Display for ContentCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PKCS#7 flags applied to both the signing and the encryption step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pkcs7FlagSet {
    /// Treat the payload as binary, no line-ending translation
    pub binary: bool,
    /// Omit signed attributes
    pub no_attributes: bool,
    /// Leave the signer certificate out of the structure
    pub no_certificates: bool,
}

impl Default for Pkcs7FlagSet {
    fn default() -> Self {
        Self {
            binary: true,
            no_attributes: true,
            no_certificates: true,
        }
    }
}

impl Pkcs7FlagSet {
    #[must_use]
    pub fn to_openssl(&self) -> Pkcs7Flags {
        let mut flags = Pkcs7Flags::empty();
        if self.binary {
            flags |= Pkcs7Flags::BINARY;
        }
        if self.no_attributes {
            flags |= Pkcs7Flags::NOATTR;
        }
        if self.no_certificates {
            flags |= Pkcs7Flags::NOCERTS;
        }
        flags
    }
}

/// File names of the three credential files inside the certificate directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFiles {
    pub signer_key: String,
    pub signer_cert: String,
    pub recipient_cert: String,
}

impl Default for CredentialFiles {
    fn default() -> Self {
        Self {
            signer_key: "project-prvkey.pem".to_string(),
            signer_cert: "project-pubcert.pem".to_string(),
            recipient_cert: "paypal_cert_pem.pem".to_string(),
        }
    }
}

/// Persistent pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfiguration {
    /// Directory holding the credential files
    pub cert_dir: PathBuf,

    /// Prefix of the scratch files created per call
    pub temp_prefix: String,

    /// Directory for scratch files; system temp dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    /// Content encryption cipher
    pub cipher: ContentCipher,

    /// Credential file names, relative to `cert_dir`
    pub files: CredentialFiles,

    /// Flags for the signing and encryption primitives
    pub flags: Pkcs7FlagSet,
}

impl Default for PipelineConfiguration {
    fn default() -> Self {
        Self {
            cert_dir: PathBuf::from("cert"),
            temp_prefix: "PayPal_".to_string(),
            scratch_dir: None,
            cipher: ContentCipher::default(),
            files: CredentialFiles::default(),
            flags: Pkcs7FlagSet::default(),
        }
    }
}

impl PipelineConfiguration {
    /// Default configuration pointing at a given certificate directory
    pub fn with_cert_dir<P: AsRef<Path>>(cert_dir: P) -> Self {
        Self {
            cert_dir: cert_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Runtime options the pipeline holds for its lifetime
    #[must_use]
    pub fn envelope_options(&self) -> EnvelopeOptions {
        EnvelopeOptions {
            flags: self.flags.to_openssl(),
            cipher: self.cipher,
            temp_prefix: self.temp_prefix.clone(),
            scratch_dir: self.scratch_dir.clone(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> EncryptResult<()> {
        for (key, name) in [
            ("files.signer_key", &self.files.signer_key),
            ("files.signer_cert", &self.files.signer_cert),
            ("files.recipient_cert", &self.files.recipient_cert),
        ] {
            if name.trim().is_empty() {
                return Err(EncryptError::ConfigurationError(format!(
                    "{key} must not be empty"
                )));
            }
        }

        if self.temp_prefix.is_empty() {
            return Err(EncryptError::ConfigurationError(
                "temp_prefix must not be empty".to_string(),
            ));
        }

        if self.temp_prefix.contains(['/', '\\']) {
            return Err(EncryptError::ConfigurationError(format!(
                "temp_prefix must not contain path separators: {}",
                self.temp_prefix
            )));
        }

        Ok(())
    }
}

/// Immutable runtime options held by an [`EncryptWorkflow`](crate::EncryptWorkflow)
#[derive(Debug, Clone)]
pub struct EnvelopeOptions {
    pub flags: Pkcs7Flags,
    pub cipher: ContentCipher,
    pub temp_prefix: String,
    pub scratch_dir: Option<PathBuf>,
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        PipelineConfiguration::default().envelope_options()
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> EncryptResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> EncryptResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("paypal-encrypt").join("config.toml"))
        } else {
            Ok(PathBuf::from("paypal-encrypt.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> EncryptResult<PipelineConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = PipelineConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> EncryptResult<PipelineConfiguration> {
        log::debug!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            EncryptError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: PipelineConfiguration = toml::from_str(&content).map_err(|e| {
            EncryptError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &PipelineConfiguration) -> EncryptResult<()> {
        config.validate()?;

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    EncryptError::ConfigurationError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            EncryptError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            EncryptError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        log::info!("Configuration saved to: {}", self.config_path.display());
        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> EncryptResult<()> {
        let mut config = self.load_or_create_default()?;

        match key {
            "cert_dir" => config.cert_dir = PathBuf::from(value),
            "scratch_dir" => {
                config.scratch_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "temp_prefix" => config.temp_prefix = value.to_string(),
            "cipher" => config.cipher = value.parse()?,
            "files.signer_key" => config.files.signer_key = value.to_string(),
            "files.signer_cert" => config.files.signer_cert = value.to_string(),
            "files.recipient_cert" => config.files.recipient_cert = value.to_string(),
            "flags.binary" => config.flags.binary = parse_bool(value)?,
            "flags.no_attributes" => config.flags.no_attributes = parse_bool(value)?,
            "flags.no_certificates" => config.flags.no_certificates = parse_bool(value)?,
            _ => {
                return Err(EncryptError::ConfigurationError(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }

        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Export configuration as a portable format
    pub fn export_config(&self, format: ExportFormat) -> EncryptResult<String> {
        let config = self.load()?;

        match format {
            ExportFormat::Toml => toml::to_string_pretty(&config)
                .map_err(|e| EncryptError::ConfigurationError(format!("TOML export failed: {e}"))),
            ExportFormat::Json => serde_json::to_string_pretty(&config)
                .map_err(|e| EncryptError::ConfigurationError(format!("JSON export failed: {e}"))),
        }
    }
}

/// Configuration export formats
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Toml,
    Json,
}

fn parse_bool(value: &str) -> EncryptResult<bool> {
    value
        .parse()
        .map_err(|_| EncryptError::ConfigurationError(format!("Invalid boolean value: {value}")))
}
