//! PayPal encrypted payments CLI
//!
//! Signs and encrypts payment parameters into the PKCS7 envelope PayPal
//! accepts in the `encrypted` field, and manages the configuration file.

use clap::{Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use paypal_encrypt::{
    config::{ConfigManager, ExportFormat},
    EncryptWorkflow, ParameterSet, PipelineConfiguration,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paypal-encrypt")]
#[command(about = "Sign and encrypt PayPal payment parameters")]
#[command(long_about = "
PayPal Encrypt - produce encrypted payment buttons

EXAMPLES:
    # Encrypt a simple buy-now button
    paypal-encrypt encrypt -p cmd=_xclick -p amount=10.00 -p currency_code=USD

    # Use a specific certificate directory
    paypal-encrypt encrypt --cert-dir ./cert -p cmd=_xclick -p amount=5

    # Create the configuration file
    paypal-encrypt config init

CERTIFICATE DIRECTORY:
    project-prvkey.pem     merchant private key
    project-pubcert.pem    merchant certificate (uploaded to PayPal)
    paypal_cert_pem.pem    PayPal public certificate

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign and encrypt payment parameters
    Encrypt {
        /// Payment parameter as NAME=VALUE, repeatable; order is preserved
        #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Configuration file (defaults to the user configuration if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Certificate directory (overrides config)
        #[arg(long, value_name = "DIR")]
        cert_dir: Option<PathBuf>,

        /// Directory for scratch files (overrides config)
        #[arg(long, value_name = "DIR")]
        scratch_dir: Option<PathBuf>,

        /// Write the envelope to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Initialize default configuration
    Init,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. cert_dir, cipher, flags.binary)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Export configuration
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone)]
enum ExportFormatArg {
    Toml,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Toml => ExportFormat::Toml,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Parameters for the encrypt command
struct EncryptCommandArgs {
    params: Vec<(String, String)>,
    config: Option<PathBuf>,
    cert_dir: Option<PathBuf>,
    scratch_dir: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt {
            params,
            config,
            cert_dir,
            scratch_dir,
            output,
        } => {
            let args = EncryptCommandArgs {
                params,
                config,
                cert_dir,
                scratch_dir,
                output,
            };
            handle_encrypt_command(args)?;
        }

        Commands::Config(config_cmd) => {
            handle_config_command(config_cmd)?;
        }
    }

    Ok(())
}

fn handle_encrypt_command(args: EncryptCommandArgs) -> Result<()> {
    let mut config = resolve_configuration(args.config)?;
    if let Some(cert_dir) = args.cert_dir {
        config.cert_dir = cert_dir;
    }
    if let Some(scratch_dir) = args.scratch_dir {
        config.scratch_dir = Some(scratch_dir);
    }

    let workflow = EncryptWorkflow::from_config(&config)
        .wrap_err_with(|| format!("Failed to load credentials from {}", config.cert_dir.display()))?;

    let params: ParameterSet = args.params.into_iter().collect();
    log::debug!("Encrypting {} parameters", params.len());

    let envelope = workflow.encrypt(&params)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &envelope)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", output_path.display()))?;
        log::info!("Envelope written to: {}", output_path.display());
    } else {
        print!("{envelope}");
    }

    Ok(())
}

fn resolve_configuration(explicit: Option<PathBuf>) -> Result<PipelineConfiguration> {
    if let Some(path) = explicit {
        return Ok(ConfigManager::with_path(path).load()?);
    }

    let manager = ConfigManager::new()?;
    if manager.config_path().exists() {
        Ok(manager.load()?)
    } else {
        Ok(PipelineConfiguration::default())
    }
}

fn handle_config_command(config_cmd: ConfigCommands) -> Result<()> {
    let config_manager = ConfigManager::new().into_diagnostic()?;

    match config_cmd {
        ConfigCommands::Show => match config_manager.load() {
            Ok(config) => {
                println!("Current Configuration:");
                println!("  Certificate directory: {}", config.cert_dir.display());
                println!("  Signer key file: {}", config.files.signer_key);
                println!("  Signer certificate file: {}", config.files.signer_cert);
                println!("  Recipient certificate file: {}", config.files.recipient_cert);
                println!("  Content cipher: {}", config.cipher);
                println!("  Scratch prefix: {}", config.temp_prefix);
                match &config.scratch_dir {
                    Some(dir) => println!("  Scratch directory: {}", dir.display()),
                    None => println!("  Scratch directory: (system temp)"),
                }
                println!(
                    "  Configuration file: {}",
                    config_manager.config_path().display()
                );
            }
            Err(_) => {
                println!("No configuration file found. Use 'config init' to create one.");
            }
        },

        ConfigCommands::Path => {
            println!("{}", config_manager.config_path().display());
        }

        ConfigCommands::Init => {
            let _config = config_manager.load_or_create_default().into_diagnostic()?;
            println!(
                "Configuration initialized: {}",
                config_manager.config_path().display()
            );
        }

        ConfigCommands::Set { key, value } => {
            config_manager
                .update_value(&key, &value)
                .into_diagnostic()?;
            println!("Configuration updated: {key} = {value}");
        }

        ConfigCommands::Export { format, output } => {
            let content = config_manager
                .export_config(format.into())
                .into_diagnostic()?;

            if let Some(output_path) = output {
                std::fs::write(&output_path, content).into_diagnostic()?;
                println!("Configuration exported to: {}", output_path.display());
            } else {
                println!("{content}");
            }
        }
    }

    Ok(())
}

/// Parse `NAME=VALUE`; the first `=` separates, the value may contain more.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
