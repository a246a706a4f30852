//! bls-keytool: BLS key management from the command line.
//!
//! Generates and lists password-protected keys, signs and verifies
//! messages, and encodes secret keys as block header extra-data.
//!
//! Byte arguments are hex, with or without a `0x` prefix.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bls_keystore::{KeyStore, KeystoreConfig};
use eth_bls::bytesutil::{decode_hex, encode_hex};
use eth_bls::extra_data::{encode_secret_key, secret_key_from_extra_data};
use eth_bls::{PublicKey, SecretKey, Signature};

/// bls-keytool: BLS12-381 keys, signatures and header extra-data
#[derive(Parser)]
#[command(name = "bls-keytool")]
#[command(about = "Manage BLS keys and signatures")]
struct Args {
    /// Key directory (overrides BLS_KEYSTORE_DIR)
    #[arg(long, global = true)]
    keystore: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

// No `Debug`: several variants carry passwords or secret keys.
#[derive(Subcommand)]
enum Command {
    /// Generate a new key in the keystore
    Generate {
        /// Key file password
        #[arg(long, env = "BLS_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Import a secret key into the keystore
    Import {
        /// Secret key (32 bytes)
        #[arg(long)]
        secret: String,

        /// Key file password
        #[arg(long, env = "BLS_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List public keys held in the keystore
    List,

    /// Delete a key from the keystore
    Delete {
        /// Public key (48 bytes)
        #[arg(long)]
        pubkey: String,

        /// Key file password
        #[arg(long, env = "BLS_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print the public key of a secret key
    Pubkey {
        /// Secret key (32 bytes)
        #[arg(long)]
        secret: String,
    },

    /// Sign a message with a raw secret key or a stored key
    Sign {
        /// Secret key (32 bytes)
        #[arg(long, conflicts_with = "pubkey")]
        secret: Option<String>,

        /// Public key of a stored key
        #[arg(long, requires = "password")]
        pubkey: Option<String>,

        /// Key file password for --pubkey
        #[arg(long, env = "BLS_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Message bytes
        #[arg(long)]
        message: String,
    },

    /// Verify a signature
    Verify {
        /// Public key (48 bytes)
        #[arg(long)]
        pubkey: String,

        /// Message bytes
        #[arg(long)]
        message: String,

        /// Signature (96 bytes)
        #[arg(long)]
        signature: String,
    },

    /// Header extra-data conversions
    #[command(name = "extra-data", subcommand)]
    ExtraData(ExtraDataCommand),
}

#[derive(Subcommand)]
enum ExtraDataCommand {
    /// Encode a secret key as header extra-data
    Encode {
        /// Secret key (32 bytes)
        #[arg(long)]
        secret: String,
    },

    /// Print the sealer's public key for the secret key in header extra-data
    Decode {
        /// Extra-data bytes
        #[arg(long)]
        extra: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(command = args.command.name(), "Running command");
    run(args)
}

impl Command {
    /// Subcommand name, safe to log.
    fn name(&self) -> &'static str {
        match self {
            Command::Generate { .. } => "generate",
            Command::Import { .. } => "import",
            Command::List => "list",
            Command::Delete { .. } => "delete",
            Command::Pubkey { .. } => "pubkey",
            Command::Sign { .. } => "sign",
            Command::Verify { .. } => "verify",
            Command::ExtraData(ExtraDataCommand::Encode { .. }) => "extra-data encode",
            Command::ExtraData(ExtraDataCommand::Decode { .. }) => "extra-data decode",
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate { password } => {
            let store = open_store(args.keystore)?;
            let public = store.new_key(&password)?;
            info!(keys_dir = %store.config().keys_dir.display(), "Generated key");
            println!("{public}");
        }

        Command::Import { secret, password } => {
            let store = open_store(args.keystore)?;
            let secret = parse_secret(&secret)?;
            let public = store.import_key(&secret, &password)?;
            println!("{public}");
        }

        Command::List => {
            let store = open_store(args.keystore)?;
            for public in store.accounts()? {
                println!("{public}");
            }
        }

        Command::Delete { pubkey, password } => {
            let store = open_store(args.keystore)?;
            let public = parse_public(&pubkey)?;
            store.delete_key(&public, &password)?;
            println!("Deleted {public}");
        }

        Command::Pubkey { secret } => {
            println!("{}", parse_secret(&secret)?.public_key());
        }

        Command::Sign {
            secret,
            pubkey,
            password,
            message,
        } => {
            let message = decode_hex(&message).context("invalid --message")?;
            let signature = match (secret, pubkey, password) {
                (Some(secret), _, _) => parse_secret(&secret)?.sign(&message),
                (None, Some(pubkey), Some(password)) => {
                    let store = open_store(args.keystore)?;
                    store.sign_with_password(&parse_public(&pubkey)?, &password, &message)?
                }
                _ => bail!("either --secret or --pubkey with --password is required"),
            };
            println!("{signature}");
        }

        Command::Verify {
            pubkey,
            message,
            signature,
        } => {
            let public = parse_public(&pubkey)?;
            let message = decode_hex(&message).context("invalid --message")?;
            let signature = Signature::from_hex(&signature).context("invalid --signature")?;

            if !signature.verify(&public, &message) {
                bail!("signature does not verify");
            }
            println!("OK");
        }

        Command::ExtraData(ExtraDataCommand::Encode { secret }) => {
            let extra = encode_secret_key(&parse_secret(&secret)?)?;
            println!("{}", encode_hex(&extra));
        }

        Command::ExtraData(ExtraDataCommand::Decode { extra }) => {
            let extra = decode_hex(&extra).context("invalid --extra")?;
            let secret = secret_key_from_extra_data(&extra)?;
            println!("{}", secret.public_key());
        }
    }

    Ok(())
}

fn open_store(keys_dir: Option<PathBuf>) -> Result<KeyStore> {
    let mut config = KeystoreConfig::from_env();
    if let Some(dir) = keys_dir {
        config = config.with_keys_dir(dir);
    }
    KeyStore::open(config).context("failed to open keystore")
}

fn parse_secret(input: &str) -> Result<SecretKey> {
    SecretKey::from_hex(input).context("invalid --secret")
}

fn parse_public(input: &str) -> Result<PublicKey> {
    PublicKey::from_hex(input).context("invalid --pubkey")
}
