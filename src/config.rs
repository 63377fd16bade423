use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Object-store endpoint, host:port without a scheme (e.g. "localhost:9000").
    pub store_endpoint: String,
    pub store_access_key: String,
    pub store_secret_key: String,
    /// Whether to talk to the object store over TLS.
    pub store_tls: bool,
    pub store_region: String,
    /// Bucket used when callers do not name one.
    pub store_bucket: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "AR sculptures API")]
pub struct Args {
    /// Host to bind to (overrides AR_SCULPTURES_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides AR_SCULPTURES_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides AR_SCULPTURES_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Object-store endpoint (overrides AR_SCULPTURES_STORE_ENDPOINT)
    #[arg(long)]
    pub store_endpoint: Option<String>,

    /// Object-store access key (overrides AR_SCULPTURES_STORE_ACCESS_KEY)
    #[arg(long)]
    pub store_access_key: Option<String>,

    /// Object-store secret key (overrides AR_SCULPTURES_STORE_SECRET_KEY)
    #[arg(long)]
    pub store_secret_key: Option<String>,

    /// Use TLS for the object store (overrides AR_SCULPTURES_STORE_TLS)
    #[arg(long)]
    pub store_tls: bool,

    /// Object-store region (overrides AR_SCULPTURES_STORE_REGION)
    #[arg(long)]
    pub store_region: Option<String>,

    /// Default bucket (overrides AR_SCULPTURES_STORE_BUCKET)
    #[arg(long)]
    pub store_bucket: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("AR_SCULPTURES_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("AR_SCULPTURES_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing AR_SCULPTURES_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading AR_SCULPTURES_PORT"),
        };
        let env_db = env::var("AR_SCULPTURES_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/sculptures.db".into());
        let env_endpoint =
            env::var("AR_SCULPTURES_STORE_ENDPOINT").unwrap_or_else(|_| "localhost:9000".into());
        let env_access =
            env::var("AR_SCULPTURES_STORE_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".into());
        let env_secret =
            env::var("AR_SCULPTURES_STORE_SECRET_KEY").unwrap_or_else(|_| "minioadmin".into());
        let env_tls = match env::var("AR_SCULPTURES_STORE_TLS") {
            Ok(value) => value
                .parse::<bool>()
                .with_context(|| format!("parsing AR_SCULPTURES_STORE_TLS value `{}`", value))?,
            Err(env::VarError::NotPresent) => false,
            Err(err) => return Err(err).context("reading AR_SCULPTURES_STORE_TLS"),
        };
        let env_region =
            env::var("AR_SCULPTURES_STORE_REGION").unwrap_or_else(|_| "us-east-1".into());
        let env_bucket =
            env::var("AR_SCULPTURES_STORE_BUCKET").unwrap_or_else(|_| "ar-content".into());

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            store_endpoint: args.store_endpoint.unwrap_or(env_endpoint),
            store_access_key: args.store_access_key.unwrap_or(env_access),
            store_secret_key: args.store_secret_key.unwrap_or(env_secret),
            store_tls: args.store_tls || env_tls,
            store_region: args.store_region.unwrap_or(env_region),
            store_bucket: args.store_bucket.unwrap_or(env_bucket),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full endpoint URL for the object-store client.
    pub fn store_endpoint_url(&self) -> String {
        let scheme = if self.store_tls { "https" } else { "http" };
        format!("{}://{}", scheme, self.store_endpoint)
    }
}
