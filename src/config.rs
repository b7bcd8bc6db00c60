use crate::routes::routes::RouteOptions;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env::{self, VarError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Normalized: empty, or `/segment[/segment]` with no trailing slash.
    pub base_path: String,
    pub enable_testing_routes: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory video catalogue API")]
pub struct Args {
    /// Host to bind to (overrides VIDEO_STORE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides VIDEO_STORE_PORT / PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Path prefix for the video API, e.g. `/api` (overrides VIDEO_STORE_BASE_PATH)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Expose `DELETE /testing/all-data`; never enable in production
    /// (also VIDEO_STORE_ENABLE_TESTING_ROUTES)
    #[arg(long)]
    pub enable_testing_routes: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |key| env::var(key))
    }

    /// Merge parsed args over values read through `lookup`. CLI wins.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self> {
        let read = |key: &str| -> Result<Option<String>> {
            match lookup(key) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(err) => Err(err).with_context(|| format!("reading {}", key)),
            }
        };

        // --- Environment fallback ---
        let env_host = read("VIDEO_STORE_HOST")?.unwrap_or_else(|| DEFAULT_HOST.into());
        let env_port = match read("VIDEO_STORE_PORT")? {
            Some(value) => Some(("VIDEO_STORE_PORT", value)),
            None => read("PORT")?.map(|value| ("PORT", value)),
        };
        let env_port = match env_port {
            Some((key, value)) => value
                .parse::<u16>()
                .with_context(|| format!("parsing {} value `{}`", key, value))?,
            None => DEFAULT_PORT,
        };
        let env_base = read("VIDEO_STORE_BASE_PATH")?.unwrap_or_default();
        let env_testing = match read("VIDEO_STORE_ENABLE_TESTING_ROUTES")? {
            Some(value) => {
                parse_flag(&value).context("parsing VIDEO_STORE_ENABLE_TESTING_ROUTES")?
            }
            None => false,
        };

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            base_path: normalize_base_path(&args.base_path.unwrap_or(env_base)),
            enable_testing_routes: args.enable_testing_routes || env_testing,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn route_options(&self) -> RouteOptions {
        RouteOptions {
            base_path: self.base_path.clone(),
            enable_testing_routes: self.enable_testing_routes,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got `{}`", other),
    }
}

/// `""`, `"/"`, `"api"`, `"/api/"` -> `""`, `""`, `"/api"`, `"/api"`.
pub fn normalize_base_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}
