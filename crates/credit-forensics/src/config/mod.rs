use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::forensics::jurisdiction::DebtInstrument;

/// Per-bureau account cap applied to reconciliation requests when unset.
pub const DEFAULT_MAX_ACCOUNTS: usize = 250;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Engine-facing knobs. Rule thresholds are not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Instrument used for statute-of-limitations countdowns unless a request overrides it.
    pub default_instrument: DebtInstrument,
    pub max_accounts_per_bureau: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_instrument: DebtInstrument::WrittenContract,
            max_accounts_per_bureau: DEFAULT_MAX_ACCOUNTS,
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_instrument = match env::var("FORENSICS_SOL_INSTRUMENT") {
            Ok(value) => DebtInstrument::parse(&value)
                .ok_or(ConfigError::InvalidInstrument { value })?,
            Err(_) => DebtInstrument::WrittenContract,
        };

        let max_accounts_per_bureau = match env::var("FORENSICS_MAX_ACCOUNTS") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidAccountLimit)?,
            Err(_) => DEFAULT_MAX_ACCOUNTS,
        };

        Ok(Self {
            default_instrument,
            max_accounts_per_bureau,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidInstrument { value: String },
    InvalidAccountLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidInstrument { value } => write!(
                f,
                "FORENSICS_SOL_INSTRUMENT must be one of written, oral, promissory, open (got {value:?})"
            ),
            ConfigError::InvalidAccountLimit => {
                write!(f, "FORENSICS_MAX_ACCOUNTS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidInstrument { .. }
            | ConfigError::InvalidAccountLimit => None,
        }
    }
}
