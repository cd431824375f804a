use crate::roster::{BudgetConfig, ImportError, ScoringConfig, TierThresholdTable};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub scholarships: ScholarshipSettings,
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
        let log_format = LogFormat::from_str(&env::var("APP_LOG_FORMAT").unwrap_or_default());

        let scholarships = ScholarshipSettings {
            max_scholarship: amount_var("ROSTER_MAX_SCHOLARSHIP", 10_000.0)?,
            men_budget: amount_var("ROSTER_MEN_BUDGET", 120_000.0)?,
            women_budget: amount_var("ROSTER_WOMEN_BUDGET", 120_000.0)?,
            thresholds_csv: env::var("ROSTER_THRESHOLDS_CSV")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            scholarships,
        })
    }
}

fn amount_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidAmount { name }),
        Err(_) => Ok(default),
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
    pub log_format: LogFormat,
}

/// Output layout for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Scholarship pools and reference data locations.
#[derive(Debug, Clone)]
pub struct ScholarshipSettings {
    pub max_scholarship: f64,
    pub men_budget: f64,
    pub women_budget: f64,
    pub thresholds_csv: Option<PathBuf>,
}

impl ScholarshipSettings {
    /// Build the scoring reference data, reading a threshold override file when configured.
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        let budgets = BudgetConfig {
            men: self.men_budget,
            women: self.women_budget,
        };
        let mut config = ScoringConfig::standard(budgets);
        config.max_scholarship = self.max_scholarship;

        if let Some(path) = &self.thresholds_csv {
            config.thresholds = TierThresholdTable::from_csv_path(path).map_err(|source| {
                ConfigError::Thresholds {
                    path: path.clone(),
                    source,
                }
            })?;
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidAmount {
        name: &'static str,
    },
    Thresholds {
        path: PathBuf,
        source: ImportError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAmount { name } => {
                write!(f, "{name} must be a non-negative amount")
            }
            ConfigError::Thresholds { path, .. } => {
                write!(f, "unable to load thresholds from {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidAmount { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Thresholds { source, .. } => Some(source),
        }
    }
}
