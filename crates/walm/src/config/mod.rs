use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
            "test" | "testing" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the facade.
///
/// Built once at process start and passed by reference to collaborators;
/// nothing here mutates shared global state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub kubernetes: KubernetesConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("WALM_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("WALM_WEBSERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("WALM_WEBSERVER_PORT")
            .unwrap_or_else(|_| "6180".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let workers = env::var("WALM_WORKERS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidWorkers)?;
        let request_timeout_secs = env::var("WALM_WEBSERVER_TIMEOUT")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://walm.db".to_string());

        let log_level = env::var("WALM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                workers,
                request_timeout_secs,
            },
            database: DatabaseConfig { url: database_url },
            kubernetes: KubernetesConfig::from_env()?,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on concurrent store connections.
    pub workers: u32,
    /// Pass-through webserver timeout; enforced outside this crate.
    pub request_timeout_secs: u64,
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

/// Connection settings for the relational store backing the facade.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Kubernetes cluster access parameters.
///
/// Pure pass-through for downstream collaborators; the facade itself never
/// opens a cluster connection. The only derived value is [`secure`].
///
/// [`secure`]: KubernetesConfig::secure
#[derive(Debug, Clone, Default)]
pub struct KubernetesConfig {
    pub host: String,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
    pub ca_cert: Option<String>,
    pub token_file: Option<String>,
    pub timeout_secs: u64,
    pub label_prefix: String,
    pub default_tenant: String,
    pub insecure: bool,
}

impl KubernetesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = env::var("WALM_KUBE_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        Ok(Self {
            host: env::var("WALM_KUBE_HOST").unwrap_or_default(),
            client_cert: env::var("WALM_KUBE_CLIENT_CERT").ok(),
            client_key: env::var("WALM_KUBE_CLIENT_KEY").ok(),
            ca_cert: env::var("WALM_KUBE_CA_CERT").ok(),
            token_file: env::var("WALM_KUBE_TOKEN_FILE").ok(),
            timeout_secs,
            label_prefix: env::var("WALM_KUBE_LABEL_PREFIX").unwrap_or_else(|_| "walm".to_string()),
            default_tenant: env::var("WALM_KUBE_DEFAULT_TENANT")
                .unwrap_or_else(|_| "default".to_string()),
            insecure: env::var("WALM_KUBE_INSECURE").is_ok(),
        })
    }

    /// True when the explicit insecure flag is unset and the API server host
    /// uses an https scheme.
    pub fn secure(&self) -> bool {
        !self.insecure && self.host.starts_with("https://")
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidWorkers,
    InvalidTimeout,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "WALM_WEBSERVER_PORT must be a valid u16"),
            ConfigError::InvalidWorkers => write!(f, "WALM_WORKERS must be a positive integer"),
            ConfigError::InvalidTimeout => {
                write!(f, "timeout values must be whole numbers of seconds")
            }
            ConfigError::InvalidHost { .. } => {
                write!(
                    f,
                    "WALM_WEBSERVER_ADDRESS must parse to an IPv4 or IPv6 address"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidWorkers
            | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
