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
    pub sessions: SessionConfig,
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

        let agent_code_min_len = env::var("APP_AGENT_CODE_MIN_LEN")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidAgentCodeMinLen)?;

        let manager_codes = parse_manager_codes(
            &env::var("APP_MANAGER_CODES").unwrap_or_else(|_| "000:Lera,111:Ilya".to_string()),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sessions: SessionConfig {
                agent_code_min_len,
                manager_codes,
            },
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

/// Portal access-code policy fed to the session collaborator.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub agent_code_min_len: usize,
    pub manager_codes: Vec<ManagerCode>,
}

/// One `code:name` pair from `APP_MANAGER_CODES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerCode {
    pub code: String,
    pub name: String,
}

fn parse_manager_codes(raw: &str) -> Result<Vec<ManagerCode>, ConfigError> {
    let mut codes = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (code, name) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidManagerCodes {
                value: raw.to_string(),
            })?;
        let (code, name) = (code.trim(), name.trim());
        if code.is_empty() || name.is_empty() {
            return Err(ConfigError::InvalidManagerCodes {
                value: raw.to_string(),
            });
        }

        codes.push(ManagerCode {
            code: code.to_string(),
            name: name.to_string(),
        });
    }

    if codes.is_empty() {
        return Err(ConfigError::InvalidManagerCodes {
            value: raw.to_string(),
        });
    }

    Ok(codes)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAgentCodeMinLen,
    InvalidManagerCodes { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAgentCodeMinLen => {
                write!(f, "APP_AGENT_CODE_MIN_LEN must be a non-negative integer")
            }
            ConfigError::InvalidManagerCodes { value } => {
                write!(
                    f,
                    "APP_MANAGER_CODES must be comma-separated code:name pairs, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAgentCodeMinLen
            | ConfigError::InvalidManagerCodes { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_AGENT_CODE_MIN_LEN");
        env::remove_var("APP_MANAGER_CODES");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.sessions.agent_code_min_len, 3);
        assert_eq!(config.sessions.manager_codes.len(), 2);
        assert_eq!(config.sessions.manager_codes[0].code, "000");
        assert_eq!(config.sessions.manager_codes[0].name, "Lera");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn manager_codes_are_parsed_from_pairs() {
        let codes = parse_manager_codes("000:Lera, 111:Ilya").expect("pairs parse");
        assert_eq!(
            codes,
            vec![
                ManagerCode {
                    code: "000".to_string(),
                    name: "Lera".to_string()
                },
                ManagerCode {
                    code: "111".to_string(),
                    name: "Ilya".to_string()
                },
            ]
        );
    }

    #[test]
    fn malformed_manager_codes_are_rejected() {
        assert!(parse_manager_codes("just-a-code").is_err());
        assert!(parse_manager_codes(":NoCode").is_err());
        assert!(parse_manager_codes("").is_err());
    }
}
