//! For reading application configuration.
//!
//! Sources are layered, later ones win:
//! built-in defaults, an optional config file, and `GREET__`-prefixed
//! environment variables such as `GREET__APP__GREETING=Hola`.

use crate::core::greeting::greeting_service::DEFAULT_GREETING;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Greeting configuration.
    pub app: AppConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Greeting configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// The greeting used until someone changes it.
    pub greeting: String,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a request may take before it is answered with a timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum number of requests handled at the same time.
    pub concurrency_limit: usize,
}

impl ServerConfig {
    /// The address to bind to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_address, self.http_port)
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LogConfig {
    /// Filter directives, overridden by `RUST_LOG`.
    pub filter: String,
    /// Where to write json log files, if anywhere.
    pub directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                greeting: DEFAULT_GREETING.to_string(),
            },
            server: ServerConfig {
                http_address: "127.0.0.1".to_string(),
                http_port: 8080,
                request_timeout: Duration::from_secs(10),
                concurrency_limit: 500,
            },
            log: LogConfig {
                filter: "info,tower_http=debug,axum_greet=debug".to_string(),
                directory: None,
            },
        }
    }
}

/// Retrieve [`Config`] from the default configuration file.
pub fn load_config() -> Result<Config, config::ConfigError> {
    load_config_from("config")
}

/// Retrieve [`Config`] from the configuration file `name`.
///
/// The file is optional, any extension known to [`config`] is accepted.
#[tracing::instrument]
pub fn load_config_from(name: &str) -> Result<Config, config::ConfigError> {
    load_layered(name, environment())
}

/// The `GREET__`-prefixed environment source.
fn environment() -> config::Environment {
    config::Environment::with_prefix("greet").separator("__")
}

fn load_layered(name: &str, env: config::Environment) -> Result<Config, config::ConfigError> {
    let defaults = Config::default();
    let config = config::Config::builder()
        .set_default("app.greeting", defaults.app.greeting)?
        .set_default("server.http_address", defaults.server.http_address)?
        .set_default("server.http_port", i64::from(defaults.server.http_port))?
        .set_default("server.request_timeout", "10s")?
        .set_default(
            "server.concurrency_limit",
            defaults.server.concurrency_limit as i64,
        )?
        .set_default("log.filter", defaults.log.filter)?
        .add_source(config::File::with_name(name).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()?;
    Ok(config)
}
