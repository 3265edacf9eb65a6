use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{invalid_field_error, Error};

pub const DEFAULT_ORS_API_BASE: &str = "https://api.openrouteservice.org";

#[derive(Clone, Debug)]
pub struct Config {
    pub ors: OpenRouteServiceConfig,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
}

#[derive(Clone, Debug)]
pub struct OpenRouteServiceConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl OpenRouteServiceConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first if present.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let ors = OpenRouteServiceConfig {
            api_base: env::var("ORS_API_BASE").unwrap_or_else(|_| DEFAULT_ORS_API_BASE.into()),
            api_key: env::var("ORS_API_KEY")?.trim().to_string(),
            timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 10)?),
            connect_timeout: Duration::from_secs(parse_var("HTTP_CONNECT_TIMEOUT_SECS", 5)?),
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            ors,
            database_url,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: parse_var("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| invalid_field_error(name)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err.into()),
    }
}
