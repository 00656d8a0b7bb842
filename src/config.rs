use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::PortalError;

/// Optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Master secret for the session cookie key (at least 64 bytes).
    /// A random key is generated per process when unset.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://portal.db".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

/// Base URLs of the two upstream services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub backend_url: Url,
    pub sentiment_analyzer_url: Url,
    pub connect_timeout_secs: u64,
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            backend_url: Url::parse("http://localhost:3030").expect("static url"),
            sentiment_analyzer_url: Url::parse("http://localhost:5050/").expect("static url"),
            connect_timeout_secs: 5,
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Layered load: defaults, `config.toml`, `PORTAL_*` env vars, then the
    /// bare `backend_url` / `sentiment_analyzer_url` variables.
    pub fn load() -> Result<Self, PortalError> {
        Self::figment(CONFIG_FILE).extract().map_err(Box::new).map_err(Into::into)
    }

    pub fn figment(file: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("PORTAL_").split("__"))
            .merge(
                Env::raw()
                    .only(&["backend_url", "sentiment_analyzer_url"])
                    .map(|key| format!("upstream.{}", key.as_str().to_ascii_lowercase()).into()),
            )
    }
}
