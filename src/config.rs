//! Server configuration parsed from environment variables.

use std::path::PathBuf;

use crate::diagram::Direction;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_ICON_DIR: &str = "./icons";
pub const DEFAULT_GRAPHVIZ_DOT: &str = "dot";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid {key}: '{value}' (expected true/false)")]
    InvalidBool { key: &'static str, value: String },
    #[error("invalid DIAGRAM_DIRECTION: {0}")]
    InvalidDirection(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub public_base_url: String,
    pub icon_dir: PathBuf,
    pub graphviz_dot: String,
    pub direction: Direction,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: default `0.0.0.0`
    /// - `PORT`: default 5001
    /// - `DEBUG`: debug logging, default true
    /// - `PUBLIC_BASE_URL`: default `http://localhost:{PORT}`
    /// - `ICON_DIR`: default `./icons`
    /// - `GRAPHVIZ_DOT`: default `dot`
    /// - `DIAGRAM_DIRECTION`: `TB` (default), `BT`, `LR` or `RL`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let debug = match var("DEBUG") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBool { key: "DEBUG", value: raw })?,
            None => true,
        };
        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();
        let icon_dir = PathBuf::from(var("ICON_DIR").unwrap_or_else(|| DEFAULT_ICON_DIR.to_owned()));
        let graphviz_dot = var("GRAPHVIZ_DOT").unwrap_or_else(|| DEFAULT_GRAPHVIZ_DOT.to_owned());
        let direction = match var("DIAGRAM_DIRECTION") {
            Some(raw) => raw.parse::<Direction>().map_err(ConfigError::InvalidDirection)?,
            None => Direction::default(),
        };

        Ok(Self { host, port, debug, public_base_url, icon_dir, graphviz_dot, direction })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
