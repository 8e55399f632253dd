//! Server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use derivative::Derivative;
use serde::{de, Deserialize};
use xdg::BaseDirectories;

use crate::access::{JwtDecodingKey, JwtEncodingKey};
use crate::oobe::run_oobe;

/// Application prefix in XDG base directories.
///
/// This will be concatenated into `$XDG_CONFIG_HOME/advisory`.
const XDG_PREFIX: &str = "advisory";

/// Environment variable storing the Base64-encoded TOML configuration.
///
/// This is useful for deploying to certain application platforms.
const ENV_CONFIG_BASE64: &str = "ADVISORY_SERVER_TOML_BASE64";

#[derive(Clone)]
pub struct SessionKeys {
    pub decoding: JwtDecodingKey,
    pub encoding: JwtEncodingKey,
}

/// Configuration for the Advisory Server.
#[derive(Clone, Derivative, Deserialize)]
#[derivative(Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Socket address to listen on.
    #[serde(default = "default_listen_address")]
    pub listen: SocketAddr,

    /// Allowed `Host` headers.
    ///
    /// This _must_ be configured for production use. If unconfigured or the
    /// list is empty, all `Host` headers are allowed.
    #[serde(rename = "allowed-hosts")]
    #[serde(default = "Vec::new")]
    pub allowed_hosts: Vec<String>,

    /// Database connection.
    pub database: DatabaseConfig,

    /// Browser sessions.
    pub session: SessionConfig,

    /// Initial data.
    #[serde(default = "Default::default")]
    pub seed: SeedConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,

    /// Whether to enable sending of periodic heartbeat queries.
    ///
    /// If enabled, a heartbeat query will be sent every minute.
    #[serde(default = "default_db_heartbeat")]
    pub heartbeat: bool,
}

/// Session cookie configuration.
#[derive(Clone, Derivative, Deserialize)]
#[derivative(Debug)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens.
    ///
    /// Set this to the base64 encoding of a randomly generated secret.
    #[serde(rename = "secret-base64")]
    #[serde(deserialize_with = "deserialize_base64_session_secret")]
    #[derivative(Debug = "ignore")]
    pub secret: SessionKeys,

    /// Name of the session cookie.
    #[serde(rename = "cookie-name")]
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// How long a session lasts after the last change.
    #[serde(with = "humantime_serde", default = "default_session_lifetime")]
    pub lifetime: Duration,

    /// Whether to only send the cookie over HTTPS.
    #[serde(rename = "secure-cookie")]
    #[serde(default = "default_secure_cookie")]
    pub secure_cookie: bool,
}

/// Seed data configuration.
#[derive(Derivative, Clone, Deserialize)]
#[derivative(Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Username of the initial admin account.
    #[serde(rename = "admin-username")]
    #[serde(default = "default_admin_username")]
    #[derivative(Default(value = "default_admin_username()"))]
    pub admin_username: String,

    /// Password of the initial admin account.
    ///
    /// If unset, no admin account is created.
    #[serde(rename = "admin-password")]
    #[derivative(Debug = "ignore")]
    pub admin_password: Option<String>,

    /// CSV file of advice entries.
    pub advice: Option<PathBuf>,

    /// CSV file of countries.
    pub countries: Option<PathBuf>,

    /// CSV file of country-advice links.
    pub links: Option<PathBuf>,
}

fn deserialize_base64_session_secret<'de, D>(deserializer: D) -> Result<SessionKeys, D::Error>
where
    D: de::Deserializer<'de>,
{
    use de::Error;

    let s = String::deserialize(deserializer)?;
    let decoding = JwtDecodingKey::from_base64_secret(&s).map_err(Error::custom)?;
    let encoding = JwtEncodingKey::from_base64_secret(&s).map_err(Error::custom)?;

    Ok(SessionKeys { decoding, encoding })
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], 8080))
}

fn default_db_heartbeat() -> bool {
    false
}

fn default_cookie_name() -> String {
    "advisory_session".to_string()
}

fn default_session_lifetime() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

fn default_secure_cookie() -> bool {
    false
}

fn default_admin_username() -> String {
    "admin".to_string()
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    tracing::info!("Using configurations: {:?}", path);

    let config = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {:?}", path))?;
    load_config_from_str(&config)
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    toml::from_str(s).map_err(|e| anyhow!("Invalid configuration file: {}", e))
}

/// Loads the configuration in the standard order.
///
/// An explicit path wins, then the environment variable, then the
/// XDG config path. If nothing exists and `allow_oobe` is set, a
/// simple configuration is generated first.
pub async fn load_config(config_path: Option<&Path>, allow_oobe: bool) -> Result<Config> {
    if let Some(config_path) = config_path {
        load_config_from_path(config_path)
    } else if let Ok(config_env) = env::var(ENV_CONFIG_BASE64) {
        tracing::info!("Using configurations from environment variable");

        let decoded = String::from_utf8(BASE64_STANDARD.decode(config_env.as_bytes())?)?;
        load_config_from_str(&decoded)
    } else {
        let config_path = get_xdg_config_path()?;

        if !config_path.exists() {
            if allow_oobe {
                run_oobe().await?;
            } else {
                return Err(anyhow!(
                    "No configuration found at {:?}. Pass one with -f.",
                    config_path
                ));
            }
        }

        load_config_from_path(&config_path)
    }
}

pub fn get_xdg_config_path() -> Result<PathBuf> {
    let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
    let config_path = xdg_dirs.place_config_file("server.toml")?;

    Ok(config_path)
}

pub fn get_xdg_data_path() -> Result<PathBuf> {
    let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
    let data_path = xdg_dirs.create_data_directory("")?;

    Ok(data_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = load_config_from_str(
            r#"
            [database]
            url = "sqlite::memory:"

            [session]
            secret-base64 = "c2VjcmV0"
            "#,
        )
        .unwrap();

        assert_eq!(8080, config.listen.port());
        assert!(config.allowed_hosts.is_empty());
        assert!(!config.database.heartbeat);
        assert_eq!("advisory_session", config.session.cookie_name);
        assert_eq!(Duration::from_secs(604800), config.session.lifetime);
        assert_eq!("admin", config.seed.admin_username);
        assert!(config.seed.admin_password.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"
            listen = "127.0.0.1:3000"
            allowed-hosts = ["advisory.example.com"]

            [database]
            url = "postgres://localhost/advisory"
            heartbeat = true

            [session]
            secret-base64 = "c2VjcmV0"
            cookie-name = "sid"
            lifetime = "2h"
            secure-cookie = true

            [seed]
            admin-username = "root"
            admin-password = "Adm1n!pass"
            advice = "data/advice.csv"
            countries = "data/countries.csv"
            links = "data/links.csv"
            "#,
        )
        .unwrap();

        assert_eq!("127.0.0.1:3000".parse::<SocketAddr>().unwrap(), config.listen);
        assert_eq!(vec!["advisory.example.com".to_string()], config.allowed_hosts);
        assert!(config.database.heartbeat);
        assert_eq!("sid", config.session.cookie_name);
        assert_eq!(Duration::from_secs(7200), config.session.lifetime);
        assert!(config.session.secure_cookie);
        assert_eq!("root", config.seed.admin_username);
        assert_eq!(Some("Adm1n!pass"), config.seed.admin_password.as_deref());
        assert_eq!(Some(PathBuf::from("data/links.csv")), config.seed.links);

        // secrets stay out of logs
        let debug = format!("{:?}", config);
        assert!(!debug.contains("Adm1n!pass"));
    }

    #[test]
    fn test_unknown_key() {
        let result = load_config_from_str(
            r#"
            storage = "local"

            [database]
            url = "sqlite::memory:"

            [session]
            secret-base64 = "c2VjcmV0"
            "#,
        );

        assert!(result.is_err());
    }
}
