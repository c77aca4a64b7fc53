//! Configuration loading for the site.
//!
//! Loads configuration from a TOML file and/or environment variables using
//! figment.
//!
//! # Configuration Sources (in order of priority, lowest to highest)
//!
//! 1. Default values (from `#[serde(default)]` attributes)
//! 2. TOML config file (if present)
//! 3. Environment variables (prefix: `BODUR_`, nested with `__`)
//!
//! # Environment Variable Naming
//!
//! - `BODUR_HTTP__LISTEN_ADDR` → `http.listen_addr`
//! - `BODUR_DATABASE__PATH` → `database.path`
//! - `BODUR_UPLOADS__IMAGE_DIR` → `uploads.image_dir`
//! - `BODUR_SESSION__TIMEOUT_SECS` → `session.timeout_secs`

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the site.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Static asset and upload directories
    #[serde(default)]
    pub uploads: UploadsConfig,

    /// Admin session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Seed credentials for the default admin user
    #[serde(default)]
    pub admin: AdminConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Address to listen on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// SQLite database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("database/site.db")
}

/// Static asset directories.
///
/// `static_dir` is served under `/static`; uploaded images are written to
/// `image_dir`, which the deployment is expected to create (the upload path
/// does not create it).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            image_dir: default_image_dir(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("static/img")
}

/// Admin session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// How long a login session stays valid, in seconds.
    #[serde(default = "default_session_timeout")]
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_session_timeout(),
        }
    }
}

fn default_session_timeout() -> u64 {
    86_400
}

/// Credentials used to seed the default admin user on first start.
///
/// Only consulted when no user with this username exists yet; changing the
/// password here after the first start has no effect (use
/// `bodur-site user set-password` instead).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    ///
    /// Configuration sources are merged in order (later sources override earlier):
    /// 1. TOML config file (if it exists)
    /// 2. Environment variables (prefix: `BODUR_`, nested with `__`)
    pub fn load(path: &Path) -> Result<Self> {
        let mut figment = Figment::new();

        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("BODUR_").split("__"));

        let config: Config = figment.extract().with_context(|| {
            format!(
                "Failed to load config from {} and environment",
                path.display()
            )
        })?;

        Ok(config)
    }

    /// Default config file path, relative to the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// Create a default configuration template
pub fn default_config_template() -> String {
    r#"# Bodur Oto Kurtarma site configuration

[http]
listen_addr = "127.0.0.1:8080"

[database]
# SQLite file; the parent directory is created on startup if missing.
path = "database/site.db"

[uploads]
# Served under /static
static_dir = "static"
# Uploaded images are written here. Must exist before uploading.
image_dir = "static/img"

[session]
# Admin login session lifetime in seconds (default: one day).
timeout_secs = 86400

# Credentials for the admin user seeded on first start. Only used when no
# such user exists yet; afterwards use `bodur-site user set-password`.
[admin]
username = "admin"
password = "admin123"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Toml as TomlProvider;

    /// Helper to parse TOML config strings in tests
    fn parse_config(toml_str: &str) -> Config {
        Figment::new()
            .merge(TomlProvider::string(toml_str))
            .extract()
            .expect("Failed to parse test config")
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("");
        assert_eq!(config.http.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.database.path, PathBuf::from("database/site.db"));
        assert_eq!(config.uploads.image_dir, PathBuf::from("static/img"));
        assert_eq!(config.session.timeout_secs, 86_400);
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_parse_config() {
        let config_str = r#"
[http]
listen_addr = "0.0.0.0:3000"

[database]
path = "/var/lib/bodur/site.db"

[session]
timeout_secs = 600

[admin]
username = "owner"
password = "s3cret"
"#;

        let config = parse_config(config_str);
        assert_eq!(config.http.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.database.path, PathBuf::from("/var/lib/bodur/site.db"));
        assert_eq!(config.session.timeout_secs, 600);
        assert_eq!(config.admin.username, "owner");
        assert_eq!(config.admin.password, "s3cret");
    }

    #[test]
    fn test_default_template_parses() {
        let config = parse_config(&default_config_template());
        assert_eq!(config.uploads.static_dir, PathBuf::from("static"));
    }
}
