// File: src/config.rs
// Purpose: Configuration parsing from blog.toml with environment overrides

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub mail: MailConfig,
}

/// Signing settings
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Key used to sign sessions and reset tokens. Never hardcoded.
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Database connection
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_uri")]
    pub uri: String,
}

impl DatabaseConfig {
    /// The URI with any password in its userinfo masked, for display
    pub fn redacted_uri(&self) -> String {
        let Some((scheme, rest)) = self.uri.split_once("://") else {
            return self.uri.clone();
        };
        let authority_end = rest.find('/').unwrap_or(rest.len());
        let (authority, path) = rest.split_at(authority_end);
        let Some((userinfo, host)) = authority.rsplit_once('@') else {
            return self.uri.clone();
        };
        match userinfo.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:<redacted>@{host}{path}"),
            None => self.uri.clone(),
        }
    }
}

/// Outbound mail server
#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_server")]
    pub server: String,

    #[serde(default = "default_mail_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub use_tls: bool,

    /// Read from `EMAIL_USER` only
    #[serde(skip)]
    pub username: Option<String>,

    /// Read from `EMAIL_PASS` only
    #[serde(skip)]
    pub password: Option<String>,
}

// Default values
fn default_database_uri() -> String {
    "sqlite:data/site.sqlite".to_string()
}

fn default_mail_server() -> String {
    "smtp.googlemail.com".to_string()
}

fn default_mail_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_database_uri(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: default_mail_server(),
            port: default_mail_port(),
            use_tls: true,
            username: None,
            password: None,
        }
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &redact(&self.secret_key))
            .finish()
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &self.redacted_uri())
            .finish()
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

impl Config {
    /// Load configuration from a TOML file and apply process environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from default path (./blog.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("blog.toml")
    }

    /// Parse the TOML file only; a missing or empty file yields defaults
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Override settings from environment variables.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("SECRET_KEY") {
            self.app.secret_key = Some(key);
        }
        if let Some(uri) = lookup("DATABASE_URL") {
            self.database.uri = uri;
        }
        if let Some(server) = lookup("MAIL_SERVER") {
            self.mail.server = server;
        }
        if let Some(port) = lookup("MAIL_PORT") {
            self.mail.port = port
                .trim()
                .parse()
                .with_context(|| format!("MAIL_PORT is not a valid port: {:?}", port))?;
        }
        if let Some(tls) = lookup("MAIL_USE_TLS") {
            self.mail.use_tls = parse_flag(&tls)
                .with_context(|| format!("MAIL_USE_TLS is not a boolean: {:?}", tls))?;
        }
        self.mail.username = lookup("EMAIL_USER").or(self.mail.username.take());
        self.mail.password = lookup("EMAIL_PASS").or(self.mail.password.take());

        Ok(())
    }

    /// The signing key, or an error when none is configured
    pub fn secret_key(&self) -> Result<&str> {
        match self.app.secret_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => bail!("no secret key configured; set SECRET_KEY or app.secret_key"),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
