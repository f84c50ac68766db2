use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::{default_name_tags, CheckerSettings, RecipientPolicy};
use crate::models::Thresholds;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub overpass: OverpassSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    pub mailgun: MailgunSettings,
    pub notify: NotifySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    pub push_secret: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            push_secret: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassSettings {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: default_timeout_secs(),
            radius_meters: default_radius_meters(),
        }
    }
}

fn default_overpass_url() -> String { "https://overpass-api.de/api/interpreter".to_string() }
fn default_timeout_secs() -> u32 { 15 }
fn default_radius_meters() -> f64 { 500.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_name_tags")]
    pub name_tags: Vec<String>,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            name_tags: default_name_tags(),
            match_threshold: default_match_threshold(),
            confirm_threshold: default_confirm_threshold(),
        }
    }
}

fn default_match_threshold() -> u8 { 60 }
fn default_confirm_threshold() -> u8 { 80 }

#[derive(Debug, Clone, Deserialize)]
pub struct MailgunSettings {
    #[serde(default = "default_mailgun_url")]
    pub base_url: String,
    pub domain: String,
    pub api_key: String,
    #[serde(default = "default_from")]
    pub from: String,
}

fn default_mailgun_url() -> String { "https://api.mailgun.net".to_string() }
fn default_from() -> String { "Checkin Checker <checkin-checker@openstreetmap.us>".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct NotifySettings {
    pub operator_email: String,
    #[serde(default = "default_test_user_id")]
    pub test_user_id: String,
}

fn default_test_user_id() -> String { "1".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with CHECKIN_)
    /// 4. Legacy `MAILGUN_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., CHECKIN__OVERPASS__TIMEOUT_SECS -> overpass.timeout_secs
            .add_source(environment())
            .build()?;

        settings = apply_legacy_env(settings)?;

        settings.try_deserialize()
    }

    /// Pipeline settings derived from this configuration
    pub fn checker_settings(&self) -> CheckerSettings {
        CheckerSettings {
            radius_meters: self.overpass.radius_meters,
            timeout_secs: self.overpass.timeout_secs,
            name_tags: self.matching.name_tags.clone(),
            thresholds: Thresholds {
                match_score: self.matching.match_threshold,
                confirm_score: self.matching.confirm_threshold,
            },
            recipients: RecipientPolicy {
                operator_email: self.notify.operator_email.clone(),
                test_user_id: self.notify.test_user_id.clone(),
            },
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CHECKIN")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("matching.name_tags")
        .try_parsing(true)
}

/// Apply the `MAILGUN_*` variables the service has always been deployed with
fn apply_legacy_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in [
        ("MAILGUN_API_KEY", "mailgun.api_key"),
        ("MAILGUN_API_DOMAIN", "mailgun.domain"),
        ("MAILGUN_URL_BASE", "mailgun.base_url"),
    ] {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
