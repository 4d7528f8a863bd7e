//! Runtime settings for the wizard server.
//!
//! Every setting has a default and can be overridden with a `WIZARD_*`
//! environment variable. Values that do not parse are reported with a
//! warning and replaced by the default, so a typo never prevents start-up.

use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_REFERENCE_CSV: &str = "reference.csv";
pub const DEFAULT_SAMPLE_ROWS: usize = 10_000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Limit for JSON request bodies.
pub const JSON_PAYLOAD_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Root folder for uploaded files; each session gets a subfolder.
    pub upload_dir: PathBuf,
    /// CSV listing the known business usecases.
    pub reference_csv: PathBuf,
    /// Maximum number of data rows read per file for type inference.
    pub sample_rows: usize,
    /// Idle time after which an unfinished wizard session is cleared.
    pub session_ttl: Duration,
    pub open_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            reference_csv: PathBuf::from(DEFAULT_REFERENCE_CSV),
            sample_rows: DEFAULT_SAMPLE_ROWS,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            open_browser: true,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("WIZARD_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or("WIZARD_PORT", lookup("WIZARD_PORT"), defaults.port),
            upload_dir: lookup("WIZARD_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            reference_csv: lookup("WIZARD_REFERENCE_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_csv),
            sample_rows: parse_or(
                "WIZARD_SAMPLE_ROWS",
                lookup("WIZARD_SAMPLE_ROWS"),
                defaults.sample_rows,
            ),
            session_ttl: Duration::from_secs(parse_positive(
                "WIZARD_SESSION_TTL_SECS",
                lookup("WIZARD_SESSION_TTL_SECS"),
                DEFAULT_SESSION_TTL_SECS,
            )),
            open_browser: lookup("WIZARD_OPEN_BROWSER")
                .map(|v| parse_flag("WIZARD_OPEN_BROWSER", &v, defaults.open_browser))
                .unwrap_or(defaults.open_browser),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using {}", value, key, default);
            default
        }),
    }
}

fn parse_positive(key: &str, raw: Option<String>, default: u64) -> u64 {
    match parse_or(key, raw, default) {
        0 => {
            warn!("{} must be greater than zero, using {}", key, default);
            default
        }
        value => value,
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("WIZARD_HOST", "0.0.0.0"),
            ("WIZARD_PORT", "9000"),
            ("WIZARD_UPLOAD_DIR", "/tmp/wizard"),
            ("WIZARD_REFERENCE_CSV", "data/usecases.csv"),
            ("WIZARD_SAMPLE_ROWS", "50"),
            ("WIZARD_SESSION_TTL_SECS", "900"),
            ("WIZARD_OPEN_BROWSER", "off"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/wizard"));
        assert_eq!(config.reference_csv, PathBuf::from("data/usecases.csv"));
        assert_eq!(config.sample_rows, 50);
        assert_eq!(config.session_ttl, Duration::from_secs(900));
        assert!(!config.open_browser);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("WIZARD_PORT", "eighty"),
            ("WIZARD_SAMPLE_ROWS", "-1"),
            ("WIZARD_OPEN_BROWSER", "maybe"),
            ("WIZARD_HOST", "  "),
            ("WIZARD_SESSION_TTL_SECS", "0"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.sample_rows, DEFAULT_SAMPLE_ROWS);
        assert!(config.open_browser);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
    }
}
