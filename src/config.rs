use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_VAR: &str = "ORDER_DESK_API_URL";
pub const PREFS_PATH_VAR: &str = "ORDER_DESK_PREFS_PATH";
pub const TIMEOUT_VAR: &str = "ORDER_DESK_TIMEOUT_SECS";

pub const DEFAULT_PREFS_PATH: &str = "order-desk-prefs.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub prefs_path: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Loads `.env` if there is one, then reads the process environment.
    pub fn init() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("Missing environment variable: {API_URL_VAR}"))?;

        let prefs_path: PathBuf = lookup(PREFS_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PREFS_PATH.to_string())
            .into();

        let timeout_secs = lookup(TIMEOUT_VAR)
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?;
        if timeout_secs == 0 {
            return Err(anyhow!("{TIMEOUT_VAR} must be greater than zero"));
        }

        Ok(Self {
            api_url: api_url.trim().to_string(),
            prefs_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(API_URL_VAR, "http://localhost:3000/api")])).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.prefs_path, PathBuf::from(DEFAULT_PREFS_PATH));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_url_and_bad_timeout() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(API_URL_VAR));

        let err = Config::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));

        assert!(Config::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost"),
            (TIMEOUT_VAR, "0"),
        ]))
        .is_err());
    }
}
