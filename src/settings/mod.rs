//! # Settings
//!
//! Administrator preferences kept in the preference store next to the
//! session. Values are stored as strings and parsed leniently on load: a key
//! that is missing or unreadable falls back to its default.

use crate::store::{PreferenceClient, StoreError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const USER_NAME_KEY: &str = "user_name";
pub const DARK_MODE_KEY: &str = "dark_mode";
pub const LANGUAGE_KEY: &str = "language";
pub const NOTIFICATION_VOLUME_KEY: &str = "notification_volume";
pub const LAST_ACCESS_KEY: &str = "last_access";
pub const TOTAL_USAGE_KEY: &str = "total_usage_secs";

pub const LANGUAGES: [&str; 7] = [
    "Español",
    "English",
    "Portugues",
    "Français",
    "Chinese",
    "Deutsch",
    "Italiano",
];

pub const DEFAULT_VOLUME: u8 = 50;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub user_name: String,
    pub dark_mode: bool,
    language: usize,
    volume: u8,
    pub last_access: Option<DateTime<Utc>>,
    pub total_usage: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            dark_mode: false,
            language: 0,
            volume: DEFAULT_VOLUME,
            last_access: None,
            total_usage: Duration::ZERO,
        }
    }
}

impl Settings {
    #[instrument(skip(prefs))]
    pub async fn load(prefs: &PreferenceClient) -> Result<Self, StoreError> {
        let stored = prefs.snapshot().await?;
        let mut settings = Settings::default();

        if let Some(name) = stored.get(USER_NAME_KEY) {
            settings.user_name = name.clone();
        }
        if let Some(dark) = parsed::<bool>(stored.get(DARK_MODE_KEY), DARK_MODE_KEY) {
            settings.dark_mode = dark;
        }
        if let Some(language) = parsed::<usize>(stored.get(LANGUAGE_KEY), LANGUAGE_KEY) {
            settings.set_language(language);
        }
        if let Some(volume) = parsed::<u32>(stored.get(NOTIFICATION_VOLUME_KEY), NOTIFICATION_VOLUME_KEY) {
            settings.set_volume(volume);
        }
        settings.last_access = stored
            .get(LAST_ACCESS_KEY)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc));
        if let Some(secs) = parsed::<u64>(stored.get(TOTAL_USAGE_KEY), TOTAL_USAGE_KEY) {
            settings.total_usage = Duration::from_secs(secs);
        }

        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Writes every key and stamps `last_access` with the current time.
    #[instrument(skip_all)]
    pub async fn save(&mut self, prefs: &PreferenceClient) -> Result<(), StoreError> {
        self.last_access = Some(Utc::now());
        prefs.set_many(self.entries()).await?;
        info!("Settings saved");
        Ok(())
    }

    /// Adds a session's duration to the running total and persists it.
    #[instrument(skip(self, prefs))]
    pub async fn record_usage(
        &mut self,
        prefs: &PreferenceClient,
        session: Duration,
    ) -> Result<(), StoreError> {
        self.total_usage += session;
        prefs
            .set(TOTAL_USAGE_KEY, self.total_usage.as_secs().to_string())
            .await
    }

    pub fn language(&self) -> usize {
        self.language
    }

    pub fn language_name(&self) -> &'static str {
        LANGUAGES[self.language]
    }

    /// Out-of-range indices select the first language.
    pub fn set_language(&mut self, index: usize) {
        self.language = if index < LANGUAGES.len() { index } else { 0 };
    }

    /// Looks a language up by its display name, ignoring case.
    pub fn set_language_name(&mut self, name: &str) -> bool {
        match LANGUAGES
            .iter()
            .position(|l| l.eq_ignore_ascii_case(name.trim()))
        {
            Some(index) => {
                self.language = index;
                true
            }
            None => false,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: u32) {
        self.volume = volume.min(MAX_VOLUME as u32) as u8;
    }

    fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            (USER_NAME_KEY.to_string(), self.user_name.clone()),
            (DARK_MODE_KEY.to_string(), self.dark_mode.to_string()),
            (LANGUAGE_KEY.to_string(), self.language.to_string()),
            (NOTIFICATION_VOLUME_KEY.to_string(), self.volume.to_string()),
            (
                TOTAL_USAGE_KEY.to_string(),
                self.total_usage.as_secs().to_string(),
            ),
        ];
        if let Some(at) = self.last_access {
            entries.push((LAST_ACCESS_KEY.to_string(), at.to_rfc3339()));
        }
        entries
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.user_name.is_empty() {
            "(unset)"
        } else {
            self.user_name.as_str()
        };
        writeln!(f, "user name:     {name}")?;
        writeln!(f, "dark mode:     {}", if self.dark_mode { "on" } else { "off" })?;
        writeln!(f, "language:      {}", self.language_name())?;
        writeln!(f, "volume:        {}", self.volume)?;
        match self.last_access {
            Some(at) => writeln!(f, "last access:   {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?,
            None => writeln!(f, "last access:   never")?,
        }
        let secs = self.total_usage.as_secs();
        write!(
            f,
            "total usage:   {}h {:02}m {:02}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

fn parsed<T: std::str::FromStr>(raw: Option<&String>, key: &str) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unreadable setting");
            None
        }
    }
}
