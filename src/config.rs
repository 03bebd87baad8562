//! Runtime settings, read from the environment.

use crate::repository::RestorePolicy;
use crate::toast::DEFAULT_TOAST_DURATION;
use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

const API_KEY_VARS: &[&str] = &["MINDVAULT_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub vault_dir: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub fetch_timeout: Duration,
    pub fetch_enabled: bool,
    pub toast_duration: u64,
    pub restore_policy: RestorePolicy,
    pub use_color: bool,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> io::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let vault_dir = match get("MINDVAULT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = get("HOME").ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "HOME not set; set MINDVAULT_DIR explicitly",
                    )
                })?;
                PathBuf::from(home).join(".mindvault")
            }
        };

        let api_key = API_KEY_VARS.iter().find_map(|key| get(key));

        let fetch_timeout_ms = match get("MINDVAULT_FETCH_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid MINDVAULT_FETCH_TIMEOUT_MS={raw}");
                DEFAULT_FETCH_TIMEOUT_MS
            }),
            None => DEFAULT_FETCH_TIMEOUT_MS,
        };

        let toast_duration = match get("MINDVAULT_TOAST_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid MINDVAULT_TOAST_MS={raw}");
                DEFAULT_TOAST_DURATION
            }),
            None => DEFAULT_TOAST_DURATION,
        };

        let restore_policy = match get("MINDVAULT_UNDO") {
            Some(raw) => RestorePolicy::parse(&raw).unwrap_or_else(|| {
                log::warn!("Unknown MINDVAULT_UNDO={raw}; using merge");
                RestorePolicy::Merge
            }),
            None => RestorePolicy::default(),
        };

        Ok(Self {
            vault_dir,
            api_key,
            model: get("MINDVAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get("MINDVAULT_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            fetch_enabled: lookup("MINDVAULT_NO_FETCH").is_none(),
            toast_duration,
            restore_policy,
            use_color: lookup("NO_COLOR").is_none(),
        })
    }
}
