//! Runtime configuration, read from the environment.
//!
//! `load_env_file` pulls `~/.vastucraft.env` (or `./.env`) into the process
//! environment first; [`Config::from_env`] then reads the variables below.
//!
//! | Variable | Default |
//! |---|---|
//! | `WEB3FORMS_ACCESS_KEY` | unset: leads are only logged |
//! | `FORM_RELAY_ENDPOINT` | [`FORM_RELAY_ENDPOINT`] |
//! | `GEMINI_API_KEY` (or `API_KEY`) | unset: assistant reports itself unavailable |
//! | `GEMINI_BASE_URL` | [`GENERATIVE_LANGUAGE_BASE`] |
//! | `GEMINI_MODEL` | [`DEFAULT_MODEL`] |
//! | `CONCIERGE_TYPING_DELAY_MS` | 1500 |
//! | `CONCIERGE_AI_SUMMARY` | false |

use crate::assistant::{DEFAULT_MODEL, GENERATIVE_LANGUAGE_BASE};
use crate::error::{Error, Result};
use crate::relay::FORM_RELAY_ENDPOINT;
use crate::session::DEFAULT_TYPING_DELAY;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// File loaded from the home directory when present
pub const ENV_FILE_NAME: &str = ".vastucraft.env";

/// Runtime settings for the concierge, relay and assistant, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Form-relay access key; `None` selects the logging sink
    pub relay_access_key: Option<String>,
    pub relay_endpoint: String,
    pub assistant_api_key: Option<String>,
    pub assistant_base_url: String,
    pub assistant_model: String,
    pub typing_delay: Duration,
    /// Attach an AI summary to concierge leads
    pub ai_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay_access_key: None,
            relay_endpoint: FORM_RELAY_ENDPOINT.to_string(),
            assistant_api_key: None,
            assistant_base_url: GENERATIVE_LANGUAGE_BASE.to_string(),
            assistant_model: DEFAULT_MODEL.to_string(),
            typing_delay: DEFAULT_TYPING_DELAY,
            ai_summary: false,
        }
    }
}

impl Config {
    /// Build a config from the current process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    ///
    /// # Example
    ///
    /// ```rust
    /// use vastucraft::Config;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let vars: HashMap<&str, &str> = [
    ///     ("WEB3FORMS_ACCESS_KEY", "abc"),
    ///     ("CONCIERGE_TYPING_DELAY_MS", "0"),
    /// ].into_iter().collect();
    ///
    /// let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.relay_access_key.as_deref(), Some("abc"));
    /// assert_eq!(config.typing_delay, Duration::ZERO);
    /// assert!(config.assistant_api_key.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let relay_endpoint = non_empty("FORM_RELAY_ENDPOINT").unwrap_or(defaults.relay_endpoint);
        check_http_url("FORM_RELAY_ENDPOINT", &relay_endpoint)?;

        let assistant_base_url =
            non_empty("GEMINI_BASE_URL").unwrap_or(defaults.assistant_base_url);
        check_http_url("GEMINI_BASE_URL", &assistant_base_url)?;

        let typing_delay = match non_empty("CONCIERGE_TYPING_DELAY_MS") {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("CONCIERGE_TYPING_DELAY_MS must be an integer, got '{}'", raw))
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.typing_delay,
        };

        let ai_summary = match non_empty("CONCIERGE_AI_SUMMARY") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!("CONCIERGE_AI_SUMMARY must be true or false, got '{}'", raw))
            })?,
            None => defaults.ai_summary,
        };

        Ok(Self {
            relay_access_key: non_empty("WEB3FORMS_ACCESS_KEY"),
            relay_endpoint,
            assistant_api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            assistant_base_url,
            assistant_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.assistant_model),
            typing_delay,
            ai_summary,
        })
    }
}

fn check_http_url(var: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", var, e)))?;
    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(Error::Config(format!(
            "{} must use http or https, got '{}'",
            var,
            parsed.scheme()
        )));
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Location of the per-user env file
pub fn env_file_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(ENV_FILE_NAME))
}

/// Load `~/.vastucraft.env` if it exists, otherwise `./.env`
///
/// Returns the path that was loaded, if any. A missing file is not an error.
pub fn load_env_file() -> Result<Option<PathBuf>> {
    if let Some(path) = env_file_path().filter(|p| p.exists()) {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("Failed to load {}: {}", path.display(), e)))?;
        return Ok(Some(path));
    }

    match dotenv::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::Config(format!("Failed to load .env: {}", e))),
    }
}
