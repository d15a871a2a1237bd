use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8765";
pub const DEFAULT_USER_ID: &str = "default_user";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("invalid API base URL '{0}': expected an absolute http(s) URL")]
    InvalidApiBase(String),

    #[error("user id must not be empty")]
    EmptyUserId,
}

/// Launcher flavour written into the `command`/`args` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Normalized inputs for one install run.
///
/// `api_base` never carries a trailing slash once constructed. Neither field is
/// escaped before it is embedded into a quoted TOML string, so a value holding
/// `"` or `\` produces a malformed document.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallSettings {
    pub api_base: String,
    pub user_id: String,
    pub platform: Platform,
}

impl InstallSettings {
    pub fn new(api_base: &str, user_id: &str, platform: Platform) -> Result<Self, SettingsError> {
        let api_base = api_base.trim_end_matches('/');
        let parsed =
            Url::parse(api_base).map_err(|_| SettingsError::InvalidApiBase(api_base.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(SettingsError::InvalidApiBase(api_base.to_string()));
        }

        if user_id.is_empty() {
            return Err(SettingsError::EmptyUserId);
        }

        Ok(Self {
            api_base: api_base.to_string(),
            user_id: user_id.to_string(),
            platform,
        })
    }
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            platform: Platform::current(),
        }
    }
}
