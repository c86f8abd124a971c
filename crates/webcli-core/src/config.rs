//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Homepage URL, the first history entry
    pub homepage: String,
    /// Timeout for a whole page fetch, progress reporting or not
    pub request_timeout_secs: u64,
    /// Maximum redirects followed per fetch
    pub redirect_limit: usize,
    pub user_agent: String,
    /// Render `sup`/`sub` as Unicode superscript
    pub render_scripts: bool,
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY`
    pub use_system_proxy: bool,
    /// Where logs go while the terminal UI is running
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            homepage: "https://www.wiicart.net/clbrowser".to_string(),
            request_timeout_secs: 15,
            redirect_limit: 10,
            user_agent: format!("webcli/{}", env!("CARGO_PKG_VERSION")),
            render_scripts: false,
            use_system_proxy: true,
            log_file: Some(data_dir.join("webcli.log")),
        }
    }

    /// Read a JSON config file. A missing file yields the defaults; missing
    /// fields take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded config");

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.homepage.trim().is_empty() {
            return Err(crate::CoreError::Config("homepage cannot be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(crate::CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("webcli"))
            .unwrap_or_else(|| PathBuf::from(".webcli"))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("webcli"))
            .unwrap_or_else(|| PathBuf::from(".webcli"))
            .join("config.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform directories without pulling in a crate for it
mod dirs {
    use std::path::PathBuf;

    #[cfg_attr(target_os = "windows", allow(dead_code))]
    fn home() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE").ok().map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var("HOME").ok().map(PathBuf::from)
        }
    }

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            home().map(|h| h.join("Library/Application Support"))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| home().map(|h| h.join(".local/share")))
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            home().map(|h| h.join("Library/Application Support"))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| home().map(|h| h.join(".config")))
        }
    }
}
