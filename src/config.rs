use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR: &str = ".portfolio";
pub const CONFIG_FILE: &str = "config.toml";

// ─── Sections ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            url: None,
            anon_key: None,
            table: "projects".to_string(),
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    pub fn is_configured(&self) -> bool {
        matches!((&self.url, &self.anon_key), (Some(u), Some(k)) if !u.trim().is_empty() && !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Wait a fixed delay and report success. No message leaves the machine.
    #[default]
    Simulated,
    /// Insert the message into the store's `messages` table.
    Store,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactConfig {
    pub delivery: Delivery,
    pub simulated_delay_ms: u64,
    pub status_reset_secs: u64,
    pub recipient_name: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            delivery: Delivery::Simulated,
            simulated_delay_ms: 2000,
            status_reset_secs: 5,
            recipient_name: "Anil Chhetri".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn status_reset(&self) -> Duration {
        Duration::from_secs(self.status_reset_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GalleryConfig {
    /// Images for any project id not listed in `projects`. Empty means built-in default.
    pub default_images: Vec<String>,
    /// Extra or replacement entries keyed by project id.
    pub projects: BTreeMap<String, Vec<String>>,
}

// ─── Root ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PortfolioConfig {
    pub store: StoreConfig,
    pub contact: ContactConfig,
    pub gallery: GalleryConfig,
}

impl PortfolioConfig {
    /// `~/.portfolio/config.toml`
    pub fn default_path() -> Result<PathBuf, PortfolioError> {
        dirs::home_dir()
            .map(|h| h.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or_else(|| PortfolioError::config("Cannot determine home dir"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PortfolioError> {
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, PortfolioError> {
        let config: PortfolioConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.store.table.trim().is_empty() {
            return Err(PortfolioError::config("store.table must not be empty"));
        }
        if self.store.timeout_secs == 0 {
            return Err(PortfolioError::config("store.timeout_secs must be positive"));
        }
        if self.contact.status_reset_secs == 0 {
            return Err(PortfolioError::config(
                "contact.status_reset_secs must be positive",
            ));
        }
        if self.contact.delivery == Delivery::Store && !self.store.is_configured() {
            return Err(PortfolioError::config(
                "contact.delivery = \"store\" requires store.url and store.anon_key",
            ));
        }
        if let Some((id, _)) = self.gallery.projects.iter().find(|(_, v)| v.is_empty()) {
            return Err(PortfolioError::config(format!(
                "gallery.projects.{} has no images",
                id
            )));
        }
        Ok(())
    }
}
