//! Application settings loaded from `menu-desk.toml`
//!
//! The file is optional; every value has a default and the usual deployment knobs
//! can be overridden from the environment (`MENU_API_BASE_URL`, `MENU_OUTLET_ID`,
//! `DATABASE_URL`). The API token is never part of this file.

use crate::{
    config::database::DEFAULT_DATABASE_URL,
    core::{dish::OutletId, listing::StatusLifecycle},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use strum::{Display, EnumString};
use tracing::debug;

/// Default settings file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "menu-desk.toml";

/// Where dishes are read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BackendKind {
    /// The REST backend
    #[default]
    Http,
    /// The local `SQLite` store
    Local,
}

/// Whole settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which backend to talk to
    pub backend: BackendKind,
    /// REST backend settings
    pub api: ApiConfig,
    /// The outlet being administered
    pub outlet: OutletConfig,
    /// Listing behaviour
    pub menu: MenuConfig,
    /// Local store settings
    pub store: StoreConfig,
}

/// REST backend settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://api.example.com/v1`
    pub base_url: Option<String>,
}

/// Outlet selection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutletConfig {
    /// Outlet identifier
    pub id: Option<OutletId>,
}

/// Listing behaviour
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Status lifecycle
    pub lifecycle: StatusLifecycle,
}

/// Local store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `SeaORM` connection string
    pub database_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Applies overrides from a variable lookup.
    ///
    /// # Errors
    /// Fails if `MENU_OUTLET_ID` is set but is not an integer.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("MENU_API_BASE_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(raw) = lookup("MENU_OUTLET_ID") {
            let id = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("MENU_OUTLET_ID must be an integer, got '{raw}': {e}"),
            })?;
            self.outlet.id = Some(id);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.store.database_url = url;
        }
        Ok(())
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    /// See [`AppConfig::apply_overrides`].
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// The configured outlet.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when no outlet is configured.
    pub fn outlet_id(&self) -> Result<OutletId> {
        self.outlet.id.ok_or_else(|| Error::Config {
            message: "No outlet configured; set [outlet] id or MENU_OUTLET_ID".to_string(),
        })
    }

    /// The REST base URL.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the URL is missing or blank.
    pub fn api_base_url(&self) -> Result<&str> {
        self.api
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config {
                message: "No API base URL configured; set [api] base_url or MENU_API_BASE_URL"
                    .to_string(),
            })
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads `menu-desk.toml` when present (defaults otherwise), then applies the
/// environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed, or an override is invalid.
pub fn load_default_config() -> Result<AppConfig> {
    let mut config = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)?
    } else {
        debug!("{} not found, using defaults", DEFAULT_CONFIG_PATH);
        AppConfig::default()
    };
    config.apply_env()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::{collections::HashMap, io::Write};

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            backend = "local"

            [api]
            base_url = "https://api.example.com/v1"

            [outlet]
            id = 42

            [menu]
            lifecycle = "pending_gate"

            [store]
            database_url = "sqlite::memory:"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.api_base_url().unwrap(), "https://api.example.com/v1");
        assert_eq!(config.outlet_id().unwrap(), 42);
        assert_eq!(config.menu.lifecycle, StatusLifecycle::PendingGate);
        assert_eq!(config.store.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.menu.lifecycle, StatusLifecycle::ThreeState);
        assert_eq!(config.store.database_url, DEFAULT_DATABASE_URL);
        assert!(matches!(config.outlet_id(), Err(Error::Config { .. })));
        assert!(matches!(config.api_base_url(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config: AppConfig = toml::from_str("[outlet]\nid = 1").unwrap();
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MENU_OUTLET_ID", " 9 "),
            ("MENU_API_BASE_URL", "http://localhost:8080"),
        ]);
        config
            .apply_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.outlet_id().unwrap(), 9);
        assert_eq!(config.api_base_url().unwrap(), "http://localhost:8080");
        assert_eq!(config.store.database_url, DEFAULT_DATABASE_URL);

        config
            .apply_overrides(|key| (key == "DATABASE_URL").then(|| "sqlite::memory:".to_string()))
            .unwrap();
        assert_eq!(config.store.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_bad_outlet_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == "MENU_OUTLET_ID").then(|| "seven".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[outlet]\nid = 3\n[menu]\nlifecycle = \"three_state\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.outlet_id().unwrap(), 3);

        let missing = load_config("/definitely/not/here.toml");
        assert!(matches!(missing, Err(Error::Config { .. })));
    }

    #[test]
    fn test_unknown_lifecycle_rejected() {
        let result: std::result::Result<AppConfig, _> =
            toml::from_str("[menu]\nlifecycle = \"four_state\"");
        assert!(result.is_err());
    }
}
