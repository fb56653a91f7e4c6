use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    domain::Customer,
    errors::PlannerResult,
    utils::{
        paths,
        persistence::{ensure_dir, load_json, save_json},
    },
};

const DISPATCH_FILE: &str = "dispatch.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Customer identity attached to submitted estimate requests.
    #[serde(default)]
    pub customer: Customer,
    /// Overrides `<home>/outbox` as the estimate outbox directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox_dir: Option<PathBuf>,
    #[serde(default = "default_crew_size")]
    pub default_crew_size: u32,
    /// Roster user name the dashboard commands act as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acting_employee: Option<String>,
}

fn default_crew_size() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            customer: Customer::default(),
            outbox_dir: None,
            default_crew_size: default_crew_size(),
            acting_employee: None,
        }
    }
}

/// Loads and saves [`Config`] under the application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> PlannerResult<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> PlannerResult<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    /// Missing configuration is not an error: defaults are returned.
    pub fn load(&self) -> PlannerResult<Config> {
        if self.path.exists() {
            load_json(&self.path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> PlannerResult<()> {
        save_json(config, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn outbox_dir(&self, config: &Config) -> PathBuf {
        config
            .outbox_dir
            .clone()
            .unwrap_or_else(|| paths::outbox_dir_in(&self.base))
    }

    pub fn dispatch_file(&self) -> PathBuf {
        self.base.join(DISPATCH_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(manager.outbox_dir(&config), temp.path().join("outbox"));
    }

    #[test]
    fn save_then_load_keeps_customer() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            customer: Customer::new("janeDoe", "Jane", "Doe")
                .with_contact("jane@example.com", "330-330-3300"),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        std::fs::write(manager.path(), r#"{"acting_employee":"tjones"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_crew_size, 2);
        assert_eq!(config.acting_employee.as_deref(), Some("tjones"));
    }
}
