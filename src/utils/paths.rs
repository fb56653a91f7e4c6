use dirs::home_dir;
use std::{env, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".move_planner";
const OUTBOX_DIR: &str = "outbox";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "MOVE_PLANNER_HOME";

/// Returns the application data directory, defaulting to `~/.move_planner`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Directory holding submitted estimate requests.
pub fn outbox_dir_in(base: &Path) -> PathBuf {
    base.join(OUTBOX_DIR)
}
