use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::GameRules;

const APP_DIR_NAME: &str = "wrap-snake";
const RULES_FILE_NAME: &str = "rules.json";

/// Returns the platform-correct rules file path.
#[must_use]
pub fn rules_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(RULES_FILE_NAME);
    base
}

/// Loads game rules from `path`.
///
/// Returns the defaults when the file does not exist yet. Returns `Err` when
/// the file exists but cannot be read or parsed, so the caller can surface a
/// warning before entering raw terminal mode.
pub fn load_rules(path: &Path) -> io::Result<GameRules> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GameRules::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<GameRules>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Saves game rules to `path`, creating parent directories when needed.
pub fn save_rules(path: &Path, rules: &GameRules) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(rules)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(format!("{APP_DIR_NAME}.log"));
    base
}
