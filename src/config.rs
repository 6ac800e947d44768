use crate::error::ConfigError;
use crate::filter::{SubsetRules, ViewMode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loading_delay_ms: u64,
    pub refresh_delay_ms: u64,
    pub toast_ttl_ms: u64,
    pub recent_count: usize,
    pub favorite_positions: Vec<usize>,
    pub shared_positions: Vec<usize>,
    pub sidebar_open: bool,
    pub view_mode: ViewMode,
    pub grid_columns: u16,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let rules = SubsetRules::default();
        Config {
            loading_delay_ms: 600,
            refresh_delay_ms: 800,
            toast_ttl_ms: 3000,
            recent_count: rules.recent_count,
            favorite_positions: rules.favorite_positions,
            shared_positions: rules.shared_positions,
            sidebar_open: true,
            view_mode: ViewMode::Grid,
            grid_columns: 3,
            log_file: None,
        }
    }
}

impl Config {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn subset_rules(&self) -> SubsetRules {
        SubsetRules {
            recent_count: self.recent_count,
            favorite_positions: self.favorite_positions.clone(),
            shared_positions: self.shared_positions.clone(),
        }
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.grid_columns == 0 {
            return Err(ConfigError::Invalid(
                "grid_columns must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

const CONFIG_ENV: &str = "CONTENTHUB_CONFIG";

/// Loads the configuration. A path given on the command line or through
/// `CONTENTHUB_CONFIG` must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_from(explicit, from_env.as_deref())
}

fn load_from(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit.or(from_env) {
        return read(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => read(&path),
        _ => Ok(Config::default()),
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml(&content, path)
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("contenthub").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("contenthub").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "contenthub", "contenthub")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_toml(
            "loading_delay_ms = 50\nview_mode = \"list\"\nfavorite_positions = [2]\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(config.loading_delay(), Duration::from_millis(50));
        assert_eq!(config.view_mode, ViewMode::List);
        assert_eq!(config.subset_rules().favorite_positions, vec![2]);
        assert_eq!(config.recent_count, 4);
        assert!(config.sidebar_open);
    }

    #[test]
    fn malformed_and_invalid_files_are_rejected() {
        let path = Path::new("inline.toml");
        assert!(matches!(
            Config::from_toml("loading_delay_ms = \"soon\"", path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_toml("grid_columns = 0", path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        assert!(matches!(load(Some(&missing)), Err(ConfigError::Read { .. })));

        fs::write(&missing, "recent_count = 2\n").unwrap();
        assert_eq!(load(Some(&missing)).unwrap().recent_count, 2);
    }

    #[test]
    fn env_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let typo = dir.path().join("typo.toml");
        assert!(matches!(
            load_from(None, Some(&typo)),
            Err(ConfigError::Read { .. })
        ));

        let real = dir.path().join("config.toml");
        fs::write(&real, "grid_columns = 2\n").unwrap();
        assert_eq!(load_from(None, Some(&real)).unwrap().grid_columns, 2);
        // The command line wins over the environment.
        assert_eq!(load_from(Some(&real), Some(&typo)).unwrap().grid_columns, 2);
    }
}
