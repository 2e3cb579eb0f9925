use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::bootstrap::AppIdentity;
use crate::render::{DEFAULT_HEIGHT, DEFAULT_TICK_MS, DEFAULT_WIDTH};

pub const MAIN_BUNDLE_ID: &str = "com.gmail.walles.johan.LoadViz";
pub const HELPER_BUNDLE_ID: &str = "com.gmail.walles.johan.LoadVizAutoLauncher";
pub const MAIN_EXECUTABLE: &str = "loadviz";
pub const HELPER_EXECUTABLE: &str = "loadviz-auto-launcher";
/// Helper bundle location relative to the main bundle root.
pub const HELPER_BUNDLE_SUBPATH: &str = "Contents/Library/LoginItems/LoadVizAutoLauncher.app";
const HELP_URL: &str = "https://github.com/walles/loadviz";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings read from `$XDG_CONFIG_HOME/loadviz/config.json`.
///
/// ```json
/// { "width": 40, "height": 22, "tick_ms": 100, "screen": "DP-1" }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub tick_ms: u64,
    pub bundle_id: String,
    pub executable: String,
    pub helper_bundle_id: String,
    /// Auto-launcher to register at login; defaults to the binary next to
    /// the running one.
    pub helper_path: Option<PathBuf>,
    /// Output to put the indicator on; `LOADVIZ_SCREEN` overrides.
    pub screen: Option<String>,
    pub help_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            bundle_id: MAIN_BUNDLE_ID.to_string(),
            executable: MAIN_EXECUTABLE.to_string(),
            helper_bundle_id: HELPER_BUNDLE_ID.to_string(),
            helper_path: None,
            screen: None,
            help_url: HELP_URL.to_string(),
        }
    }
}

pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("loadviz/config.json")
}

impl Config {
    /// Parse and validate config file contents.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the config file. A missing file gives the defaults; a broken one
    /// is logged and also gives the defaults.
    pub fn load() -> Self {
        let path = config_file_path();
        let mut config = match Self::read(&path) {
            Ok(Some(config)) => {
                log::info!("config: loaded {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("config: {e}; using defaults");
                Self::default()
            }
        };
        if let Some(screen) = std::env::var("LOADVIZ_SCREEN").ok().filter(|s| !s.is_empty()) {
            log::info!("config: target screen {screen} (from LOADVIZ_SCREEN)");
            config.screen = Some(screen);
        }
        config
    }

    fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&content).map(Some)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "indicator size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be non-zero".to_string()));
        }
        if self.bundle_id.is_empty() || self.helper_bundle_id.is_empty() {
            return Err(ConfigError::Invalid("bundle ids must be non-empty".to_string()));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn main_identity(&self) -> AppIdentity {
        AppIdentity {
            bundle_id: self.bundle_id.clone(),
            executable: self.executable.clone(),
        }
    }

    /// The auto-launcher executable to register at login: the configured
    /// path, else the helper for the install our own binary lives in.
    pub fn resolved_helper_path(&self) -> PathBuf {
        if let Some(path) = &self.helper_path {
            return path.clone();
        }
        match std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
        {
            Some(dir) => helper_path_in(&dir),
            None => PathBuf::from(HELPER_EXECUTABLE),
        }
    }
}

/// The helper for a main binary in `dir`: nested in the bundle when that
/// exists, else the sibling binary. Either way the bootstrap resolves it back
/// to `dir`.
pub fn helper_path_in(dir: &Path) -> PathBuf {
    let nested = dir.join(HELPER_BUNDLE_SUBPATH).join(HELPER_EXECUTABLE);
    if nested.exists() {
        nested
    } else {
        dir.join(HELPER_EXECUTABLE)
    }
}

#[cfg(test)]
mod tests {
    use crate::bootstrap::HelperInstall;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!((config.width, config.height), (40, 22));
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn partial_override() {
        let config = Config::parse(r#"{ "tick_ms": 250, "screen": "DP-1" }"#).unwrap();
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.screen.as_deref(), Some("DP-1"));
        assert_eq!(config.width, 40);
        assert_eq!(config.bundle_id, MAIN_BUNDLE_ID);
    }

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(
            Config::parse(r#"{ "width": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_period_rejected() {
        assert!(matches!(
            Config::parse(r#"{ "tick_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            Config::parse("{ width: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn explicit_helper_path_wins() {
        let config = Config::parse(r#"{ "helper_path": "/opt/loadviz/helper" }"#).unwrap();
        assert_eq!(
            config.resolved_helper_path(),
            PathBuf::from("/opt/loadviz/helper")
        );
    }

    #[test]
    fn default_helper_path_is_sibling() {
        let path = Config::default().resolved_helper_path();
        assert_eq!(path.file_name().unwrap(), HELPER_EXECUTABLE);
    }

    #[test]
    fn registered_sibling_helper_leads_back_to_main_binary() {
        let helper = Config::default().resolved_helper_path();
        let main_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();

        let install = HelperInstall::from_executable(&helper);
        assert!(matches!(install, HelperInstall::Sibling(_)));
        assert_eq!(install.main_bundle_path(), Some(main_dir));
    }

    #[test]
    fn registered_nested_helper_leads_back_to_main_bundle() {
        let root = std::env::temp_dir().join(format!("loadviz-bundle-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let helper_dir = root.join(HELPER_BUNDLE_SUBPATH);
        std::fs::create_dir_all(&helper_dir).unwrap();
        std::fs::write(helper_dir.join(HELPER_EXECUTABLE), "").unwrap();

        let helper = helper_path_in(&root);
        assert_eq!(helper, helper_dir.join(HELPER_EXECUTABLE));
        let install = HelperInstall::from_executable(&helper);
        assert_eq!(install, HelperInstall::Nested(helper_dir));
        assert_eq!(install.main_bundle_path(), Some(root.clone()));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn helper_subpath_depth_matches_bootstrap() {
        assert_eq!(
            std::path::Path::new(HELPER_BUNDLE_SUBPATH).components().count(),
            crate::bootstrap::MAIN_BUNDLE_DEPTH
        );
    }

    #[test]
    fn identity_from_config() {
        let id = Config::default().main_identity();
        assert_eq!(id.bundle_id, MAIN_BUNDLE_ID);
        assert_eq!(id.executable, MAIN_EXECUTABLE);
    }
}
