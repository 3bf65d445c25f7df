use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::SplitPullError;
use crate::models::{Config, WriteMode, CONFIG_FILE_NAME};

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub git: Option<String>,
    pub timeout: Option<u64>,
    pub stop_on_fail: bool,
    /// `--append` / `--overwrite`; None keeps `[split] append` from the file
    pub mode: Option<WriteMode>,
}

/// Location of the config file: the explicit path if given, otherwise
/// splitpull.toml in the project directory
pub fn config_path(project_root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => project_root.join(CONFIG_FILE_NAME),
    }
}

/// Load configuration with CLI overrides
pub fn load_config(path: &Path, overrides: ConfigOverrides) -> Result<Config, SplitPullError> {
    let config = Config::load_or_default(path)?;
    let config = config.with_overrides(
        overrides.git,
        overrides.timeout,
        overrides.stop_on_fail,
        overrides.mode,
    );

    debug!(
        "Configuration loaded from {}: git={}, timeout={}s, repos={}",
        path.display(),
        config.pull.git,
        config.pull.timeout_seconds,
        config.repos.paths.len()
    );

    Ok(config)
}

/// Load configuration for the split command.
///
/// An implicit ./splitpull.toml that cannot be read or parsed is skipped
/// with a warning so that splitting never depends on the pull settings.
/// A file named with `--config` must load.
pub fn load_split_config(
    path: &Path,
    explicit: bool,
    mode: Option<WriteMode>,
) -> Result<Config, SplitPullError> {
    let config = match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) if !explicit => {
            warn!("Ignoring {}: {}", path.display(), e);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    let config = config.with_overrides(None, None, false, mode);

    debug!(
        "Split configuration: mode={}, default_dir={:?}",
        config.split.write_mode(),
        config.split.default_dir
    );

    Ok(config)
}
