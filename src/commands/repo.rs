use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{add_repos, remove_repos};
use crate::error::SplitPullError;
use crate::models::Config;

/// Add repositories to the list stored in the config file
pub fn add_repositories(config_path: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>, SplitPullError> {
    let mut config = Config::load_or_default(config_path)?;
    let added = add_repos(&mut config, paths)?;

    if added.is_empty() {
        println!("No new repositories added.");
        return Ok(added);
    }

    config.save_to_file(config_path)?;
    info!("Saved {} repositories to {}", config.repos.paths.len(), config_path.display());
    for path in &added {
        println!("Added: {}", path.display());
    }
    Ok(added)
}

/// Remove repositories from the stored list
pub fn remove_repositories(config_path: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>, SplitPullError> {
    let mut config = Config::load_or_default(config_path)?;
    let removed = remove_repos(&mut config, paths)?;

    config.save_to_file(config_path)?;
    info!("Saved {} repositories to {}", config.repos.paths.len(), config_path.display());
    for path in &removed {
        println!("Removed: {}", path.display());
    }
    Ok(removed)
}

/// Print the stored list in update order
pub fn list_repositories(config: &Config) {
    if config.repos.paths.is_empty() {
        println!("No repositories configured.");
        return;
    }

    println!("Repositories ({}):", config.repos.paths.len());
    for (i, path) in config.repos.paths.iter().enumerate() {
        let marker = if path.is_dir() { "" } else { " (missing)" };
        println!("  {}. {}{}", i + 1, path.display(), marker);
    }
}
