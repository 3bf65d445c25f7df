use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::SplitPullError;
use crate::models::CONFIG_FILE_NAME;

const CONFIG_TEMPLATE: &str = r#"# SplitPull configuration

[split]
# Append to existing target files instead of overwriting them
append = false
# Directory that relative paths entered at interactive prompts resolve against
default_dir = ""

[pull]
# Update executable and its arguments, run inside each repository
git = "git"
args = ["pull", "origin", "master"]
# Base directory for relative `splitpull repo add` paths
default_repo_dir = ""
# Per-repository timeout in seconds (0 = no timeout)
timeout_seconds = 300
# Stop at the first repository that fails
stop_on_fail = false

[repos]
paths = []
"#;

/// Write a default splitpull.toml into the project directory
pub fn init_project(project_root: &Path) -> Result<(), SplitPullError> {
    if !project_root.exists() {
        fs::create_dir_all(project_root)?;
        info!("Created directory: {}", project_root.display());
    }

    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        info!("File already exists: {}", config_path.display());
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    info!("Created file: {}", config_path.display());

    println!("SplitPull initialized at {}", project_root.display());
    println!("\nNext steps:");
    println!("1. Edit {} to set the git location and defaults", CONFIG_FILE_NAME);
    println!("2. Run 'splitpull repo add <path>' for each local repository");
    println!("3. Run 'splitpull pull' to update them");
    println!("4. Run 'splitpull split <source> <dest1> <dest2>' to split a file");

    Ok(())
}
