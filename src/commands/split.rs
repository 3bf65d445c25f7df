use std::path::{Path, PathBuf};
use tracing::info;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::core::{split_file, SplitRequest, SplitSummary};
use crate::error::SplitPullError;
use crate::models::{Config, WriteMode};

/// Split command options
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    pub source: Option<PathBuf>,
    pub first: Option<PathBuf>,
    pub second: Option<PathBuf>,
    /// Ask on the terminal for anything not given on the command line
    pub interactive: bool,
}

/// Split a file into odd and even lines
pub fn run_split(config: &Config, options: SplitOptions) -> Result<SplitSummary, SplitPullError> {
    let request = if options.interactive {
        prompt_for_request(config, options)?
    } else {
        request_from_args(config, options)?
    };

    info!(
        "Splitting {} into {} and {} ({})",
        request.source.display(),
        request.first.display(),
        request.second.display(),
        request.mode
    );

    let summary = split_file(&request)?;
    println!("{}", summary);
    Ok(summary)
}

fn request_from_args(config: &Config, options: SplitOptions) -> Result<SplitRequest, SplitPullError> {
    match (options.source, options.first, options.second) {
        (Some(source), Some(first), Some(second)) => Ok(SplitRequest {
            source,
            first,
            second,
            mode: config.split.write_mode(),
        }),
        _ => Err(SplitPullError::Usage(
            "split requires <SOURCE> <DEST1> <DEST2> (or --interactive)".to_string(),
        )),
    }
}

fn prompt_for_request(config: &Config, options: SplitOptions) -> Result<SplitRequest, SplitPullError> {
    let default_dir = config.split.default_dir.as_str();
    let theme = ColorfulTheme::default();

    let source = match options.source {
        Some(path) => path,
        None => prompt_for_path(&theme, "Source file", default_dir)?,
    };
    let first = match options.first {
        Some(path) => path,
        None => prompt_for_path(&theme, "Target file 1 (odd lines)", default_dir)?,
    };
    let second = match options.second {
        Some(path) => path,
        None => prompt_for_path(&theme, "Target file 2 (even lines)", default_dir)?,
    };

    let append = Confirm::with_theme(&theme)
        .with_prompt("Append to existing target files?")
        .default(config.split.append)
        .interact()
        .map_err(|e| SplitPullError::Usage(format!("Failed to get user input: {}", e)))?;

    Ok(SplitRequest {
        source,
        first,
        second,
        mode: WriteMode::from_append(append),
    })
}

fn prompt_for_path(theme: &ColorfulTheme, prompt: &str, default_dir: &str) -> Result<PathBuf, SplitPullError> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| SplitPullError::Usage(format!("Failed to get user input: {}", e)))?;

    Ok(resolve_in_dir(default_dir, answer.trim()))
}

/// Relative answers are taken against the configured default directory
pub fn resolve_in_dir(default_dir: &str, answer: &str) -> PathBuf {
    let path = Path::new(answer);
    if path.is_relative() && !default_dir.is_empty() {
        Path::new(default_dir).join(path)
    } else {
        path.to_path_buf()
    }
}
