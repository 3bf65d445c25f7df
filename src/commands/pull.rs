use tracing::info;

use crate::core::RepoUpdater;
use crate::error::SplitPullError;
use crate::models::{Config, RepoUpdate, UpdateSummary};

/// Pull command options
#[derive(Debug, Clone, Default)]
pub struct PullOptions {
    /// Print what would run without running it
    pub dry_run: bool,
    /// Print results as JSON
    pub json: bool,
}

/// Update every configured repository.
///
/// Returns the summary; callers decide the exit code from it.
pub async fn run_pull(config: &Config, options: PullOptions) -> Result<UpdateSummary, SplitPullError> {
    let paths = &config.repos.paths;

    if paths.is_empty() {
        if options.json {
            println!("[]");
        } else {
            println!("No repositories configured.");
            println!("Use 'splitpull repo add <path>' to add one.");
        }
        return Ok(UpdateSummary::default());
    }

    let updater = RepoUpdater::new(config.pull.clone());

    if options.dry_run {
        println!("=== DRY RUN ===\n");
        for path in paths {
            println!("  {}", path.display());
            println!("    $ {}", updater.command_line());
        }
        println!("\nRun without --dry-run to execute.");
        return Ok(UpdateSummary::default());
    }

    info!("Updating {} repositories", paths.len());
    let results = updater.update_all(paths).await;
    let summary = UpdateSummary::from_results(&results);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_update(result);
        }
        println!("{}", summary);
    }

    Ok(summary)
}

fn print_update(result: &RepoUpdate) {
    println!("Changing to: {}", result.path.display());
    println!("$ {}", result.command);

    if !result.stdout.is_empty() {
        print!("{}", result.stdout);
        if !result.stdout.ends_with('\n') {
            println!();
        }
    }
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
        if !result.stderr.ends_with('\n') {
            eprintln!();
        }
    }

    match result.exit_code {
        Some(code) => println!("[{}] exit code {} ({} ms)\n", result.status, code, result.duration_ms),
        None => println!("[{}]\n", result.status),
    }
}
