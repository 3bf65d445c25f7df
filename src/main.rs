use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use splitpull::commands::{
    add_repositories, init_project, list_repositories, remove_repositories, run_pull, run_split,
    PullOptions, SplitOptions,
};
use splitpull::core::{config_path, load_config, load_split_config, ConfigOverrides};
use splitpull::models::WriteMode;
use splitpull::SplitPullError;

/// SplitPull - split corpus files by line parity and update local git repositories
#[derive(Parser)]
#[command(name = "splitpull")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./splitpull.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file: odd lines to DEST1, even lines to DEST2
    Split {
        /// File to read
        #[arg(required_unless_present = "interactive")]
        source: Option<PathBuf>,

        /// Receives lines 1, 3, 5, ...
        #[arg(required_unless_present = "interactive")]
        dest1: Option<PathBuf>,

        /// Receives lines 2, 4, 6, ...
        #[arg(required_unless_present = "interactive")]
        dest2: Option<PathBuf>,

        /// Append to the target files instead of overwriting them
        #[arg(long, conflicts_with = "overwrite")]
        append: bool,

        /// Truncate the target files even if the config sets `append = true`
        #[arg(long)]
        overwrite: bool,

        /// Prompt for any path not given on the command line
        #[arg(short, long)]
        interactive: bool,
    },

    /// Run the update command in every configured repository
    Pull {
        /// Show what would run without running it
        #[arg(long)]
        dry_run: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Stop at the first repository that fails
        #[arg(long)]
        stop_on_fail: bool,

        /// Override the git executable
        #[arg(long)]
        git: Option<String>,

        /// Override the per-repository timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Manage the list of local repositories
    Repo {
        #[command(subcommand)]
        action: RepoCommand,
    },

    /// Write a default config file
    Init {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RepoCommand {
    /// Add local repository directories
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove repository directories from the list
    Remove {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List configured repositories
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Dispatch a command; `Ok(false)` means it ran but reported failures
async fn run(cli: Cli) -> Result<bool, SplitPullError> {
    let project_root = std::env::current_dir()?;
    let config_file = config_path(&project_root, cli.config.as_deref());

    match cli.command {
        Commands::Split {
            source,
            dest1,
            dest2,
            append,
            overwrite,
            interactive,
        } => {
            // --append / --overwrite win over [split] append in the config file
            let mode = match (append, overwrite) {
                (true, _) => Some(WriteMode::Append),
                (_, true) => Some(WriteMode::Overwrite),
                _ => None,
            };
            let config = load_split_config(&config_file, cli.config.is_some(), mode)?;
            let options = SplitOptions {
                source,
                first: dest1,
                second: dest2,
                interactive,
            };
            run_split(&config, options)?;
            Ok(true)
        }

        Commands::Pull {
            dry_run,
            json,
            stop_on_fail,
            git,
            timeout,
        } => {
            let overrides = ConfigOverrides {
                git,
                timeout,
                stop_on_fail,
                mode: None,
            };
            let config = load_config(&config_file, overrides)?;
            let summary = run_pull(&config, PullOptions { dry_run, json }).await?;
            Ok(summary.all_succeeded())
        }

        Commands::Repo { action } => {
            match action {
                RepoCommand::Add { paths } => {
                    add_repositories(&config_file, &paths)?;
                }
                RepoCommand::Remove { paths } => {
                    remove_repositories(&config_file, &paths)?;
                }
                RepoCommand::List => {
                    let config = load_config(&config_file, ConfigOverrides::default())?;
                    list_repositories(&config);
                }
            }
            Ok(true)
        }

        Commands::Init { path } => {
            let root = path.unwrap_or(project_root);
            init_project(&root)?;
            Ok(true)
        }
    }
}
