use chrono::Utc;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::RepoError;
use crate::models::{Config, PullConfig, RepoUpdate, UpdateStatus};

/// Resolve a user-supplied repository path to an absolute directory.
///
/// Relative paths are taken against `base` when it is set, otherwise against
/// the current directory.
pub fn resolve_repo_path(path: &Path, base: &str) -> Result<PathBuf, RepoError> {
    let candidate = if path.is_relative() && !base.is_empty() {
        Path::new(base).join(path)
    } else {
        path.to_path_buf()
    };

    let resolved = candidate
        .canonicalize()
        .map_err(|e| RepoError::Resolve {
            path: candidate.clone(),
            source: e,
        })?;

    if !resolved.is_dir() {
        return Err(RepoError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// Add directories to the stored list, skipping ones already present.
/// Returns the paths that were actually added.
pub fn add_repos(config: &mut Config, paths: &[PathBuf]) -> Result<Vec<PathBuf>, RepoError> {
    let mut added = Vec::new();
    for path in paths {
        let resolved = resolve_repo_path(path, &config.pull.default_repo_dir)?;
        if config.repos.paths.contains(&resolved) {
            info!("Repository already listed: {}", resolved.display());
            continue;
        }
        info!("Adding repository: {}", resolved.display());
        config.repos.paths.push(resolved.clone());
        added.push(resolved);
    }
    Ok(added)
}

/// Remove directories from the stored list.
///
/// A path matches if it equals a stored entry as given, or after resolving,
/// so entries whose directory has since been deleted can still be removed.
pub fn remove_repos(config: &mut Config, paths: &[PathBuf]) -> Result<Vec<PathBuf>, RepoError> {
    let mut removed = Vec::new();
    for path in paths {
        let position = config.repos.paths.iter().position(|p| p == path).or_else(|| {
            let resolved = resolve_repo_path(path, &config.pull.default_repo_dir).ok()?;
            config.repos.paths.iter().position(|p| *p == resolved)
        });

        match position {
            Some(index) => {
                let entry = config.repos.paths.remove(index);
                info!("Removed repository: {}", entry.display());
                removed.push(entry);
            }
            None => return Err(RepoError::NotConfigured(path.clone())),
        }
    }
    Ok(removed)
}

/// Whole milliseconds, saturating at `u64::MAX`
fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Runs the configured update command in each repository directory
pub struct RepoUpdater {
    pull: PullConfig,
}

impl RepoUpdater {
    pub fn new(pull: PullConfig) -> Self {
        Self { pull }
    }

    pub fn command_line(&self) -> String {
        self.pull.command_line()
    }

    /// Visit every directory in list order.
    ///
    /// Empty entries are skipped. Failures are recorded and the loop
    /// continues unless `stop_on_fail` is set.
    pub async fn update_all(&self, paths: &[PathBuf]) -> Vec<RepoUpdate> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            if path.as_os_str().is_empty() {
                debug!("Skipping empty repository entry");
                continue;
            }

            let result = self.update_one(path).await;
            let failed = !result.status.is_success();
            results.push(result);

            if failed && self.pull.stop_on_fail {
                warn!("Stopping after failure in {} (stop_on_fail)", path.display());
                break;
            }
        }

        results
    }

    /// Run the update command with `path` as working directory
    pub async fn update_one(&self, path: &Path) -> RepoUpdate {
        let command = self.command_line();
        let started_at = Utc::now();

        if !path.is_dir() {
            warn!("Repository directory not found: {}", path.display());
            return RepoUpdate::not_run(
                path.to_path_buf(),
                command,
                UpdateStatus::Missing,
                format!("Directory not found: {}", path.display()),
                started_at,
            );
        }

        info!("Updating {}: {}", path.display(), command);

        let mut cmd = Command::new(&self.pull.git);
        cmd.args(&self.pull.args)
            .current_dir(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let output = if self.pull.timeout_seconds == 0 {
            cmd.output().await
        } else {
            let limit = Duration::from_secs(self.pull.timeout_seconds);
            match tokio::time::timeout(limit, cmd.output()).await {
                Ok(output) => output,
                Err(_) => {
                    warn!(
                        "Update in {} timed out after {}s",
                        path.display(),
                        self.pull.timeout_seconds
                    );
                    let mut result = RepoUpdate::not_run(
                        path.to_path_buf(),
                        command,
                        UpdateStatus::TimedOut,
                        format!("Timed out after {} seconds", self.pull.timeout_seconds),
                        started_at,
                    );
                    result.duration_ms = duration_ms(start.elapsed());
                    return result;
                }
            }
        };
        let elapsed_ms = duration_ms(start.elapsed());

        match output {
            Ok(output) => {
                let status = if output.status.success() {
                    UpdateStatus::Updated
                } else {
                    UpdateStatus::Failed
                };
                debug!("{} exited with {:?}", command, output.status.code());

                RepoUpdate {
                    path: path.to_path_buf(),
                    command,
                    status,
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    started_at,
                    duration_ms: elapsed_ms,
                }
            }
            Err(e) => {
                warn!("Failed to run {} in {}: {}", command, path.display(), e);
                let mut result = RepoUpdate::not_run(
                    path.to_path_buf(),
                    command,
                    UpdateStatus::Failed,
                    format!("Failed to run command: {}", e),
                    started_at,
                );
                result.duration_ms = elapsed_ms;
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pull_config(git: &str, args: &[&str]) -> PullConfig {
        PullConfig {
            git: git.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            ..PullConfig::default()
        }
    }

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_resolve_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("repo")).unwrap();
        let base = temp_dir.path().to_string_lossy().into_owned();

        let resolved = resolve_repo_path(Path::new("repo"), &base).unwrap();
        assert_eq!(resolved, temp_dir.path().join("repo").canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let result = resolve_repo_path(&file, "");
        assert!(matches!(result, Err(RepoError::NotADirectory(_))));
    }

    #[test]
    fn test_resolve_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = resolve_repo_path(&temp_dir.path().join("gone"), "");
        assert!(matches!(result, Err(RepoError::Resolve { .. })));
    }

    #[test]
    fn test_add_deduplicates() {
        let temp_dir = TempDir::new().unwrap();
        let repo = temp_dir.path().to_path_buf();
        let mut config = Config::default();

        let added = add_repos(&mut config, &[repo.clone(), repo.clone()]).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(config.repos.paths.len(), 1);

        let added = add_repos(&mut config, &[repo]).unwrap();
        assert!(added.is_empty());
        assert_eq!(config.repos.paths.len(), 1);
    }

    #[test]
    fn test_remove_stale_entry() {
        let mut config = Config::default();
        config.repos.paths.push(PathBuf::from("/nonexistent/old/repo"));

        let removed = remove_repos(&mut config, &[PathBuf::from("/nonexistent/old/repo")]).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(config.repos.paths.is_empty());
    }

    #[test]
    fn test_remove_unknown() {
        let mut config = Config::default();
        let result = remove_repos(&mut config, &[PathBuf::from("/not/listed")]);
        assert!(matches!(result, Err(RepoError::NotConfigured(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_one_captures_output() {
        let temp_dir = TempDir::new().unwrap();
        let updater = RepoUpdater::new(pull_config("echo", &["Already up to date."]));

        let result = updater.update_one(temp_dir.path()).await;
        assert_eq!(result.status, UpdateStatus::Updated);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, "Already up to date.\n");
        assert_eq!(result.command, "echo Already up to date.");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_one_runs_in_repo_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("marker.txt"), "").unwrap();
        let updater = RepoUpdater::new(pull_config("ls", &[]));

        let result = updater.update_one(temp_dir.path()).await;
        assert!(result.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_one_nonzero_exit() {
        let temp_dir = TempDir::new().unwrap();
        let updater = RepoUpdater::new(pull_config("false", &[]));

        let result = updater.update_one(temp_dir.path()).await;
        assert_eq!(result.status, UpdateStatus::Failed);
        assert_eq!(result.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_update_one_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let updater = RepoUpdater::new(PullConfig::default());

        let result = updater.update_one(&temp_dir.path().join("missing")).await;
        assert_eq!(result.status, UpdateStatus::Missing);
        assert_eq!(result.exit_code, None);
    }

    #[tokio::test]
    async fn test_update_one_spawn_failure() {
        let temp_dir = TempDir::new().unwrap();
        let updater = RepoUpdater::new(pull_config("splitpull-no-such-binary", &[]));

        let result = updater.update_one(temp_dir.path()).await;
        assert_eq!(result.status, UpdateStatus::Failed);
        assert!(result.stderr.contains("Failed to run command"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_one_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let mut pull = pull_config("sleep", &["5"]);
        pull.timeout_seconds = 1;
        let updater = RepoUpdater::new(pull);

        let result = updater.update_one(temp_dir.path()).await;
        assert_eq!(result.status, UpdateStatus::TimedOut);
        assert_eq!(result.exit_code, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_all_order_and_skip_empty() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let updater = RepoUpdater::new(pull_config("pwd", &[]));

        let paths = vec![
            second.path().to_path_buf(),
            PathBuf::new(),
            first.path().to_path_buf(),
        ];
        let results = updater.update_all(&paths).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, second.path());
        assert_eq!(results[1].path, first.path());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_all_stop_on_fail() {
        let temp_dir = TempDir::new().unwrap();
        let mut pull = pull_config("false", &[]);
        pull.stop_on_fail = true;
        let updater = RepoUpdater::new(pull);

        let paths = vec![temp_dir.path().to_path_buf(), temp_dir.path().to_path_buf()];
        let results = updater.update_all(&paths).await;
        assert_eq!(results.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_update_all_continues_past_missing() {
        let temp_dir = TempDir::new().unwrap();
        let updater = RepoUpdater::new(pull_config("true", &[]));

        let paths = vec![temp_dir.path().join("missing"), temp_dir.path().to_path_buf()];
        let results = updater.update_all(&paths).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, UpdateStatus::Missing);
        assert_eq!(results[1].status, UpdateStatus::Updated);
    }
}
