//! SplitPull - corpus line splitter and local repository updater
//!
//! Two small tools behind one CLI: `split` divides a text file's lines
//! alternately into two files (line 1 to the first, line 2 to the second,
//! and so on), and `pull` runs an update command in each configured local
//! git working directory.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (split, pull, repo, init)
//! - **core**: Core functionality (line splitter, repository updater, config loading)
//! - **models**: Data structures (config, write mode, partition, update results)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{Result, SplitPullError};
