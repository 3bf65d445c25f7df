//! Write mode and destination enumerations for the line splitter

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How both output files are opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate existing content before writing
    #[default]
    Overwrite,
    /// Keep existing content and write after it
    Append,
}

impl WriteMode {
    /// Pick a mode from an `--append` style flag
    pub fn from_append(append: bool) -> Self {
        if append {
            WriteMode::Append
        } else {
            WriteMode::Overwrite
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which of the two output files an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Receives lines 1, 3, 5, ...
    First,
    /// Receives lines 2, 4, 6, ...
    Second,
}

impl Destination {
    /// 1-based number as shown to the user
    pub fn number(&self) -> u8 {
        match self {
            Destination::First => 1,
            Destination::Second => 2,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destination {}", self.number())
    }
}
