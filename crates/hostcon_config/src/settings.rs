use std::path::PathBuf;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Which host primitive the console is wired to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// The process's stdout and stderr.
    #[default]
    Stdio,
    /// An in-memory record, nothing reaches the terminal.
    Capture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
#[setters(into)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
    /// Directory for a daily rolling log file. Logs go to stderr when unset.
    #[setters(strip_option)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), dir: None }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
#[setters(into)]
pub struct HostconConfig {
    pub host: HostKind,
    /// Flush the host stream after every byte.
    pub autoflush: bool,
    pub log: LogConfig,
}
