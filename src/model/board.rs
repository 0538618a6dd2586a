use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config::BoardConfig;
use super::task::Task;

/// The task forest as held between CLI invocations (`board.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Root tasks, each a full subtree
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// RFC 3339 timestamp of the last save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// A fully loaded board directory
#[derive(Debug)]
pub struct Session {
    /// Directory containing `.questboard/`
    pub root: PathBuf,
    /// Path to the `.questboard/` directory
    pub board_dir: PathBuf,
    /// Parsed config.toml
    pub config: BoardConfig,
    pub board: Board,
}
