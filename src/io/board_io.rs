use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::board::{Board, Session};
use crate::model::config::BoardConfig;

/// Name of the per-board state directory
pub const BOARD_DIR: &str = ".questboard";
pub const CONFIG_FILE: &str = "config.toml";
pub const BOARD_FILE: &str = "board.json";

/// Error type for board I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not a questboard directory: no .questboard/ found (run `qb init`)")]
    NotABoard,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("could not parse board.json: {0}")]
    SnapshotParseError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the board by walking up from the given directory, looking for
/// a `.questboard/` subdirectory holding a config file.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join(BOARD_DIR);
        if board_dir.is_dir() && board_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BoardError::NotABoard);
        }
    }
}

/// Load config and task snapshot from the given root directory.
/// A missing `board.json` is an empty board.
pub fn load_session(root: &Path) -> Result<Session, BoardError> {
    let board_dir = root.join(BOARD_DIR);
    if !board_dir.is_dir() {
        return Err(BoardError::NotABoard);
    }

    let config_path = board_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| BoardError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;

    let board_path = board_dir.join(BOARD_FILE);
    let board = if board_path.exists() {
        let text = fs::read_to_string(&board_path).map_err(|e| BoardError::ReadError {
            path: board_path.clone(),
            source: e,
        })?;
        serde_json::from_str(&text)?
    } else {
        Board::default()
    };
    tracing::debug!(root = %root.display(), roots = board.tasks.len(), "loaded board");

    Ok(Session {
        root: root.to_path_buf(),
        board_dir,
        config,
        board,
    })
}

/// Save the task snapshot, stamping the save time
pub fn save_board(board_dir: &Path, board: &mut Board) -> Result<(), BoardError> {
    board.updated = Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
    let path = board_dir.join(BOARD_FILE);
    let content = serde_json::to_string_pretty(board)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| BoardError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "saved board");
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
