use std::fs;
use std::path::Path;

use crate::io::board_io::{BoardError, CONFIG_FILE};
use crate::model::config::BoardConfig;

/// Read the board config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(board_dir: &Path) -> Result<(BoardConfig, toml_edit::DocumentMut), BoardError> {
    let config_path = board_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| BoardError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(board_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), BoardError> {
    let config_path = board_dir.join(CONFIG_FILE);
    fs::write(&config_path, doc.to_string()).map_err(|e| BoardError::WriteError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Append a project column to `[projects] names`. Returns false if the
/// project is already listed.
pub fn add_project_to_config(doc: &mut toml_edit::DocumentMut, project: &str) -> bool {
    if !doc.contains_key("projects") {
        doc["projects"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    if doc["projects"].get("names").and_then(|n| n.as_array()).is_none() {
        let mut names = toml_edit::Array::new();
        names.push(crate::model::task::DEFAULT_PROJECT);
        doc["projects"]["names"] = toml_edit::value(names);
    }

    let Some(names) = doc["projects"]["names"].as_array_mut() else {
        return false;
    };
    if names.iter().any(|v| v.as_str() == Some(project)) {
        return false;
    }
    names.push(project);
    true
}
