use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::board_io::{self, BOARD_DIR, CONFIG_FILE};
use crate::model::board::Board;

const CONFIG_TEMPLATE: &str = r##"[board]
name = "{name}"

# How pasted outlines are read. The indentation unit is detected from the
# text; fallback_unit is used when every line is flush left.
[parser]
fallback_unit = 4
default_project = "Uncategorized"

# Project columns, in display order. `qb project <ID> <NAME>` appends new ones.
[projects]
names = ["Uncategorized"]

[ui]
color = false
column_width = 36
id_length = 8
"##;

/// Infer a board name from a directory name: hyphens and underscores become
/// spaces, words are title-cased.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_config(name: &str) -> String {
    CONFIG_TEMPLATE.replace("{name}", &name.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => Path::new(d).to_path_buf(),
        None => std::env::current_dir()?,
    };
    let board_dir = root.join(BOARD_DIR);

    if board_dir.join(CONFIG_FILE).exists() && !args.force {
        return Err(format!(
            "board already exists in {} (use --force to reinitialize)",
            board_dir.display()
        )
        .into());
    }

    // Warn about an enclosing board; the new one shadows it
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = board_io::discover_board(parent)
    {
        eprintln!(
            "note: enclosing board found at {}/",
            parent_root.join(BOARD_DIR).display()
        );
    }

    let name = args.name.unwrap_or_else(|| {
        root.canonicalize()
            .ok()
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    fs::create_dir_all(&board_dir)?;
    fs::write(board_dir.join(CONFIG_FILE), render_config(&name))?;
    board_io::save_board(&board_dir, &mut Board::default())?;
    tracing::info!(board = %board_dir.display(), "initialized board");

    println!("Initialized questboard: {}", name);
    Ok(())
}
