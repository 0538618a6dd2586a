use serde::{Deserialize, Serialize};

use super::task::DEFAULT_PROJECT;

/// Configuration from `.questboard/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub board: BoardInfo,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub projects: ProjectsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Indentation unit used when no line in the input is indented
    #[serde(default = "default_fallback_unit")]
    pub fallback_unit: usize,
    /// Project given to root tasks created from text
    #[serde(default = "default_project")]
    pub default_project: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            fallback_unit: default_fallback_unit(),
            default_project: default_project(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Project columns, in display order
    #[serde(default = "default_project_names")]
    pub names: Vec<String>,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        ProjectsConfig {
            names: default_project_names(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Emit ANSI colors for project headings
    #[serde(default)]
    pub color: bool,
    /// Width of one board column in terminal cells
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// How many characters of each id to print (0 hides ids)
    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            color: false,
            column_width: default_column_width(),
            id_length: default_id_length(),
        }
    }
}

fn default_fallback_unit() -> usize {
    4
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

fn default_project_names() -> Vec<String> {
    vec![DEFAULT_PROJECT.to_string()]
}

fn default_column_width() -> usize {
    36
}

fn default_id_length() -> usize {
    8
}
