use std::collections::{BTreeSet, HashMap};

use crate::model::task::DEFAULT_PROJECT;

/// Accent colors for project columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectColor {
    Gray,
    Sky,
    Violet,
    Emerald,
    Amber,
    Indigo,
    Rose,
    Teal,
    Lime,
}

/// Assignable colors in palette order (gray is reserved for uncategorized)
const PALETTE: [ProjectColor; 8] = [
    ProjectColor::Sky,
    ProjectColor::Violet,
    ProjectColor::Emerald,
    ProjectColor::Amber,
    ProjectColor::Indigo,
    ProjectColor::Rose,
    ProjectColor::Teal,
    ProjectColor::Lime,
];

impl ProjectColor {
    pub fn name(self) -> &'static str {
        match self {
            ProjectColor::Gray => "gray",
            ProjectColor::Sky => "sky",
            ProjectColor::Violet => "violet",
            ProjectColor::Emerald => "emerald",
            ProjectColor::Amber => "amber",
            ProjectColor::Indigo => "indigo",
            ProjectColor::Rose => "rose",
            ProjectColor::Teal => "teal",
            ProjectColor::Lime => "lime",
        }
    }

    /// xterm-256 foreground index
    pub fn ansi_index(self) -> u8 {
        match self {
            ProjectColor::Gray => 245,
            ProjectColor::Sky => 117,
            ProjectColor::Violet => 141,
            ProjectColor::Emerald => 42,
            ProjectColor::Amber => 214,
            ProjectColor::Indigo => 99,
            ProjectColor::Rose => 204,
            ProjectColor::Teal => 37,
            ProjectColor::Lime => 148,
        }
    }

    /// Wrap `text` in the ANSI escape for this color
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[38;5;{}m{}\x1b[0m", self.ansi_index(), text)
    }
}

/// Fixed colors for well-known project names
fn known_color(project: &str) -> Option<ProjectColor> {
    match project {
        "" | DEFAULT_PROJECT => Some(ProjectColor::Gray),
        "Personal" => Some(ProjectColor::Sky),
        "Work" => Some(ProjectColor::Violet),
        "Health" => Some(ProjectColor::Emerald),
        "Shopping" => Some(ProjectColor::Amber),
        "Learning" => Some(ProjectColor::Indigo),
        "Travel" => Some(ProjectColor::Rose),
        "Home" => Some(ProjectColor::Teal),
        "Finance" => Some(ProjectColor::Lime),
        _ => None,
    }
}

/// Hands out colors to project names. The history of handed-out colors lives
/// here, so two palettes fed the same sequence of names agree on every color.
#[derive(Debug, Clone, Default)]
pub struct ProjectPalette {
    used: BTreeSet<ProjectColor>,
    assigned: HashMap<String, ProjectColor>,
}

impl ProjectPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `project`. Known names get fixed colors; other names hash
    /// into the colors not yet handed out, and keep that color afterwards.
    /// Once every color is in use the history starts over.
    pub fn color_for(&mut self, project: &str) -> ProjectColor {
        if let Some(color) = known_color(project) {
            return color;
        }
        if let Some(&color) = self.assigned.get(project) {
            return color;
        }

        let mut available: Vec<ProjectColor> = PALETTE
            .iter()
            .copied()
            .filter(|c| !self.used.contains(c))
            .collect();
        if available.is_empty() {
            self.used.clear();
            available = PALETTE.to_vec();
        }

        // Sum of UTF-16 code units, so astral characters count as two
        let hash: usize = project.encode_utf16().map(usize::from).sum();
        let color = available[hash % available.len()];
        self.used.insert(color);
        self.assigned.insert(project.to_string(), color);
        color
    }
}
