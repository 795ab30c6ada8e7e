use serde::{Deserialize, Serialize};

pub const MAIN_TOOLBAR: &str = "org.eclipse.ui.main.toolbar";
pub const TRIM_COMMAND1: &str = "org.eclipse.ui.trim.command1";
pub const TRIM_COMMAND2: &str = "org.eclipse.ui.trim.command2";
pub const TRIM_VERTICAL1: &str = "org.eclipse.ui.trim.vertical1";
pub const TRIM_VERTICAL2: &str = "org.eclipse.ui.trim.vertical2";
pub const TRIM_STATUS: &str = "org.eclipse.ui.trim.status";

/// Paths starting with this look reserved even when they are not known.
pub const TRIM_PREFIX: &str = "org.eclipse.ui.trim.";

/// A named, toolbar-adjacent slot of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimArea {
    MainToolbar,
    Command1,
    Command2,
    Vertical1,
    Vertical2,
    Status,
}

/// Window edge a trim area is laid out along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl TrimArea {
    pub const ALL: [TrimArea; 6] = [
        TrimArea::MainToolbar,
        TrimArea::Command1,
        TrimArea::Command2,
        TrimArea::Vertical1,
        TrimArea::Vertical2,
        TrimArea::Status,
    ];

    /// The reserved location path of this area.
    pub fn path(&self) -> &'static str {
        match self {
            TrimArea::MainToolbar => MAIN_TOOLBAR,
            TrimArea::Command1 => TRIM_COMMAND1,
            TrimArea::Command2 => TRIM_COMMAND2,
            TrimArea::Vertical1 => TRIM_VERTICAL1,
            TrimArea::Vertical2 => TRIM_VERTICAL2,
            TrimArea::Status => TRIM_STATUS,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            TrimArea::MainToolbar | TrimArea::Command1 | TrimArea::Command2 => Side::Top,
            TrimArea::Vertical1 => Side::Left,
            TrimArea::Vertical2 => Side::Right,
            TrimArea::Status => Side::Bottom,
        }
    }
}
