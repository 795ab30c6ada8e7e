//! Reserved location paths: trim areas, the popup wildcard and legacy
//! contributions that are dropped instead of merged.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::descriptor::{ContributionDescriptor, DescriptorKind};
use crate::location::trim::TRIM_PREFIX;
use crate::location::{LocationExpression, TrimArea};

pub const POPUP_WILDCARD: &str = "org.eclipse.ui.popup.any";
pub const POPUP_TARGET: &str = "popup";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A subtree that is dropped instead of merged: declared exactly at
/// `location`, with a single submenu child whose id is `submenu_id`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LegacyExemption {
    pub location: String,
    pub submenu_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeConfig {
    /// Toolbar-scheme paths that route to a trim area.
    pub trim_areas: BTreeMap<String, TrimArea>,
    /// Paths with this prefix that are not in `trim_areas` are rejected.
    pub trim_prefix: String,
    pub popup_wildcard: String,
    pub popup_target: String,
    pub exemptions: Vec<LegacyExemption>,
}

impl MergeConfig {
    pub fn v0() -> Self {
        Self {
            trim_areas: TrimArea::ALL
                .iter()
                .map(|area| (area.path().to_string(), *area))
                .collect(),
            trim_prefix: TRIM_PREFIX.into(),
            popup_wildcard: POPUP_WILDCARD.into(),
            popup_target: POPUP_TARGET.into(),
            exemptions: vec![LegacyExemption {
                location: "menu:help?after=additions".into(),
                submenu_id: "org.eclipse.update.ui.updateMenu".into(),
            }],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(f)?)
    }

    pub fn trim_area(&self, path: &str) -> Option<TrimArea> {
        self.trim_areas.get(path).copied()
    }

    pub fn looks_like_trim_area(&self, path: &str) -> bool {
        !self.trim_prefix.is_empty() && path.starts_with(&self.trim_prefix)
    }

    /// Parent id for a menu contribution, with the popup wildcard rewritten.
    pub fn parent_id_for<'a>(&'a self, location: &'a LocationExpression) -> &'a str {
        if location.path() == self.popup_wildcard {
            &self.popup_target
        } else {
            location.path()
        }
    }

    pub fn is_exempt(&self, location: &LocationExpression, root: &ContributionDescriptor) -> bool {
        let mut submenus = root.children_of(DescriptorKind::Submenu);
        let only = match (submenus.next(), submenus.next()) {
            (Some(only), None) => only,
            _ => return false,
        };
        self.exemptions.iter().any(|e| {
            e.location == location.as_str() && only.element_id() == Some(e.submenu_id.as_str())
        })
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::v0()
    }
}
