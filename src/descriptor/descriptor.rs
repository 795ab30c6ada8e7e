use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::attributes::{
    Attributes, ATT_CLASS, ATT_COMMAND_ID, ATT_ICON, ATT_LABEL, ATT_LOCATION_URI, ATT_MNEMONIC,
    ATT_NAME, ATT_STYLE, ATT_TOOLTIP, ATT_VALUE, ATT_VISIBLE, ATT_VISIBLE_WHEN,
};
use crate::types::identifiers::{DescriptorFingerprint, OriginKey};

/// The declarative vocabulary of a contribution tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DescriptorKind {
    /// Root of a subtree; carries the `locationURI` attribute.
    Addition,
    Command,
    Separator,
    Submenu,
    Toolbar,
    Dynamic,
    Control,
    Parameter,
}

impl DescriptorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorKind::Addition => "addition",
            DescriptorKind::Command => "command",
            DescriptorKind::Separator => "separator",
            DescriptorKind::Submenu => "submenu",
            DescriptorKind::Toolbar => "toolbar",
            DescriptorKind::Dynamic => "dynamic",
            DescriptorKind::Control => "control",
            DescriptorKind::Parameter => "parameter",
        }
    }
}

/// One node of an already validated contribution tree.
/// Read-only to the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDescriptor {
    pub kind: DescriptorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<ContributionDescriptor>,
    /// Name of the contributing bundle.
    #[serde(default)]
    pub source_location: String,
}

impl ContributionDescriptor {
    pub fn new(kind: DescriptorKind) -> Self {
        Self {
            kind,
            id: None,
            attributes: Attributes::new(),
            children: Vec::new(),
            source_location: String::new(),
        }
    }

    pub fn addition(location_uri: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Addition).with_attribute(ATT_LOCATION_URI, location_uri)
    }

    pub fn command(id: impl Into<String>, command_id: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Command)
            .with_id(id)
            .with_attribute(ATT_COMMAND_ID, command_id)
    }

    pub fn separator(name: impl Into<String>, visible: bool) -> Self {
        Self::new(DescriptorKind::Separator)
            .with_attribute(ATT_NAME, name)
            .with_attribute(ATT_VISIBLE, visible.to_string())
    }

    pub fn submenu(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Submenu)
            .with_id(id)
            .with_attribute(ATT_LABEL, label)
    }

    pub fn toolbar(id: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Toolbar).with_id(id)
    }

    pub fn dynamic(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Dynamic)
            .with_id(id)
            .with_attribute(ATT_CLASS, class)
    }

    pub fn control(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Control)
            .with_id(id)
            .with_attribute(ATT_CLASS, class)
    }

    pub fn parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Parameter)
            .with_attribute(ATT_NAME, name)
            .with_attribute(ATT_VALUE, value)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_child(mut self, child: ContributionDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_source(mut self, source_location: impl Into<String>) -> Self {
        self.source_location = source_location.into();
        self
    }

    /// Element id: the declared id, else the command id.
    pub fn element_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.command_id())
    }

    pub fn command_id(&self) -> Option<&str> {
        self.attributes.get(ATT_COMMAND_ID)
    }

    pub fn location_uri(&self) -> Option<&str> {
        self.attributes.get(ATT_LOCATION_URI)
    }

    pub fn label(&self) -> Option<&str> {
        self.attributes.get(ATT_LABEL)
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.attributes.get(ATT_TOOLTIP)
    }

    pub fn mnemonic(&self) -> Option<char> {
        self.attributes.get(ATT_MNEMONIC).and_then(|m| m.chars().next())
    }

    pub fn icon_path(&self) -> Option<&str> {
        self.attributes.get(ATT_ICON)
    }

    pub fn style(&self) -> Option<&str> {
        self.attributes.get(ATT_STYLE)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get(ATT_NAME)
    }

    pub fn class(&self) -> Option<&str> {
        self.attributes.get(ATT_CLASS)
    }

    pub fn visible_when(&self) -> Option<&str> {
        self.attributes.get(ATT_VISIBLE_WHEN)
    }

    /// Separators are hidden unless they say `visible="true"`.
    pub fn is_separator_visible(&self) -> bool {
        self.attributes
            .get(ATT_VISIBLE)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn children_of(&self, kind: DescriptorKind) -> impl Iterator<Item = &ContributionDescriptor> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// `Parameter` children as an ordered name/value map.
    pub fn parameters(&self) -> IndexMap<String, String> {
        self.children_of(DescriptorKind::Parameter)
            .filter_map(|p| {
                let name = p.name()?;
                let value = p.attributes.get(ATT_VALUE).unwrap_or_default();
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Hash over kind, id, attributes, source and children, in order.
    pub fn fingerprint(&self) -> DescriptorFingerprint {
        let mut hasher = Sha256::new();
        self.feed(&mut hasher);
        DescriptorFingerprint::from_digest(hasher)
    }

    fn feed(&self, hasher: &mut Sha256) {
        hasher.update(self.kind.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.id.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
        for (key, value) in self.attributes.iter() {
            let line = format!("{key}={value}");
            hasher.update(line.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(self.source_location.as_bytes());
        hasher.update((self.children.len() as u64).to_le_bytes());
        for child in &self.children {
            child.feed(hasher);
        }
    }

    /// Dedup key of a root subtree: id (or fingerprint) plus raw location.
    pub fn origin_key(&self) -> OriginKey {
        let location = self.location_uri().unwrap_or_default();
        match self.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => OriginKey::new(id, location),
            None => OriginKey::new(self.fingerprint().as_str(), location),
        }
    }
}
