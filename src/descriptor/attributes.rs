use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ATT_ID: &str = "id";
pub const ATT_COMMAND_ID: &str = "commandId";
pub const ATT_LOCATION_URI: &str = "locationURI";
pub const ATT_LABEL: &str = "label";
pub const ATT_TOOLTIP: &str = "tooltip";
pub const ATT_MNEMONIC: &str = "mnemonic";
pub const ATT_ICON: &str = "icon";
pub const ATT_STYLE: &str = "style";
pub const ATT_NAME: &str = "name";
pub const ATT_VALUE: &str = "value";
pub const ATT_VISIBLE: &str = "visible";
pub const ATT_VISIBLE_WHEN: &str = "visibleWhen";
pub const ATT_CLASS: &str = "class";

/// Raw string attributes of a descriptor, kept sorted by key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    inner: BTreeMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Returns the attribute, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.inner.iter()
    }
}
