use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use super::command::Command;
use crate::descriptor::ContributionDescriptor;
use crate::services::ServiceLocator;
use crate::types::identifiers::{IconRef, PredicateRef};

/// Tag on hidden separators. They still anchor group positioning.
pub const GROUP_MARKER_TAG: &str = "org.eclipse.jface.action.GroupMarker.GroupMarker(String)";

/// Renderer class that instantiates registered tool controls.
pub const CONTROL_CONTRIBUTION_URI: &str =
    "bundleclass://org.eclipse.ui.workbench/org.eclipse.ui.internal.menus.CompatibilityWorkbenchWindowControlContribution";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Push,
    Check,
    Radio,
}

impl ItemType {
    /// `radio` and `toggle` map to their own types, anything else is a push.
    pub fn from_style(style: Option<&str>) -> Self {
        match style {
            Some("radio") => ItemType::Radio,
            Some("toggle") => ItemType::Check,
            _ => ItemType::Push,
        }
    }
}

/// Fields every model element carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<PredicateRef>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_uri: Option<String>,
    pub visible: bool,
    pub to_be_rendered: bool,
}

impl ElementData {
    pub fn new(element_id: Option<&str>) -> Self {
        Self {
            element_id: element_id.map(str::to_string),
            label: None,
            icon: None,
            tooltip: None,
            visible_when: None,
            tags: BTreeSet::new(),
            parameters: IndexMap::new(),
            contributor_uri: None,
            visible: true,
            to_be_rendered: true,
        }
    }
}

/// A menu or tool item that executes a command.
#[derive(Debug, Clone, Serialize)]
pub struct HandledItem {
    #[serde(flatten)]
    pub data: ElementData,
    pub command: Arc<Command>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<char>,
    pub item_type: ItemType,
}

/// A pull-down menu. Its items arrive through its own contribution record.
#[derive(Debug, Clone, Serialize)]
pub struct Submenu {
    #[serde(flatten)]
    pub data: ElementData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<char>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolControl {
    #[serde(flatten)]
    pub data: ElementData,
    pub contribution_uri: String,
}

/// What the renderer hands a dynamic item's generator.
#[derive(Clone)]
pub struct DynamicContext {
    pub services: Arc<dyn ServiceLocator>,
}

/// The concrete item a dynamic element expands to at render time.
#[derive(Clone)]
pub struct DynamicContributionItem {
    pub id: Option<String>,
    pub class: Option<String>,
    pub source: Arc<ContributionDescriptor>,
    pub services: Arc<dyn ServiceLocator>,
}

impl fmt::Debug for DynamicContributionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicContributionItem")
            .field("id", &self.id)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

pub type ItemGenerator = Arc<dyn Fn(&DynamicContext) -> DynamicContributionItem + Send + Sync>;

/// A menu entry whose contents are computed on demand by the renderer.
#[derive(Clone, Serialize)]
pub struct DynamicItem {
    #[serde(flatten)]
    pub data: ElementData,
    #[serde(skip)]
    pub generator: ItemGenerator,
}

impl DynamicItem {
    pub fn generate(&self, context: &DynamicContext) -> DynamicContributionItem {
        (self.generator)(context)
    }
}

impl fmt::Debug for DynamicItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicItem")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ModelElement {
    MenuItem(HandledItem),
    ToolItem(HandledItem),
    MenuSeparator(ElementData),
    ToolSeparator(ElementData),
    Submenu(Submenu),
    ToolBar(ElementData),
    Dynamic(DynamicItem),
    ToolControl(ToolControl),
}

impl ModelElement {
    pub fn data(&self) -> &ElementData {
        match self {
            ModelElement::MenuItem(item) | ModelElement::ToolItem(item) => &item.data,
            ModelElement::MenuSeparator(data)
            | ModelElement::ToolSeparator(data)
            | ModelElement::ToolBar(data) => data,
            ModelElement::Submenu(menu) => &menu.data,
            ModelElement::Dynamic(item) => &item.data,
            ModelElement::ToolControl(control) => &control.data,
        }
    }

    pub fn element_id(&self) -> Option<&str> {
        self.data().element_id.as_deref()
    }

    pub fn command(&self) -> Option<&Arc<Command>> {
        match self {
            ModelElement::MenuItem(item) | ModelElement::ToolItem(item) => Some(&item.command),
            _ => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(
            self,
            ModelElement::MenuSeparator(_) | ModelElement::ToolSeparator(_)
        )
    }
}
