use std::sync::Arc;

use thiserror::Error;
use tracing::{trace, warn};

use crate::descriptor::{ContributionDescriptor, DescriptorKind};
use crate::model::element::{
    DynamicContext, DynamicContributionItem, DynamicItem, ElementData, HandledItem, ItemGenerator, ItemType,
    Submenu, ToolControl, CONTROL_CONTRIBUTION_URI, GROUP_MARKER_TAG,
};
use crate::model::{CommandRegistry, ControlRegistry, ModelElement};
use crate::services::{ExpressionPredicates, IconService, NoIcons, PredicateCompiler};
use crate::types::identifiers::{IconRef, PredicateRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Command item {0:?} has no commandId")]
    MissingCommandId(Option<String>),
    #[error("{0} descriptor has no id")]
    MissingId(&'static str),
}

/// The kind of container the built element will live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Menu,
    ToolBar,
    Trim,
}

/// Turns single descriptors into model elements.
///
/// Command synthesis and control registration go through the registries it
/// borrows; nothing else is mutated.
pub struct ElementBuilder<'a> {
    commands: &'a CommandRegistry,
    controls: &'a ControlRegistry,
    icons: &'a dyn IconService,
    predicates: &'a dyn PredicateCompiler,
}

impl<'a> ElementBuilder<'a> {
    pub fn new(commands: &'a CommandRegistry, controls: &'a ControlRegistry) -> Self {
        Self {
            commands,
            controls,
            icons: &NoIcons,
            predicates: &ExpressionPredicates,
        }
    }

    pub fn with_icons(mut self, icons: &'a dyn IconService) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_predicates(mut self, predicates: &'a dyn PredicateCompiler) -> Self {
        self.predicates = predicates;
        self
    }

    /// Builds the element for `descriptor` under `host`.
    ///
    /// Combinations the host cannot hold (a submenu on a toolbar, a control
    /// in a menu) yield `Ok(None)`.
    pub fn build(
        &self,
        descriptor: &ContributionDescriptor,
        host: Host,
        filter: Option<&str>,
    ) -> Result<Option<ModelElement>, BuildError> {
        let element = match (descriptor.kind, host) {
            (DescriptorKind::Command, Host::Menu) => ModelElement::MenuItem(self.menu_item(descriptor)?),
            (DescriptorKind::Command, Host::ToolBar) => ModelElement::ToolItem(self.tool_item(descriptor)?),
            (DescriptorKind::Separator, Host::Menu) => {
                ModelElement::MenuSeparator(self.menu_separator(descriptor))
            }
            (DescriptorKind::Separator, Host::ToolBar) => {
                ModelElement::ToolSeparator(self.tool_separator(descriptor))
            }
            (DescriptorKind::Submenu, Host::Menu) => ModelElement::Submenu(self.submenu(descriptor, filter)),
            (DescriptorKind::Dynamic, Host::Menu) => ModelElement::Dynamic(self.dynamic_item(descriptor)),
            (DescriptorKind::Control, Host::ToolBar) => {
                ModelElement::ToolControl(self.tool_control(descriptor)?)
            }
            (DescriptorKind::Toolbar, Host::Trim) => ModelElement::ToolBar(self.toolbar(descriptor)?),
            (kind, host) => {
                trace!(kind = kind.as_str(), ?host, id = ?descriptor.element_id(), "no element for host");
                return Ok(None);
            }
        };
        Ok(Some(element))
    }

    /// Builds every child of `parent` in order. Children that fail are
    /// logged and left out; the rest are kept.
    pub fn build_children(
        &self,
        parent: &ContributionDescriptor,
        host: Host,
        filter: Option<&str>,
    ) -> Vec<ModelElement> {
        let mut elements = Vec::with_capacity(parent.children.len());
        for child in &parent.children {
            match self.build(child, host, filter) {
                Ok(Some(element)) => elements.push(element),
                Ok(None) => {}
                Err(err) => warn!(
                    parent = ?parent.element_id(),
                    kind = child.kind.as_str(),
                    error = %err,
                    "dropping contribution element",
                ),
            }
        }
        elements
    }

    pub fn visible_when(&self, descriptor: &ContributionDescriptor) -> Option<PredicateRef> {
        descriptor
            .visible_when()
            .map(|expression| self.predicates.compile(expression))
    }

    fn base(&self, descriptor: &ContributionDescriptor, element_id: Option<&str>) -> ElementData {
        let mut data = ElementData::new(element_id);
        data.contributor_uri = contributor_uri(descriptor);
        data
    }

    fn handled_item(&self, descriptor: &ContributionDescriptor) -> Result<HandledItem, BuildError> {
        let command_id = descriptor.command_id().ok_or_else(|| {
            BuildError::MissingCommandId(descriptor.element_id().map(str::to_string))
        })?;
        let command = self.commands.resolve_or_synthesize(command_id);

        let mut data = self.base(descriptor, descriptor.element_id());
        data.parameters = descriptor.parameters();
        data.tooltip = descriptor.tooltip().map(str::to_string);
        data.visible_when = self.visible_when(descriptor);

        Ok(HandledItem {
            data,
            command,
            mnemonic: None,
            item_type: ItemType::from_style(descriptor.style()),
        })
    }

    /// Menu items: explicit icon, then the icon registered for the element
    /// id. The label is always set.
    fn menu_item(&self, descriptor: &ContributionDescriptor) -> Result<HandledItem, BuildError> {
        let mut item = self.handled_item(descriptor)?;

        item.data.icon = explicit_icon(descriptor).or_else(|| {
            item.data
                .element_id
                .as_deref()
                .and_then(|id| self.icons.icon_for_element(id))
        });
        item.data.label = descriptor.label().map(str::to_string);
        item.mnemonic = descriptor.mnemonic();
        Ok(item)
    }

    /// Tool items: explicit icon, then by command id, then by element id.
    /// Only an item left without any icon shows its label.
    fn tool_item(&self, descriptor: &ContributionDescriptor) -> Result<HandledItem, BuildError> {
        let mut item = self.handled_item(descriptor)?;

        if let Some(icon) = explicit_icon(descriptor) {
            item.data.icon = Some(icon);
            return Ok(item);
        }

        let looked_up = self
            .icons
            .icon_for_command(&item.command.id)
            .or_else(|| {
                item.data
                    .element_id
                    .as_deref()
                    .and_then(|id| self.icons.icon_for_element(id))
            });
        match looked_up {
            Some(icon) => item.data.icon = Some(icon),
            None => item.data.label = descriptor.label().map(str::to_string),
        }
        Ok(item)
    }

    fn menu_separator(&self, descriptor: &ContributionDescriptor) -> ElementData {
        let mut data = self.base(descriptor, descriptor.name());
        if !descriptor.is_separator_visible() {
            data.visible = false;
            data.tags.insert(GROUP_MARKER_TAG.to_string());
        }
        data
    }

    fn tool_separator(&self, descriptor: &ContributionDescriptor) -> ElementData {
        let mut data = self.base(descriptor, descriptor.name());
        if !descriptor.is_separator_visible() {
            data.to_be_rendered = false;
            data.tags.insert(GROUP_MARKER_TAG.to_string());
        }
        data
    }

    fn submenu(&self, descriptor: &ContributionDescriptor, filter: Option<&str>) -> Submenu {
        let mut data = self.base(descriptor, descriptor.element_id());
        data.label = descriptor.label().map(str::to_string);
        data.icon = explicit_icon(descriptor);
        data.visible_when = self.visible_when(descriptor);
        if let Some(filter) = filter {
            data.tags.insert(filter.to_string());
        }
        Submenu {
            data,
            mnemonic: descriptor.mnemonic(),
        }
    }

    /// Wires the generator only. The renderer calls it.
    fn dynamic_item(&self, descriptor: &ContributionDescriptor) -> DynamicItem {
        let data = self.base(descriptor, descriptor.element_id());
        let source = Arc::new(descriptor.clone());
        let id = descriptor.element_id().map(str::to_string);

        let generator: ItemGenerator = Arc::new(move |context: &DynamicContext| DynamicContributionItem {
            id: id.clone(),
            class: source.class().map(str::to_string),
            source: source.clone(),
            services: context.services.clone(),
        });

        DynamicItem { data, generator }
    }

    fn tool_control(&self, descriptor: &ContributionDescriptor) -> Result<ToolControl, BuildError> {
        let id = descriptor
            .element_id()
            .ok_or(BuildError::MissingId(DescriptorKind::Control.as_str()))?;
        self.controls.register(id, Arc::new(descriptor.clone()));

        Ok(ToolControl {
            data: self.base(descriptor, Some(id)),
            contribution_uri: CONTROL_CONTRIBUTION_URI.to_string(),
        })
    }

    fn toolbar(&self, descriptor: &ContributionDescriptor) -> Result<ElementData, BuildError> {
        let id = descriptor
            .element_id()
            .ok_or(BuildError::MissingId(DescriptorKind::Toolbar.as_str()))?;
        Ok(self.base(descriptor, Some(id)))
    }
}

pub fn contributor_uri(descriptor: &ContributionDescriptor) -> Option<String> {
    if descriptor.source_location.is_empty() {
        None
    } else {
        Some(format!("platform:/plugin/{}", descriptor.source_location))
    }
}

/// The descriptor's own icon, resolved against its contributor when the
/// path is relative.
fn explicit_icon(descriptor: &ContributionDescriptor) -> Option<IconRef> {
    let path = descriptor.icon_path()?;
    if path.contains(':') || descriptor.source_location.is_empty() {
        return Some(IconRef::new(path));
    }
    Some(IconRef::new(format!(
        "platform:/plugin/{}/{}",
        descriptor.source_location,
        path.trim_start_matches('/')
    )))
}
