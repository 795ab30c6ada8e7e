use std::collections::BTreeMap;

use serde::Serialize;

use super::element::ModelElement;
use crate::merge::position::{resolve_query, Sibling};
use crate::types::{Contribution, ContributionKind, MergedContributions};

/// Containers are addressed by parent id within a kind namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ContainerKey {
    pub kind: ContributionKind,
    pub parent_id: String,
}

impl ContainerKey {
    pub fn new(kind: ContributionKind, parent_id: impl Into<String>) -> Self {
        Self {
            kind,
            parent_id: parent_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    element: ModelElement,
    placed_by: Option<String>,
}

impl Sibling for Slot {
    fn sibling_id(&self) -> Option<&str> {
        self.element.element_id()
    }

    fn placed_by(&self) -> Option<&str> {
        self.placed_by.as_deref()
    }

    fn is_group_boundary(&self) -> bool {
        self.element.is_separator()
    }
}

/// An ordered element list that contributions are resolved into.
#[derive(Debug, Clone)]
pub struct Container {
    key: ContainerKey,
    slots: Vec<Slot>,
}

impl Container {
    pub fn new(key: ContainerKey) -> Self {
        Self {
            key,
            slots: Vec::new(),
        }
    }

    pub fn key(&self) -> &ContainerKey {
        &self.key
    }

    /// Appends authored elements that were not placed by a contribution.
    pub fn push(&mut self, element: ModelElement) {
        self.slots.push(Slot {
            element,
            placed_by: None,
        });
    }

    /// Moves the contribution's children in at its position, keeping their
    /// relative order. Returns the index of the first inserted child.
    pub fn insert_contribution(&mut self, contribution: Contribution) -> usize {
        let index = resolve_query(&self.slots, &contribution.position_in_parent);
        let position = contribution.position_in_parent;
        for (offset, element) in contribution.children.into_iter().enumerate() {
            self.slots.insert(
                index + offset,
                Slot {
                    element,
                    placed_by: Some(position.clone()),
                },
            );
        }
        index
    }

    pub fn children(&self) -> impl Iterator<Item = &ModelElement> {
        self.slots.iter().map(|slot| &slot.element)
    }

    pub fn ids(&self) -> Vec<Option<&str>> {
        self.children().map(ModelElement::element_id).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Every container touched so far. Unknown targets get an empty
/// placeholder container on first use.
#[derive(Debug, Clone, Default)]
pub struct ContainerSet {
    containers: BTreeMap<ContainerKey, Container>,
}

impl ContainerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container_mut(&mut self, key: ContainerKey) -> &mut Container {
        self.containers
            .entry(key.clone())
            .or_insert_with(|| Container::new(key))
    }

    pub fn get(&self, kind: ContributionKind, parent_id: &str) -> Option<&Container> {
        self.containers.get(&ContainerKey::new(kind, parent_id))
    }

    pub fn apply(&mut self, contribution: Contribution) -> usize {
        let key = ContainerKey::new(contribution.kind, contribution.parent_id.clone());
        self.container_mut(key).insert_contribution(contribution)
    }

    /// Consumes a merge result. Trim records go first so the toolbars they
    /// create exist before toolbar records fill them.
    pub fn apply_all(&mut self, merged: MergedContributions) {
        let MergedContributions {
            menu,
            toolbar,
            trim,
        } = merged;
        for contribution in trim.into_iter().chain(menu).chain(toolbar) {
            self.apply(contribution);
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
