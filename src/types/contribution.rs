use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::ModelElement;
use crate::types::identifiers::{OriginKey, PredicateRef};

/// Which of the three output sequences a record belongs to.
/// Also the namespace of the container it targets: a menu and a toolbar
/// with the same id are different containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    Menu,
    ToolBar,
    Trim,
}

/// One routed, positioned attachment of model elements to a named container.
#[derive(Debug, Clone, Serialize)]
pub struct Contribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    pub kind: ContributionKind,
    pub parent_id: String,
    pub position_in_parent: String,
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<PredicateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_uri: Option<String>,
    pub children: Vec<ModelElement>,

    /// The descriptor subtree this record came from. Not part of the
    /// published model.
    #[serde(skip)]
    pub origin: OriginKey,
}

impl Contribution {
    pub fn new(
        kind: ContributionKind,
        parent_id: impl Into<String>,
        position_in_parent: impl Into<String>,
        origin: OriginKey,
    ) -> Self {
        Self {
            element_id: None,
            kind,
            parent_id: parent_id.into(),
            position_in_parent: position_in_parent.into(),
            tags: BTreeSet::new(),
            visible_when: None,
            contributor_uri: None,
            children: Vec::new(),
            origin,
        }
    }
}

/// The output of a merge: three independent, ordered record sequences.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergedContributions {
    pub menu: Vec<Contribution>,
    pub toolbar: Vec<Contribution>,
    pub trim: Vec<Contribution>,
}

impl MergedContributions {
    pub fn push(&mut self, contribution: Contribution) {
        match contribution.kind {
            ContributionKind::Menu => self.menu.push(contribution),
            ContributionKind::ToolBar => self.toolbar.push(contribution),
            ContributionKind::Trim => self.trim.push(contribution),
        }
    }

    /// Drops every record produced by `origin`, returning how many went.
    pub fn remove_origin(&mut self, origin: &OriginKey) -> usize {
        let before = self.len();
        self.menu.retain(|c| &c.origin != origin);
        self.toolbar.retain(|c| &c.origin != origin);
        self.trim.retain(|c| &c.origin != origin);
        before - self.len()
    }

    pub fn len(&self) -> usize {
        self.menu.len() + self.toolbar.len() + self.trim.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counters describing the outcome of one merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub descriptors_considered: usize,
    pub descriptors_merged: usize,
    pub descriptors_already_merged: usize,
    pub descriptors_exempted: usize,
    pub descriptors_failed: usize,
    pub records_published: usize,
}
