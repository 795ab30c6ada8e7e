pub mod builder;
pub mod position;
pub mod resolver;

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::descriptor::{ContributionDescriptor, DescriptorKind};
use crate::location::{LocationError, LocationExpression, DEFAULT_POSITION};
use crate::services::DescriptorSource;
use crate::types::{Contribution, ContributionKind, MergeReport, MergedContributions, OriginKey};
pub use builder::{contributor_uri, BuildError, ElementBuilder, Host};
pub use position::{resolve_index, resolve_query, PositionDirective, Relation, Sibling};
pub use resolver::{classify, ContainerKind, ResolveError};

/// Filter tag of ordinary menu contributions.
pub const MC_MENU: &str = "menuContribution:menu";
/// Filter tag of popup menu contributions.
pub const MC_POPUP: &str = "menuContribution:popup";

const POPUP_SCHEME: &str = "popup";

/// Why one descriptor subtree was dropped. Never aborts a merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContributionError {
    #[error("Descriptor is a {0}, expected an addition root")]
    NotAnAddition(&'static str),
    #[error("Addition has no locationURI")]
    MissingLocation,
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Descriptor source is empty")]
    EmptySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged { records: usize },
    AlreadyMerged,
    Exempted,
}

/// Merges addition subtrees into the three contribution sequences.
///
/// The merger remembers which subtrees it has merged, so feeding it the
/// same descriptors again adds nothing. Not reentrant: one pass at a time,
/// enforced by `&mut self`.
pub struct ContributionMerger<'a> {
    config: MergeConfig,
    builder: ElementBuilder<'a>,
    output: MergedContributions,
    merged: BTreeSet<OriginKey>,
}

impl<'a> ContributionMerger<'a> {
    pub fn new(config: MergeConfig, builder: ElementBuilder<'a>) -> Self {
        Self {
            config,
            builder,
            output: MergedContributions::default(),
            merged: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merges every descriptor the source lists. Per-descriptor failures
    /// are logged and counted; only an empty source is an error.
    pub fn merge_all<S>(&mut self, source: &S) -> Result<MergeReport, MergeError>
    where
        S: DescriptorSource + ?Sized,
    {
        let descriptors = source.list();
        if descriptors.is_empty() {
            return Err(MergeError::EmptySource);
        }

        let mut report = MergeReport {
            descriptors_considered: descriptors.len(),
            ..MergeReport::default()
        };

        for descriptor in descriptors {
            match self.merge(descriptor) {
                Ok(MergeOutcome::Merged { records }) => {
                    report.descriptors_merged += 1;
                    report.records_published += records;
                }
                Ok(MergeOutcome::AlreadyMerged) => report.descriptors_already_merged += 1,
                Ok(MergeOutcome::Exempted) => report.descriptors_exempted += 1,
                Err(err) => {
                    warn!(
                        location = ?descriptor.location_uri(),
                        id = ?descriptor.id,
                        error = %err,
                        "skipping contribution",
                    );
                    report.descriptors_failed += 1;
                }
            }
        }

        info!(
            considered = report.descriptors_considered,
            merged = report.descriptors_merged,
            failed = report.descriptors_failed,
            records = report.records_published,
            "merge pass complete",
        );
        Ok(report)
    }

    /// Merges one addition subtree. Its records are published together,
    /// or not at all.
    pub fn merge(
        &mut self,
        descriptor: &ContributionDescriptor,
    ) -> Result<MergeOutcome, ContributionError> {
        if descriptor.kind != DescriptorKind::Addition {
            return Err(ContributionError::NotAnAddition(descriptor.kind.as_str()));
        }
        let raw = descriptor
            .location_uri()
            .ok_or(ContributionError::MissingLocation)?;
        let location = LocationExpression::parse(raw)?;

        let origin = descriptor.origin_key();
        if self.merged.contains(&origin) {
            return Ok(MergeOutcome::AlreadyMerged);
        }
        if self.config.is_exempt(&location, descriptor) {
            debug!(location = %location, "dropping exempted legacy contribution");
            return Ok(MergeOutcome::Exempted);
        }

        let mut staged = Vec::new();
        match classify(&location, &self.config)? {
            ContainerKind::Trim(area) => {
                debug!(location = %location, ?area, "routing to trim area");
                self.trim_records(descriptor, &location, &origin, &mut staged);
            }
            ContainerKind::Toolbar => {
                let record = self.toolbar_record(
                    descriptor,
                    &location,
                    location.path(),
                    location.query(),
                    &origin,
                );
                staged.push(record);
            }
            ContainerKind::Menu => self.menu_records(descriptor, &location, &origin, &mut staged),
        }

        let records = staged.len();
        for contribution in staged {
            self.output.push(contribution);
        }
        self.merged.insert(origin);
        Ok(MergeOutcome::Merged { records })
    }

    /// Withdraws everything `origin` produced so it can be merged again.
    pub fn remove(&mut self, origin: &OriginKey) -> usize {
        self.merged.remove(origin);
        self.output.remove_origin(origin)
    }

    pub fn remove_descriptor(&mut self, descriptor: &ContributionDescriptor) -> usize {
        self.remove(&descriptor.origin_key())
    }

    pub fn is_merged(&self, descriptor: &ContributionDescriptor) -> bool {
        self.merged.contains(&descriptor.origin_key())
    }

    pub fn merged_menu_contributions(&self) -> &[Contribution] {
        &self.output.menu
    }

    pub fn merged_toolbar_contributions(&self) -> &[Contribution] {
        &self.output.toolbar
    }

    pub fn merged_trim_contributions(&self) -> &[Contribution] {
        &self.output.trim
    }

    pub fn output(&self) -> &MergedContributions {
        &self.output
    }

    pub fn into_output(self) -> MergedContributions {
        self.output
    }

    fn menu_records(
        &self,
        root: &ContributionDescriptor,
        location: &LocationExpression,
        origin: &OriginKey,
        staged: &mut Vec<Contribution>,
    ) {
        let parent_id = self.config.parent_id_for(location);
        let is_popup =
            location.scheme() == POPUP_SCHEME || parent_id == self.config.popup_target;
        let filter = if is_popup { MC_POPUP } else { MC_MENU };
        let scheme_tag = format!("scheme:{}", location.scheme());

        let mut contribution = Contribution::new(
            ContributionKind::Menu,
            parent_id,
            location.query(),
            origin.clone(),
        );
        contribution.element_id = root.element_id().map(str::to_string);
        contribution.contributor_uri = contributor_uri(root);
        contribution.tags.insert(scheme_tag.clone());
        contribution.tags.insert(filter.to_string());
        contribution.visible_when = self.builder.visible_when(root);
        contribution.children = self.builder.build_children(root, Host::Menu, Some(filter));
        staged.push(contribution);

        self.submenu_records(root, &scheme_tag, filter, origin, staged);
    }

    /// One record per nested submenu, depth first, each filling the
    /// submenu it is named after.
    fn submenu_records(
        &self,
        parent: &ContributionDescriptor,
        scheme_tag: &str,
        filter: &str,
        origin: &OriginKey,
        staged: &mut Vec<Contribution>,
    ) {
        for menu in parent.children_of(DescriptorKind::Submenu) {
            let Some(menu_id) = menu.element_id() else {
                warn!(parent = ?parent.element_id(), "submenu without id cannot receive items");
                continue;
            };

            let mut contribution = Contribution::new(
                ContributionKind::Menu,
                menu_id,
                DEFAULT_POSITION,
                origin.clone(),
            );
            contribution.element_id = Some(menu_id.to_string());
            contribution.contributor_uri = contributor_uri(menu);
            contribution.tags.insert(scheme_tag.to_string());
            contribution.tags.insert(filter.to_string());
            contribution.visible_when = self.builder.visible_when(menu);
            contribution.children = self.builder.build_children(menu, Host::Menu, Some(filter));
            staged.push(contribution);

            self.submenu_records(menu, scheme_tag, filter, origin, staged);
        }
    }

    fn trim_records(
        &self,
        root: &ContributionDescriptor,
        location: &LocationExpression,
        origin: &OriginKey,
        staged: &mut Vec<Contribution>,
    ) {
        let toolbars: Vec<&ContributionDescriptor> =
            root.children_of(DescriptorKind::Toolbar).collect();
        if toolbars.is_empty() {
            return;
        }

        let mut trim = Contribution::new(
            ContributionKind::Trim,
            location.path(),
            location.query(),
            origin.clone(),
        );
        trim.element_id = root.element_id().map(str::to_string);
        trim.contributor_uri = contributor_uri(root);
        trim.tags.insert(format!("scheme:{}", location.scheme()));

        for toolbar in toolbars {
            let element = match self.builder.build(toolbar, Host::Trim, None) {
                Ok(Some(element)) => element,
                Ok(None) => continue,
                Err(err) => {
                    warn!(location = %location, error = %err, "dropping trim toolbar");
                    continue;
                }
            };
            if let Some(toolbar_id) = element.element_id() {
                let record =
                    self.toolbar_record(toolbar, location, toolbar_id, DEFAULT_POSITION, origin);
                staged.push(record);
            }
            trim.children.push(element);
        }

        if trim.children.is_empty() {
            debug!(location = %location, "no trim toolbar survived, publishing nothing");
            return;
        }
        staged.push(trim);
    }

    fn toolbar_record(
        &self,
        toolbar: &ContributionDescriptor,
        location: &LocationExpression,
        parent_id: &str,
        position: &str,
        origin: &OriginKey,
    ) -> Contribution {
        let mut contribution = Contribution::new(
            ContributionKind::ToolBar,
            parent_id,
            position,
            origin.clone(),
        );
        contribution.element_id = toolbar.element_id().map(str::to_string);
        contribution.contributor_uri = contributor_uri(toolbar);
        contribution.tags.insert(format!("scheme:{}", location.scheme()));
        contribution.children = self.builder.build_children(toolbar, Host::ToolBar, None);
        contribution
    }
}
