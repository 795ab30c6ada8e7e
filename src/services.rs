//! Interfaces the merge engine consumes from its surroundings.

use std::any::Any;
use std::sync::Arc;

use crate::descriptor::ContributionDescriptor;
use crate::types::identifiers::{IconRef, PredicateRef};

/// Supplies the already validated descriptor roots to merge.
pub trait DescriptorSource {
    fn list(&self) -> &[ContributionDescriptor];
}

impl DescriptorSource for Vec<ContributionDescriptor> {
    fn list(&self) -> &[ContributionDescriptor] {
        self
    }
}

impl DescriptorSource for [ContributionDescriptor] {
    fn list(&self) -> &[ContributionDescriptor] {
        self
    }
}

/// Looks up icons registered for commands and elements.
pub trait IconService {
    fn icon_for_command(&self, command_id: &str) -> Option<IconRef>;
    fn icon_for_element(&self, element_id: &str) -> Option<IconRef>;
}

/// An icon service that knows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcons;

impl IconService for NoIcons {
    fn icon_for_command(&self, _command_id: &str) -> Option<IconRef> {
        None
    }

    fn icon_for_element(&self, _element_id: &str) -> Option<IconRef> {
        None
    }
}

/// Turns a visibility expression into a handle the renderer evaluates.
pub trait PredicateCompiler {
    fn compile(&self, expression: &str) -> PredicateRef;
}

/// Keeps the expression text itself as the handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionPredicates;

impl PredicateCompiler for ExpressionPredicates {
    fn compile(&self, expression: &str) -> PredicateRef {
        PredicateRef::new(expression)
    }
}

/// Services available to dynamic items when the renderer expands them.
pub trait ServiceLocator: Send + Sync {
    fn service(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>>;
}
