use thiserror::Error;

use crate::config::MergeConfig;
use crate::location::{LocationExpression, TrimArea};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Unknown trim area: {0}")]
    UnknownTrimArea(String),
}

/// Which kind of container a location targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Menu,
    Toolbar,
    Trim(TrimArea),
}

/// Routes a location; the first matching rule wins:
/// toolbar scheme on a known trim path, toolbar scheme on a reserved but
/// unknown trim path (error), any other toolbar scheme, then menus.
pub fn classify(
    location: &LocationExpression,
    config: &MergeConfig,
) -> Result<ContainerKind, ResolveError> {
    if !location.is_toolbar_scheme() {
        return Ok(ContainerKind::Menu);
    }

    let path = location.path();
    if let Some(area) = config.trim_area(path) {
        return Ok(ContainerKind::Trim(area));
    }
    if config.looks_like_trim_area(path) {
        return Err(ResolveError::UnknownTrimArea(path.to_string()));
    }
    Ok(ContainerKind::Toolbar)
}
