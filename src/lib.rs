//! Deterministic merge engine for declarative UI contributions.
//!
//! `contribution-merge` takes independently authored contribution trees
//! (menu items, tool items, trim toolbars, separators, controls, submenus),
//! each addressed by a `scheme:path?query` location, and merges them into
//! three ordered contribution sequences (menu, toolbar, trim) for a
//! renderer to consume. Unknown commands are synthesized once, ordering
//! directives are resolved against sibling lists, and merging the same
//! descriptors again changes nothing.

pub mod config;
pub mod descriptor;
pub mod location;
pub mod merge;
pub mod model;
pub mod services;
pub mod types;
