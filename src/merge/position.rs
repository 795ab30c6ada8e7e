use std::fmt;

use crate::types::Contribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Before,
    After,
    EndOf,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Before => "before",
            Relation::After => "after",
            Relation::EndOf => "endof",
        }
    }
}

/// A relative ordering instruction: `before=X`, `after=X` or `endof=X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionDirective {
    relation: Relation,
    target: String,
}

impl PositionDirective {
    pub fn new(relation: Relation, target: impl Into<String>) -> Self {
        Self {
            relation,
            target: target.into(),
        }
    }

    /// Parses `relation=target`. Returns `None` for anything else; callers
    /// treat that as "append".
    pub fn parse(query: &str) -> Option<Self> {
        let (relation, target) = query.split_once('=')?;
        let relation = match relation.trim() {
            "before" => Relation::Before,
            "after" => Relation::After,
            "endof" => Relation::EndOf,
            _ => return None,
        };
        let target = target.trim();
        if target.is_empty() {
            return None;
        }
        Some(Self::new(relation, target))
    }

    pub fn default_position() -> Self {
        Self::new(Relation::After, "additions")
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for PositionDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.relation.as_str(), self.target)
    }
}

/// Anything that can sit in an ordered sibling list.
pub trait Sibling {
    fn sibling_id(&self) -> Option<&str>;

    /// The directive this sibling was itself placed with, if any.
    fn placed_by(&self) -> Option<&str> {
        None
    }

    /// Whether this sibling closes a group for `endof=` placement.
    fn is_group_boundary(&self) -> bool {
        false
    }
}

impl Sibling for Contribution {
    fn sibling_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    fn placed_by(&self) -> Option<&str> {
        Some(&self.position_in_parent)
    }
}

/// Index at which something positioned by `directive` is inserted.
///
/// An unknown target appends. Earlier arrivals with the same `after=`
/// directive are skipped so ties keep arrival order.
pub fn resolve_index<S: Sibling>(siblings: &[S], directive: &PositionDirective) -> usize {
    let Some(anchor) = siblings
        .iter()
        .position(|s| s.sibling_id() == Some(directive.target()))
    else {
        return siblings.len();
    };

    match directive.relation() {
        Relation::Before => anchor,
        Relation::After => {
            let mut index = anchor + 1;
            while index < siblings.len() && placed_with(&siblings[index], directive) {
                index += 1;
            }
            index
        }
        Relation::EndOf => {
            let mut index = anchor + 1;
            while index < siblings.len() && !siblings[index].is_group_boundary() {
                index += 1;
            }
            index
        }
    }
}

/// Like [`resolve_index`] for a raw query; unparseable queries append.
pub fn resolve_query<S: Sibling>(siblings: &[S], query: &str) -> usize {
    match PositionDirective::parse(query) {
        Some(directive) => resolve_index(siblings, &directive),
        None => siblings.len(),
    }
}

fn placed_with<S: Sibling>(sibling: &S, directive: &PositionDirective) -> bool {
    sibling
        .placed_by()
        .and_then(PositionDirective::parse)
        .is_some_and(|placed| &placed == directive)
}

impl Default for PositionDirective {
    fn default() -> Self {
        Self::default_position()
    }
}
