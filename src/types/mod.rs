pub mod contribution;
pub mod identifiers;

pub use contribution::{Contribution, ContributionKind, MergeReport, MergedContributions};
pub use identifiers::{DescriptorFingerprint, IconRef, OriginKey, PredicateRef};
