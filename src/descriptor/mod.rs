pub mod attributes;
pub mod descriptor;

pub use attributes::Attributes;
pub use descriptor::{ContributionDescriptor, DescriptorKind};
