pub mod command;
pub mod container;
pub mod control;
pub mod element;

pub use command::{Command, CommandRegistry};
pub use container::{Container, ContainerKey, ContainerSet};
pub use control::ControlRegistry;
pub use element::{
    DynamicContext, DynamicContributionItem, ElementData, HandledItem, ItemType, ModelElement,
};
