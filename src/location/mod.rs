pub mod trim;
pub mod uri;

pub use trim::{Side, TrimArea};
pub use uri::{LocationError, LocationExpression, DEFAULT_POSITION};
