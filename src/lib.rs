pub mod attribute;
pub mod container;
pub mod context;
pub mod definition;
mod error;

pub use attribute::{Attribute, ListAttribute};
pub use container::{TilesContainer, TilesContainerBuilder};
pub use context::{AttributeContext, AttributeMap, AttributeSource};
pub use definition::{Definition, Definitions, DefinitionsError, DefinitionsFactory, Locale};
pub use error::Error;
