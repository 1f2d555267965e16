pub mod builtin;
pub mod catalog;

pub use builtin::builtin_descriptors;
pub use catalog::{CatalogError, MarketplaceCatalog, Resolution};
