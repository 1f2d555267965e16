pub mod error;
pub mod listing;
pub mod marketplace;
pub mod report;

pub use error::*;
pub use listing::*;
pub use marketplace::*;
pub use report::*;
