pub mod types;
pub mod queries;
pub mod snapshot;

pub use types::*;
pub use queries::*;
pub use snapshot::*;
