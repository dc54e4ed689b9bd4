pub mod errors;
pub mod format;
pub mod table;

pub use errors::{CommandError, StoreError, ValidationError};
pub use table::Table;
