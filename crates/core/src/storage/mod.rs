mod error;
mod traits;

pub use error::{BoxError, DataProcessingError, Result, StoreError};
pub use traits::Repository;
