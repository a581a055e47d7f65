//! In-memory table backend.

mod table;

pub use table::InMemoryTable;
