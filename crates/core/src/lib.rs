//! Functional core of the workshops service.
//!
//! Everything in this crate is free of I/O: key design, entities and their
//! stored forms, id generation, CSV rendering and the repository contract the
//! server implements.

pub mod clock;
pub mod csv;
pub mod entity;
pub mod ids;
pub mod keys;
pub mod serde;
pub mod storage;
