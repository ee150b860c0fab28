//! Backing stores for choice configuration documents
//!
//! A store hands out the whole document as a nested mapping and takes the
//! whole document back. Nothing is cached between calls.

pub mod error;
pub mod format;
pub mod io;
pub mod store;

pub use error::{Error, Result};
pub use format::StoreFormat;
pub use store::{Document, DocumentStore, FileStore, MemoryStore};
