//! File-backed document collections.
//!
//! Each collection is one JSON array on disk. Every operation reloads the whole
//! array, works on it in memory and, for mutations, rewrites the whole file.

pub mod carts;
pub mod document_file;
pub mod error;
pub mod ids;
pub mod products;

pub use carts::CartStore;
pub use document_file::DocumentFile;
pub use error::{StoreError, StoreResult};
pub use ids::{IdGenerator, IdStrategy};
pub use products::ProductStore;

/// Whether product writes must carry every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Permissive,
    Strict,
}
