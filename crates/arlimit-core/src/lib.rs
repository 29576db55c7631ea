//! arlimit core - Active Response limit reconciliation
//!
//! This crate provides:
//! - The limit data model (`LimitSet`, `LimitDocument`, `LimitBundle`)
//! - Collaborator traits for the document store and the command registry
//! - `LimitReconciler`, which seeds, validates and persists limits
//! - The structured error and logging facilities shared by the workspace

pub mod document_store;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconciler;
pub mod registry;

pub use arlimit_core_types::schema;

// Re-export commonly used types
pub use document_store::{DocumentStore, InMemoryDocumentStore};
pub use errors::{ExError, ExErrorKind, LimitError, Result};
pub use model::{LimitBundle, LimitDocument, LimitSet, DEFAULT_GLOBAL_LIMIT};
pub use reconciler::LimitReconciler;
pub use registry::{RegistryReader, StaticRegistry};
