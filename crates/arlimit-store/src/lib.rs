//! arlimit store - file-backed collaborators for the limit reconciler
//!
//! Provides:
//! - `YamlDocumentStore`: the `active-response` YAML document, written atomically
//! - `FileRegistryReader`: the ` - `-delimited Active Response command registry

mod atomic;
pub mod document;
pub mod errors;
pub mod registry;

pub use document::YamlDocumentStore;
pub use registry::FileRegistryReader;
