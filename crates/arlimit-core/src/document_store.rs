//! Document store interface for the persisted limit configuration.

use crate::errors::{LimitError, Result};
use crate::model::LimitDocument;

/// Load/save access to the limit document.
pub trait DocumentStore {
    /// Load the current document.
    ///
    /// # Errors
    ///
    /// Returns `LimitError::MissingFile` if there is no document yet, or
    /// `LimitError::Parse` if it exists but cannot be interpreted.
    fn load(&mut self) -> Result<LimitDocument>;

    /// Replace the persisted document.
    ///
    /// # Errors
    ///
    /// Returns `LimitError::Persist` if the document cannot be written.
    fn save(&mut self, document: &LimitDocument) -> Result<()>;
}

/// Document store held entirely in memory.
///
/// Starts empty (a `load` reports `MissingFile`) unless seeded. Loads and
/// saves can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    document: Option<LimitDocument>,
    load_error: Option<LimitError>,
    fail_saves: bool,
    save_count: usize,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `document`
    pub fn with_document(document: LimitDocument) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// Create a store whose `load` always fails with `error`
    pub fn with_load_error(error: LimitError) -> Self {
        Self {
            load_error: Some(error),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail (or succeed again)
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Last successfully saved (or seeded) document
    pub fn document(&self) -> Option<&LimitDocument> {
        self.document.as_ref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&mut self) -> Result<LimitDocument> {
        if let Some(e) = &self.load_error {
            return Err(e.clone());
        }
        self.document.clone().ok_or_else(|| LimitError::MissingFile {
            path: "<memory>".to_string(),
        })
    }

    fn save(&mut self, document: &LimitDocument) -> Result<()> {
        if self.fail_saves {
            return Err(LimitError::Persist {
                path: "<memory>".to_string(),
                reason: "saves disabled".to_string(),
            });
        }
        self.document = Some(document.clone());
        self.save_count += 1;
        Ok(())
    }
}
