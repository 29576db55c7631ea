//! Command registry interface.

use std::collections::BTreeSet;

use crate::errors::Result;

/// Source of truth for the set of known Active Response commands.
pub trait RegistryReader {
    /// List every known command name.
    ///
    /// # Errors
    ///
    /// Returns `LimitError::MissingFile` if the registry source is absent.
    fn list_commands(&self) -> Result<BTreeSet<String>>;
}

/// Registry over a fixed set of command names
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    commands: BTreeSet<String>,
}

impl StaticRegistry {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

impl RegistryReader for StaticRegistry {
    fn list_commands(&self) -> Result<BTreeSet<String>> {
        Ok(self.commands.clone())
    }
}
