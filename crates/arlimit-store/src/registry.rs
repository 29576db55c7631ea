//! Active Response command registry (`ar.conf`)
//!
//! One record per line, fields separated by ` - `:
//!
//! ```text
//! firewall-drop0 - firewall-drop - 0
//! restart-wazuh0 - restart-wazuh - 0
//! ```
//!
//! A record names a command only if it has at least three fields and its
//! first field ends with `0`.

use arlimit_core::errors::Result;
use arlimit_core::RegistryReader;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::read_error;

pub const FIELD_SEPARATOR: &str = " - ";
const MIN_FIELDS: usize = 3;
const COMMAND_SUFFIX: char = '0';

/// Extract the command name from one registry line, if it names one
pub fn parse_record(line: &str) -> Option<&str> {
    let mut fields = line.trim().split(FIELD_SEPARATOR);
    let command = fields.next()?.trim();
    if fields.count() + 1 < MIN_FIELDS {
        return None;
    }
    command.ends_with(COMMAND_SUFFIX).then_some(command)
}

/// Collect the distinct command names in registry text
pub fn parse_registry_str(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter_map(parse_record)
        .map(str::to_string)
        .collect()
}

/// Registry reader over an `ar.conf`-style file
#[derive(Debug, Clone)]
pub struct FileRegistryReader {
    path: PathBuf,
}

impl FileRegistryReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryReader for FileRegistryReader {
    fn list_commands(&self) -> Result<BTreeSet<String>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| read_error("read_registry", &self.path, e))?;

        let commands = parse_registry_str(&content);
        tracing::debug!(
            path = %self.path.display(),
            registry_len = commands.len(),
            "read command registry"
        );
        Ok(commands)
    }
}
