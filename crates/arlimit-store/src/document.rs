//! YAML limit document
//!
//! ```yaml
//! active-response:
//!   global-limit: 200
//!   custom-limit:
//!     firewall-drop0: 50
//!     restart-wazuh0: null
//! ```
//!
//! Keys outside `global-limit` / `custom-limit` are kept from the last load
//! and written back untouched.

use arlimit_core::errors::Result;
use arlimit_core::{DocumentStore, LimitDocument, LimitSet};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::atomic::atomic_write;
use crate::errors::{parse_error, persist_error, read_error};

pub const SECTION_KEY: &str = "active-response";
pub const GLOBAL_LIMIT_KEY: &str = "global-limit";
pub const CUSTOM_LIMIT_KEY: &str = "custom-limit";

#[derive(Debug, Default, Deserialize)]
struct SectionFields {
    #[serde(rename = "global-limit", default)]
    global_limit: Option<u64>,
    #[serde(rename = "custom-limit", default)]
    custom_limit: Option<Mapping>,
}

/// Read `custom-limit` entries, accepting any scalar as a command name
///
/// YAML leaves `100: 5` as an integer key, so keys are normalised to strings
/// rather than rejected.
fn limits_from_mapping(custom: &Mapping, path: &Path) -> Result<LimitSet> {
    custom
        .iter()
        .map(|(key, value)| {
            let command = match key {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(parse_error(
                        path,
                        format!("{}: command names must be scalars", CUSTOM_LIMIT_KEY),
                    ))
                }
            };
            let limit = match value {
                Value::Null => None,
                Value::Number(n) => Some(n.as_u64().ok_or_else(|| {
                    parse_error(
                        path,
                        format!("{}: limit for '{}' is not a non-negative integer", CUSTOM_LIMIT_KEY, command),
                    )
                })?),
                _ => {
                    return Err(parse_error(
                        path,
                        format!("{}: limit for '{}' is not a number", CUSTOM_LIMIT_KEY, command),
                    ))
                }
            };
            Ok((command, limit))
        })
        .collect()
}

/// Parse document text into the raw mapping and its limit projection
///
/// An empty file is an empty document.
///
/// # Errors
///
/// Returns `LimitError::Parse` for invalid YAML, a non-mapping root or
/// section, or limits that are not non-negative integers.
pub fn parse_document_str(content: &str, path: &Path) -> Result<(Mapping, LimitDocument)> {
    if content.trim().is_empty() {
        return Ok((Mapping::new(), LimitDocument::default()));
    }

    let root = match serde_yaml::from_str::<Value>(content).map_err(|e| parse_error(path, e))? {
        Value::Null => Mapping::new(),
        Value::Mapping(root) => root,
        _ => return Err(parse_error(path, "top-level value is not a mapping")),
    };

    let document = match root.get(SECTION_KEY) {
        None | Some(Value::Null) => LimitDocument::default(),
        Some(section @ Value::Mapping(_)) => {
            let fields: SectionFields = serde_yaml::from_value(section.clone())
                .map_err(|e| parse_error(path, format!("{}: {}", SECTION_KEY, e)))?;
            let custom_limits = match &fields.custom_limit {
                Some(custom) => limits_from_mapping(custom, path)?,
                None => LimitSet::new(),
            };
            LimitDocument {
                global_limit: fields.global_limit,
                custom_limits,
            }
        }
        Some(_) => {
            return Err(parse_error(
                path,
                format!("'{}' is not a mapping", SECTION_KEY),
            ))
        }
    };

    Ok((root, document))
}

/// Write `document` into the `active-response` section of `root`
///
/// A stored `global-limit` is only written when the document has one.
pub fn merge_document(root: &mut Mapping, document: &LimitDocument) {
    let section_key = Value::String(SECTION_KEY.to_string());
    if !matches!(root.get(&section_key), Some(Value::Mapping(_))) {
        root.insert(section_key.clone(), Value::Mapping(Mapping::new()));
    }

    let custom: Mapping = document
        .custom_limits
        .iter()
        .map(|(command, limit)| {
            let value = limit.map_or(Value::Null, |l| Value::Number(l.into()));
            (Value::String(command.clone()), value)
        })
        .collect();

    if let Some(Value::Mapping(section)) = root.get_mut(&section_key) {
        if let Some(global_limit) = document.global_limit {
            section.insert(
                Value::String(GLOBAL_LIMIT_KEY.to_string()),
                Value::Number(global_limit.into()),
            );
        }
        section.insert(
            Value::String(CUSTOM_LIMIT_KEY.to_string()),
            Value::Mapping(custom),
        );
    }
}

/// Document store over a YAML file
#[derive(Debug, Clone)]
pub struct YamlDocumentStore {
    path: PathBuf,
    retained: Mapping,
}

impl YamlDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retained: Mapping::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for YamlDocumentStore {
    fn load(&mut self) -> Result<LimitDocument> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| read_error("read_document", &self.path, e))?;

        let (root, document) = parse_document_str(&content, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            limits_len = document.custom_limits.len(),
            global_limit = ?document.global_limit,
            "loaded limit document"
        );

        self.retained = root;
        Ok(document)
    }

    fn save(&mut self, document: &LimitDocument) -> Result<()> {
        let mut root = self.retained.clone();
        merge_document(&mut root, document);

        let rendered = serde_yaml::to_string(&root).map_err(|e| persist_error(&self.path, e))?;
        atomic_write(&self.path, rendered.as_bytes())?;
        tracing::debug!(path = %self.path.display(), bytes = rendered.len(), "saved limit document");

        self.retained = root;
        Ok(())
    }
}
