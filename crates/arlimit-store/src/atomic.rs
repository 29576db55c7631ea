//! Atomic write primitives
//!
//! Uses temp→rename so a reader never observes a half-written document

use crate::errors::persist_error;
use arlimit_core::errors::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling of `target_path` with `.tmp` appended to the full file name
fn temp_path_for(target_path: &Path) -> PathBuf {
    let mut name = target_path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace `target_path` with `content`
pub(crate) fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| persist_error(target_path, e))?;
        }
    }

    // Temp file in the same directory so rename stays on one filesystem
    let temp_path = temp_path_for(target_path);

    fs::write(&temp_path, content).map_err(|e| persist_error(target_path, e))?;

    fs::rename(&temp_path, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        persist_error(target_path, e)
    })?;

    Ok(())
}
