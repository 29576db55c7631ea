//! Usage:
//!   arlimit export
//!   arlimit import <PATH|->

use arlimit_core::errors::LimitError;
use arlimit_core::LimitBundle;
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{CommandResult, FileReconciler};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON bundle file, or `-` for stdin
    pub path: PathBuf,
}

pub fn execute_export(reconciler: &FileReconciler) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(&reconciler.get_bundle())?);
    Ok(())
}

pub fn execute_import(args: ImportArgs, reconciler: &mut FileReconciler) -> CommandResult {
    let bundle = read_bundle(&args.path)?;
    reconciler.apply_bundle(&bundle)?;
    println!(
        "✓ Applied {} limit(s), global limit {}",
        bundle.custom_limits.len(),
        reconciler
            .get_global_limit()
            .map_or_else(|| "unset".to_string(), |g| g.to_string())
    );
    Ok(())
}

fn read_bundle(path: &Path) -> Result<LimitBundle, LimitError> {
    let io_error = |e: std::io::Error| LimitError::Io {
        operation: "read_bundle".to_string(),
        reason: format!("{}: {}", path.display(), e),
    };

    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };

    serde_json::from_str(&content).map_err(|e| LimitError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
