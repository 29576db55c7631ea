//! Subcommand implementations
//!
//! Every subcommand runs against a reconciler that has already been
//! initialized from the document and registry files.

use arlimit_core::{LimitReconciler, LimitSet};
use arlimit_store::{FileRegistryReader, YamlDocumentStore};
use clap::Args;
use std::path::PathBuf;

pub mod bundle;
pub mod global;
pub mod limits;
pub mod sync;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub type FileReconciler = LimitReconciler<YamlDocumentStore, FileRegistryReader>;

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Limit document (YAML)
    #[arg(
        long,
        global = true,
        env = "ARLIMIT_DOCUMENT",
        default_value = "ar_limit_conf.yaml"
    )]
    pub document: PathBuf,

    /// Active Response command registry
    #[arg(long, global = true, env = "ARLIMIT_REGISTRY", default_value = "ar.conf")]
    pub registry: PathBuf,
}

impl FileArgs {
    /// Load, seed and persist the document
    pub fn reconciler(&self) -> FileReconciler {
        LimitReconciler::initialize(
            YamlDocumentStore::new(&self.document),
            FileRegistryReader::new(&self.registry),
        )
    }
}

pub fn format_limit(limit: Option<u64>) -> String {
    limit.map_or_else(|| "none".to_string(), |l| l.to_string())
}

pub fn print_limits(limits: &LimitSet) {
    for (command, limit) in limits {
        println!("{}: {}", command, format_limit(*limit));
    }
}
