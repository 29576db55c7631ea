//! Usage: arlimit global [VALUE]

use arlimit_core::DEFAULT_GLOBAL_LIMIT;
use clap::Args;

use super::{CommandResult, FileReconciler};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// New global limit; omit to print the current one
    pub value: Option<u64>,
}

pub fn execute(args: GlobalArgs, reconciler: &mut FileReconciler) -> CommandResult {
    match args.value {
        Some(value) => {
            reconciler.update_global_limit(value)?;
            println!("✓ Global limit updated to {}", value);
        }
        None => match reconciler.get_global_limit() {
            Some(value) => println!("{}", value),
            None => println!("unset (default {})", DEFAULT_GLOBAL_LIMIT),
        },
    }
    Ok(())
}
