//! Usage: arlimit sync

use super::{print_limits, CommandResult, FileReconciler};

/// Initialization already seeded and persisted; report the result
pub fn execute(reconciler: &FileReconciler) -> CommandResult {
    let limits = reconciler.get_limits(None);
    print_limits(&limits);
    println!("✓ Synchronized {} command(s)", limits.len());
    Ok(())
}
