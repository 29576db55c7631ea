//! Usage:
//!   arlimit show [COMMAND...] [--json]
//!   arlimit set <COMMAND=LIMIT>...

use arlimit_core::errors::LimitError;
use arlimit_core::LimitSet;
use clap::Args;

use super::{format_limit, print_limits, CommandResult, FileReconciler};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Only show these commands (unknown names are ignored)
    pub commands: Vec<String>,

    /// Output as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Assignments such as `firewall-drop0=50` or `host-deny0=none`
    #[arg(required = true, value_parser = parse_assignment)]
    pub assignments: Vec<(String, Option<u64>)>,
}

/// Parse `COMMAND=LIMIT`, where LIMIT is an integer or `none`
pub fn parse_assignment(raw: &str) -> Result<(String, Option<u64>), LimitError> {
    let invalid = |reason: String| LimitError::InvalidInput { reason };

    let (command, limit) = raw
        .split_once('=')
        .ok_or_else(|| invalid(format!("expected COMMAND=LIMIT, got '{}'", raw)))?;
    let command = command.trim();
    if command.is_empty() {
        return Err(invalid(format!("missing command name in '{}'", raw)));
    }

    let limit = match limit.trim() {
        "none" | "null" => None,
        value => Some(value.parse::<u64>().map_err(|e| {
            invalid(format!("limit for '{}' must be an integer or 'none': {}", command, e))
        })?),
    };

    Ok((command.to_string(), limit))
}

pub fn execute_show(args: ShowArgs, reconciler: &FileReconciler) -> CommandResult {
    let filter = (!args.commands.is_empty()).then_some(args.commands.as_slice());
    let limits = reconciler.get_limits(filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&limits)?);
    } else {
        print_limits(&limits);
    }
    Ok(())
}

pub fn execute_set(args: SetArgs, reconciler: &mut FileReconciler) -> CommandResult {
    let updates: LimitSet = args.assignments.into_iter().collect();

    let names: Vec<String> = updates.keys().cloned().collect();
    let known = reconciler.get_limits(Some(&names));
    for command in names.iter().filter(|c| !known.contains_key(*c)) {
        eprintln!("Skipping unknown command: {}", command);
    }

    reconciler.update_limits(&updates)?;

    for (command, limit) in updates.iter().filter(|(c, _)| known.contains_key(*c)) {
        println!("✓ {} -> {}", command, format_limit(*limit));
    }
    Ok(())
}
