//! Diff command
//!
//! Usage: planlens diff <BEFORE> <AFTER>

use clap::Args;
use planlens_core::diff::DEFAULT_MAX_DEPTH;
use planlens_core::diff_states;
use planlens_core::report::to_pretty_json;
use planlens_store::load_json;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// JSON file holding the "before" state
    pub before: PathBuf,

    /// JSON file holding the "after" state
    pub after: PathBuf,

    /// Deepest nesting the diff will walk
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = super::analysis_options(args.max_depth)?;
    let before = load_json(&args.before)?;
    let after = load_json(&args.after)?;

    match diff_states(&before, &after, &options)? {
        Some(differences) => println!("{}", to_pretty_json(&differences)?),
        None => println!("No differences."),
    }

    Ok(())
}
