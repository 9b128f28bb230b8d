//! Analyse command
//!
//! Usage: planlens analyse [--plan <FILE>] [--section <NAME>]... [--output-dir <DIR>]

use clap::Args;
use planlens_core::diff::DEFAULT_MAX_DEPTH;
use planlens_core::errors::LensErrorKind;
use planlens_core::report::{render_detailed_changes, render_no_changes, render_summary};
use planlens_core::sink::publish;
use planlens_core::{analyse_plan, DEFAULT_SECTIONS};
use planlens_store::{load_plan, JsonFileSink};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyseArgs {
    /// Plan JSON file (as produced by `terraform show -json`)
    #[arg(long, default_value = "terraform_plan.json")]
    pub plan: PathBuf,

    /// Section to analyse; repeat for several (default: resource_drift, resource_changes)
    #[arg(long = "section")]
    pub sections: Vec<String>,

    /// Directory receiving one JSON file per category and section
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Print the report only; skip the per-category export
    #[arg(long)]
    pub no_export: bool,

    /// Deepest state nesting the diff will walk
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Execute analyse command
pub fn execute(args: AnalyseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = super::analysis_options(args.max_depth)?;
    let plan = load_plan(&args.plan)?;

    let sections: Vec<String> = if args.sections.is_empty() {
        DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        args.sections
    };

    let mut sink = JsonFileSink::new(&args.output_dir);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for section in &sections {
        let analysis = match analyse_plan(&plan, section, &options) {
            Ok(analysis) => analysis,
            Err(e) if e.kind() == LensErrorKind::EmptyBatch => {
                write!(out, "{}", render_no_changes(section))?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        write!(out, "{}", render_summary(&analysis.summary, section))?;
        write!(out, "{}", render_detailed_changes(&analysis.batch, section)?)?;

        if !args.no_export {
            publish(&analysis.batch, section, &mut sink)?;
        }
    }

    out.flush()?;
    Ok(())
}
