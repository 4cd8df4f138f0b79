use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::Snapshot;
use crate::resolver::ScopeResolution;
use crate::snapshot::store::CommitOutcome;
use crate::snapshot::ScopeOutcome;

/// Per-pass scope counts shown in the summary box.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScopeCounts {
    pub resolved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ScopeCounts {
    pub fn from_outcomes(outcomes: &[ScopeOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut counts, o| {
                match o.resolution {
                    ScopeResolution::Resolved(_) => counts.resolved += 1,
                    ScopeResolution::Skipped => counts.skipped += 1,
                    ScopeResolution::Failed(_) => counts.failed += 1,
                }
                counts
            })
    }
}

/// Render a colored terminal report of one pass.
pub fn render(
    snapshot: &Snapshot,
    outcomes: &[ScopeOutcome],
    outcome: CommitOutcome,
    output: &Path,
    verbose: bool,
    quiet: bool,
) {
    let counts = ScopeCounts::from_outcomes(outcomes);
    let status = match outcome {
        CommitOutcome::Unchanged => "unchanged".green(),
        CommitOutcome::Written { .. } => "written".yellow(),
    };

    if quiet {
        println!(
            "Records: {}  Scopes: {} resolved, {} skipped, {}  Snapshot: {}",
            snapshot.len(),
            counts.resolved,
            counts.skipped,
            format!("{} failed", counts.failed).red(),
            status,
        );
        return;
    }

    let previous = match outcome {
        CommitOutcome::Written {
            previous: Some(n), ..
        } => format!(" (was {} records)", n),
        _ => String::new(),
    };

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Records            : {}", snapshot.len()));
    println!(
        " │  {:<48} │",
        format!("{}  Scopes resolved : {:>4}", "✓".green(), counts.resolved)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Scopes skipped  : {:>4}", "-".dimmed(), counts.skipped)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Scopes failed   : {:>4}", "✗".red(), counts.failed)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    println!(" Snapshot {}{}: {}\n", status, previous, output.display());

    if counts.failed > 0 {
        println!(" {} Scopes that could not be resolved:\n", "[WARN]".yellow().bold());
        for o in outcomes {
            if let ScopeResolution::Failed(e) = &o.resolution {
                println!("   {} {}: {}", "✗".red(), o.scope.bold(), e);
            }
        }
        println!();
    }

    if verbose && !snapshot.is_empty() {
        render_table(snapshot);
        println!();
    }
}

fn render_table(snapshot: &Snapshot) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Group").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("POM").add_attribute(Attribute::Bold),
            Cell::new("File").add_attribute(Attribute::Bold),
        ]);

    for info in snapshot.iter() {
        let pom = match &info.descriptor_location {
            Some(location) => Cell::new(location),
            None => Cell::new("none").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&info.group),
            Cell::new(&info.name),
            Cell::new(&info.version),
            pom,
            Cell::new(&info.binary_location),
        ]);
    }

    println!("{}", table);
}
