//! Check command implementation.
//!
//! A selection can be ordered when every required category has a value and
//! no selected option is ruled out by the others.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{Context, SelectionArgs};
use crate::output::{print_error, print_output, print_single, print_success, print_warning};

#[derive(Debug, Serialize)]
struct CheckReport {
    complete: bool,
    missing: Vec<String>,
    conflicts: Vec<String>,
    messages: Vec<String>,
}

/// One reason a selection cannot be ordered.
#[derive(Debug, Serialize, Tabled)]
struct ProblemRow {
    #[tabled(rename = "Problem")]
    kind: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl CheckReport {
    fn is_orderable(&self) -> bool {
        self.complete && self.conflicts.is_empty()
    }

    fn problems(&self) -> Vec<ProblemRow> {
        let missing = self.missing.iter().map(|c| ProblemRow {
            kind: "missing",
            detail: c.clone(),
        });
        let conflicts = self.conflicts.iter().map(|c| ProblemRow {
            kind: "conflict",
            detail: c.clone(),
        });
        missing.chain(conflicts).collect()
    }
}

/// Execute the check command. Fails when the selection cannot be ordered.
pub fn execute(ctx: &Context, args: SelectionArgs) -> Result<bool> {
    let state = args.to_state();
    let manager = ctx.manager();
    let engine = manager.engine();

    let conflicts: Vec<String> = state
        .selected()
        .filter(|(c, v)| engine.is_option_disabled(c.as_str(), v.as_str(), &state))
        .map(|(c, v)| format!("{c}={v}"))
        .collect();

    let mut messages = manager.validate(&state);
    if !conflicts.is_empty() {
        messages.push(format!("Incompatible selections: {}", conflicts.join(", ")));
    }

    let report = CheckReport {
        complete: manager.is_complete(&state),
        missing: manager
            .missing_categories(&state)
            .into_iter()
            .map(|c| c.to_string())
            .collect(),
        conflicts,
        messages,
    };
    let ok = report.is_orderable();

    match ctx.format {
        OutputFormat::Table => {
            if ok {
                print_success("Configuration is complete");
            }
            for message in &report.messages {
                print_error(message);
            }
            let unselected = ctx
                .product
                .catalog
                .categories
                .iter()
                .filter(|c| !c.required && !state.is_selected(c.id.as_str()));
            for category in unselected {
                print_warning(&format!("Optional category '{}' not selected", category.id));
            }
        }
        OutputFormat::Json => print_single(&report, ctx.format)?,
        OutputFormat::Csv => print_output(&report.problems(), ctx.format)?,
        OutputFormat::Minimal => {
            let status = match (report.complete, report.conflicts.is_empty()) {
                (true, true) => "ok",
                (false, _) => "incomplete",
                (true, false) => "conflict",
            };
            println!("{}", status);
        }
    }

    Ok(ok)
}
