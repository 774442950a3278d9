//! Rules command implementation.
//!
//! Lists the business rules of the product. The product has already passed
//! validation by the time this runs; rules that reference unknown catalog
//! entries are reported as warnings.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use velo_core::{PriceOp, Rule, RuleEffect, RuleKind};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{print_output, print_success, print_warning};

/// Arguments for the rules command.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list rules of this kind (compatibility or pricing)
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<RuleKind>,

    /// Include inactive rules
    #[arg(long)]
    pub all: bool,
}

fn parse_kind(s: &str) -> CliResult<RuleKind> {
    RuleKind::parse(s).ok_or_else(|| CliError::InvalidRuleKind(s.to_string()))
}

/// One rule.
#[derive(Debug, Serialize, Tabled)]
pub struct RuleRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Priority")]
    pub priority: i32,
    #[tabled(rename = "Active")]
    pub active: bool,
    #[tabled(rename = "When")]
    pub conditions: String,
    #[tabled(rename = "Then")]
    pub effect: String,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        let conditions = rule
            .conditions
            .iter()
            .map(|(category, values)| {
                let values: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
                format!("{} in [{}]", category, values.join(", "))
            })
            .collect::<Vec<_>>()
            .join(" and ");

        let effect = match &rule.effect {
            RuleEffect::Compatibility { disable } => disable
                .iter()
                .map(|d| {
                    let values: Vec<&str> = d.values.iter().map(|v| v.as_str()).collect();
                    format!("disable {} [{}]", d.category, values.join(", "))
                })
                .collect::<Vec<_>>()
                .join("; "),
            RuleEffect::Pricing { modifications } => modifications
                .iter()
                .map(|m| {
                    let op = match m.op {
                        PriceOp::Add => "+",
                        PriceOp::Multiply => "x",
                    };
                    format!("{}={} {}{}", m.category, m.value, op, m.modifier.normalize())
                })
                .collect::<Vec<_>>()
                .join("; "),
        };

        Self {
            id: rule.id.to_string(),
            kind: rule.kind().to_string(),
            priority: rule.priority,
            active: rule.active,
            conditions: if conditions.is_empty() {
                "always".to_string()
            } else {
                conditions
            },
            effect,
        }
    }
}

/// Execute the rules command.
pub fn execute(ctx: &Context, args: RulesArgs) -> Result<bool> {
    let rows: Vec<RuleRow> = ctx
        .product
        .rules
        .all()
        .iter()
        .filter(|r| args.all || r.active)
        .filter(|r| args.kind.map_or(true, |k| r.kind() == k))
        .map(RuleRow::from)
        .collect();

    print_output(&rows, ctx.format)?;

    if ctx.format == OutputFormat::Table {
        let dangling = ctx.product.dangling_references();
        if dangling.is_empty() {
            print_success(&format!(
                "Product '{}' is valid ({} categories, {} rules)",
                ctx.product.name,
                ctx.product.catalog.len(),
                ctx.product.rules.len()
            ));
        }
        for warning in &dangling {
            print_warning(warning);
        }
    }
    Ok(true)
}
