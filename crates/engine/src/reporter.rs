//! Human-readable sizing report.
//!
//! Takes a `FleetResult` (and optionally a license outcome) and renders the
//! per-line breakdown, fleet totals, and licensing summary.

use crate::lines::LineBook;
use dcsize_core::{ControllerKind, FleetResult, LicenseOutcome, LineResult};

const RULE_TOP: &str = "╔══════════════════════════════════════════════════════════════╗\n";
const RULE_MID: &str = "╠══════════════════════════════════════════════════════════════╣\n";
const RULE_BOTTOM: &str = "╚══════════════════════════════════════════════════════════════╝\n";

/// Sizing report over one fleet calculation.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub fleet: &'a FleetResult,
    pub license: Option<&'a LicenseOutcome>,
}

impl<'a> Report<'a> {
    pub fn build(fleet: &'a FleetResult, license: Option<&'a LicenseOutcome>) -> Self {
        Self { fleet, license }
    }

    /// Render the report as a formatted string.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push('\n');
        out.push_str(RULE_TOP);
        out.push_str("║                    DC LINE SIZING REPORT                     ║\n");
        out.push_str(RULE_MID);
        out.push_str(&row("DC lines:", &self.fleet.len().to_string()));
        out.push_str(RULE_MID);

        if self.fleet.is_empty() {
            out.push_str("║  No DC lines configured.                                     ║\n");
        } else {
            out.push_str(&text_row(&format!(
                "{:<6} {:<12} {:<24} {:>12}",
                "Line", "Required", "Controllers", "Cost"
            )));
            for line in &self.fleet.lines {
                render_line(&mut out, line);
            }
        }

        let totals = &self.fleet.totals;
        out.push_str(RULE_MID);
        out.push_str("║  FLEET TOTALS                                                ║\n");
        out.push_str(RULE_MID);
        for kind in ControllerKind::ALL {
            out.push_str(&row(
                &format!("{kind}:"),
                &format!("{} units", totals.controllers.get(kind)),
            ));
        }
        out.push_str(&row(
            "Controllers:",
            &self.fleet.total_controllers().to_string(),
        ));
        out.push_str(&row(
            "Controller cost:",
            &format!("${}", totals.controller_cost),
        ));
        out.push_str(&row("Expansion cost:", &format!("${}", totals.expansion_cost)));
        out.push_str(&row("Grand total:", &format!("${}", totals.grand_total)));

        if let Some(license) = self.license {
            out.push_str(RULE_MID);
            out.push_str("║  LICENSE                                                     ║\n");
            out.push_str(RULE_MID);
            render_license(&mut out, license);
        }

        out.push_str(RULE_BOTTOM);
        out
    }
}

fn render_line(out: &mut String, line: &LineResult) {
    out.push_str(&text_row(&format!(
        "{:<6} {:<12} {:<24} {:>12}",
        line.line,
        line.demand.to_string(),
        line.controllers.counts.to_string(),
        format!("${}", line.total_cost),
    )));
    let extra = line.controllers.extra_readers(&line.demand);
    if extra > 0 {
        out.push_str(&text_row(&format!(
            "       {} readers provided ({extra} spare)",
            line.controllers.readers_provided
        )));
    }
    if !line.expansion.is_empty() {
        out.push_str(&text_row(&format!(
            "       + {} (${})",
            line.expansion, line.expansion.cost
        )));
    }
}

fn render_license(out: &mut String, license: &LicenseOutcome) {
    let Some(decision) = license.decision() else {
        out.push_str("║  No controllers configured, nothing to license yet.          ║\n");
        return;
    };

    out.push_str(&row(
        "Configuration:",
        if decision.redundancy {
            "Redundant"
        } else {
            "Non-Redundant"
        },
    ));
    out.push_str(&row(
        "Controllers:",
        &decision.total_controllers.to_string(),
    ));
    out.push_str(&row("Primary license:", decision.tier.display_name()));
    for add_on in &decision.add_ons {
        out.push_str(&row(
            "  + add-on:",
            &format!("{} (${})", add_on.kind.display_name(), add_on.cost),
        ));
    }
    out.push_str(&row(
        "License cost:",
        &format!("${}", decision.total_license_cost),
    ));
}

/// Demand summary of every configured line, before any sizing.
pub fn render_lines(book: &LineBook) -> String {
    let mut out = String::new();
    out.push_str(RULE_TOP);
    out.push_str("║                 DC LINE CONFIGURATION SUMMARY                ║\n");
    out.push_str(RULE_MID);

    if book.is_empty() {
        out.push_str("║  No DC lines configured.                                     ║\n");
        out.push_str(RULE_BOTTOM);
        return out;
    }

    for line in book.iter() {
        let d = line.tally.demand();
        out.push_str(&text_row(&format!(
            "DC Line {}: {} readers, {} inputs, {} outputs",
            line.id, d.readers, d.inputs, d.outputs
        )));
        let devices: Vec<String> = dcsize_core::DeviceKind::ALL
            .into_iter()
            .filter(|kind| line.tally.get(*kind) > 0)
            .map(|kind| format!("{}={}", kind, line.tally.get(kind)))
            .collect();
        if !devices.is_empty() {
            out.push_str(&text_row(&format!("    {}", devices.join(" "))));
        }
    }

    let total = book.total_demand();
    out.push_str(RULE_MID);
    out.push_str(&row("Total readers:", &total.readers.to_string()));
    out.push_str(&row("Total inputs:", &total.inputs.to_string()));
    out.push_str(&row("Total outputs:", &total.outputs.to_string()));
    out.push_str(RULE_BOTTOM);
    out
}

fn row(label: &str, value: &str) -> String {
    format!("║  {:<20}{:>39} ║\n", label, value)
}

/// Free text padded to the frame; longer text pushes the border out.
fn text_row(text: &str) -> String {
    format!("║  {:<59} ║\n", text)
}
