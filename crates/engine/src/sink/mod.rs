//! Export sinks for sizing results.
//!
//! Row schemas:
//! - [`ExportRow`]: the flat tabular layout (one row group per line, license
//!   rows, grand total) used for spreadsheet export
//! - [`FleetSummaryRow`]: one per calculation
//! - [`LineRow`]: one per DC line (denormalized)
//!
//! Two backends:
//! - **CSV**: the tabular layout, header included, to any `Write` impl
//! - **NDJSON stream**: newline-delimited JSON rows to any `Write` impl

pub mod csv_export;
pub mod json_stream;

use crate::reporter::Report;
use dcsize_core::{ControllerKind, LicenseOutcome, LineResult};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Serializable row types
// ---------------------------------------------------------------------------

/// One row of the tabular export. Empty cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "DC_Line")]
    pub dc_line: String,
    #[serde(rename = "Type")]
    pub row_type: String,
    #[serde(rename = "Readers")]
    pub readers: String,
    #[serde(rename = "Inputs")]
    pub inputs: String,
    #[serde(rename = "Outputs")]
    pub outputs: String,
    #[serde(rename = "KT400")]
    pub kt_400: String,
    #[serde(rename = "KT2")]
    pub kt_2: String,
    #[serde(rename = "KT1")]
    pub kt_1: String,
    #[serde(rename = "Controller_Cost")]
    pub controller_cost: String,
    #[serde(rename = "Expansion_Modules")]
    pub expansion_modules: String,
    #[serde(rename = "Expansion_Cost")]
    pub expansion_cost: String,
    #[serde(rename = "Total_Cost")]
    pub total_cost: String,
}

impl ExportRow {
    fn tagged(dc_line: impl Into<String>, row_type: &str) -> Self {
        Self {
            dc_line: dc_line.into(),
            row_type: row_type.to_string(),
            ..Default::default()
        }
    }
}

/// One row per calculation: fleet totals plus licensing.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSummaryRow {
    pub lines: u32,
    pub kt_400: u32,
    pub kt_2: u32,
    pub kt_1: u32,
    pub total_controllers: u32,
    pub controller_cost: u64,
    pub expansion_cost: u64,
    pub grand_total: u64,
    /// `None` when no license was resolved or nothing is licensable yet.
    pub license_tier: Option<String>,
    pub redundancy: Option<bool>,
    pub license_cost: Option<u64>,
}

/// One row per DC line: demand, allocation, and cost, fully denormalized.
#[derive(Debug, Clone, Serialize)]
pub struct LineRow {
    pub dc_line: u32,
    pub readers: u32,
    pub inputs: u32,
    pub outputs: u32,
    pub kt_400: u32,
    pub kt_2: u32,
    pub kt_1: u32,
    pub readers_provided: u32,
    pub inputs_provided: u32,
    pub outputs_provided: u32,
    pub controller_cost: u64,
    pub input_shortage: u32,
    pub output_shortage: u32,
    pub expansion_modules: Vec<String>,
    pub expansion_cost: u64,
    pub total_cost: u64,
}

impl From<&LineResult> for LineRow {
    fn from(line: &LineResult) -> Self {
        let shortage = line.shortage();
        let counts = line.controllers.counts;
        LineRow {
            dc_line: line.line.0,
            readers: line.demand.readers,
            inputs: line.demand.inputs,
            outputs: line.demand.outputs,
            kt_400: counts.kt_400,
            kt_2: counts.kt_2,
            kt_1: counts.kt_1,
            readers_provided: line.controllers.readers_provided,
            inputs_provided: line.controllers.inputs_provided,
            outputs_provided: line.controllers.outputs_provided,
            controller_cost: line.controllers.cost,
            input_shortage: shortage.inputs,
            output_shortage: shortage.outputs,
            expansion_modules: line.expansion.picks.iter().map(|p| p.to_string()).collect(),
            expansion_cost: line.expansion.cost,
            total_cost: line.total_cost,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder: Report → Rows
// ---------------------------------------------------------------------------

impl Report<'_> {
    /// Flatten the report into the tabular export layout.
    ///
    /// Per line: Requirements, Controllers, Expansion, TOTAL, blank. Then the
    /// license rows (when a license decision exists) and the grand total.
    pub fn to_export_rows(&self) -> Vec<ExportRow> {
        let mut rows = Vec::with_capacity(self.fleet.len() * 5 + 6);

        for line in &self.fleet.lines {
            let id = line.line.to_string();
            let c = &line.controllers;

            rows.push(ExportRow {
                readers: line.demand.readers.to_string(),
                inputs: line.demand.inputs.to_string(),
                outputs: line.demand.outputs.to_string(),
                ..ExportRow::tagged(&id, "Requirements")
            });

            rows.push(ExportRow {
                readers: c.readers_provided.to_string(),
                inputs: c.inputs_provided.to_string(),
                outputs: c.outputs_provided.to_string(),
                kt_400: c.counts.get(ControllerKind::Kt400).to_string(),
                kt_2: c.counts.get(ControllerKind::Kt2).to_string(),
                kt_1: c.counts.get(ControllerKind::Kt1).to_string(),
                controller_cost: c.cost.to_string(),
                ..ExportRow::tagged(&id, "Controllers")
            });

            rows.push(ExportRow {
                expansion_modules: line.expansion.to_string(),
                expansion_cost: line.expansion.cost.to_string(),
                ..ExportRow::tagged(&id, "Expansion")
            });

            rows.push(ExportRow {
                total_cost: line.total_cost.to_string(),
                ..ExportRow::tagged(&id, "TOTAL")
            });

            rows.push(ExportRow::default());
        }

        if let Some(decision) = self.license.and_then(LicenseOutcome::decision) {
            const TAG: &str = "LICENSE INFO";

            rows.push(ExportRow {
                readers: if decision.redundancy {
                    "Redundant"
                } else {
                    "Non-Redundant"
                }
                .to_string(),
                inputs: format!("Total Controllers: {}", decision.total_controllers),
                ..ExportRow::tagged(TAG, "System Configuration")
            });

            rows.push(ExportRow {
                readers: decision.tier.display_name().to_string(),
                ..ExportRow::tagged(TAG, "Primary License")
            });

            if decision.redundancy {
                for add_on in &decision.add_ons {
                    rows.push(ExportRow {
                        readers: add_on.kind.display_name().to_string(),
                        inputs: format!("Cost: ${}", add_on.cost),
                        ..ExportRow::tagged(TAG, "Additional License")
                    });
                }
                rows.push(ExportRow {
                    readers: format!("${}", decision.total_license_cost),
                    ..ExportRow::tagged(TAG, "Total License Cost")
                });
            }
        }

        let totals = &self.fleet.totals;
        rows.push(ExportRow {
            kt_400: totals.controllers.kt_400.to_string(),
            kt_2: totals.controllers.kt_2.to_string(),
            kt_1: totals.controllers.kt_1.to_string(),
            controller_cost: totals.controller_cost.to_string(),
            expansion_cost: totals.expansion_cost.to_string(),
            total_cost: totals.grand_total.to_string(),
            ..ExportRow::tagged("GRAND TOTAL", "Summary")
        });

        rows
    }

    /// Flatten the report into NDJSON-ready rows.
    pub fn to_rows(&self) -> (FleetSummaryRow, Vec<LineRow>) {
        let totals = &self.fleet.totals;
        let decision = self.license.and_then(LicenseOutcome::decision);

        let summary = FleetSummaryRow {
            lines: self.fleet.len() as u32,
            kt_400: totals.controllers.kt_400,
            kt_2: totals.controllers.kt_2,
            kt_1: totals.controllers.kt_1,
            total_controllers: self.fleet.total_controllers(),
            controller_cost: totals.controller_cost,
            expansion_cost: totals.expansion_cost,
            grand_total: totals.grand_total,
            license_tier: decision.map(|d| d.tier.name().to_string()),
            redundancy: decision.map(|d| d.redundancy),
            license_cost: decision.map(|d| d.total_license_cost),
        };

        let lines = self.fleet.lines.iter().map(LineRow::from).collect();

        (summary, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculate, license, Catalog, LineBook};
    use dcsize_core::{DeviceKind, DeviceTally, FleetResult, LicensePricing};

    fn fleet() -> FleetResult {
        let mut book = LineBook::new();
        book.add(
            DeviceTally::default()
                .with(DeviceKind::SmartCard, 2)
                .with(DeviceKind::DoorSensor, 2)
                .with(DeviceKind::MagneticLock, 2),
        );
        book.add(
            DeviceTally::default()
                .with(DeviceKind::SmartCard, 1)
                .with(DeviceKind::DoorSensor, 6),
        );
        calculate(book.lines(), Catalog::standard()).unwrap()
    }

    #[test]
    fn one_row_group_per_line_then_grand_total() {
        let fleet = fleet();
        let rows = Report::build(&fleet, None).to_export_rows();
        assert_eq!(rows.len(), 2 * 5 + 1);

        let types: Vec<&str> = rows[..5].iter().map(|r| r.row_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["Requirements", "Controllers", "Expansion", "TOTAL", ""]
        );
        assert_eq!(rows[1].kt_2, "1");
        assert_eq!(rows[1].controller_cost, "750");
        assert_eq!(rows[2].expansion_modules, "None");
        assert_eq!(rows[2].expansion_cost, "0");
        assert_eq!(rows[4], ExportRow::default());

        assert_eq!(rows[7].expansion_modules, "inout16 (16/0)");

        let total = rows.last().unwrap();
        assert_eq!(total.dc_line, "GRAND TOTAL");
        assert_eq!(total.row_type, "Summary");
        assert_eq!(total.total_cost, fleet.totals.grand_total.to_string());
    }

    #[test]
    fn redundant_license_rows() {
        let fleet = fleet();
        let outcome = license::resolve(fleet.total_controllers(), true, &LicensePricing::default());
        let rows = Report::build(&fleet, Some(&outcome)).to_export_rows();

        let license: Vec<&ExportRow> = rows.iter().filter(|r| r.dc_line == "LICENSE INFO").collect();
        let types: Vec<&str> = license.iter().map(|r| r.row_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "System Configuration",
                "Primary License",
                "Additional License",
                "Additional License",
                "Total License Cost"
            ]
        );
        assert_eq!(license[0].readers, "Redundant");
        assert_eq!(license[0].inputs, "Total Controllers: 2");
        assert_eq!(license[1].readers, "Global License");
        assert_eq!(license[2].inputs, "Cost: $500");
        assert_eq!(license[4].readers, "$1250");
    }

    #[test]
    fn non_redundant_license_has_two_rows() {
        let fleet = fleet();
        let outcome = license::resolve(fleet.total_controllers(), false, &LicensePricing::default());
        let rows = Report::build(&fleet, Some(&outcome)).to_export_rows();
        let license: Vec<&ExportRow> = rows.iter().filter(|r| r.dc_line == "LICENSE INFO").collect();
        assert_eq!(license.len(), 2);
        assert_eq!(license[1].readers, "Kantech Special License");
    }

    #[test]
    fn ndjson_rows_carry_shortage() {
        let fleet = fleet();
        let (summary, lines) = Report::build(&fleet, None).to_rows();
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.total_controllers, 2);
        assert!(summary.license_tier.is_none());
        assert_eq!(lines[1].input_shortage, 2);
        assert_eq!(lines[1].expansion_modules, vec!["inout16 (16/0)".to_string()]);
    }
}
