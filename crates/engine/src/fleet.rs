//! Per-line sizing pipeline and fleet-wide aggregation.
//!
//! Every line is sized against its own controllers only; spare capacity on
//! one line never offsets a shortage on another.

use crate::catalog::Catalog;
use crate::controller::select_controllers;
use crate::expansion::select_expansion;
use dcsize_core::{DcLine, FleetResult, LineResult, SizingResult};

/// Demand -> controllers -> expansion for a single line.
pub fn calculate_line(line: &DcLine, catalog: &Catalog) -> SizingResult<LineResult> {
    let demand = line.tally.demand();
    let controllers =
        select_controllers(demand.readers, catalog).map_err(|e| e.for_line(line.id))?;
    let expansion = select_expansion(controllers.shortage(&demand), catalog);
    let total_cost = controllers.cost + expansion.cost;

    tracing::debug!(
        line = %line.id,
        demand = %demand,
        controllers = %controllers.counts,
        modules = %expansion,
        total_cost,
        "line sized"
    );

    Ok(LineResult {
        line: line.id,
        demand,
        controllers,
        expansion,
        total_cost,
    })
}

/// Sizes every line in order and sums the totals.
///
/// Stops at the first infeasible line and reports it; a failed line is
/// never dropped from the totals silently.
pub fn calculate(lines: &[DcLine], catalog: &Catalog) -> SizingResult<FleetResult> {
    let mut fleet = FleetResult::new();
    for line in lines {
        let result = calculate_line(line, catalog).inspect_err(|e| {
            tracing::warn!(line = %line.id, error = %e, "fleet calculation halted");
        })?;
        fleet.push(result);
    }

    tracing::info!(
        lines = fleet.len(),
        controllers = fleet.total_controllers(),
        controller_cost = fleet.totals.controller_cost,
        expansion_cost = fleet.totals.expansion_cost,
        grand_total = fleet.totals.grand_total,
        "fleet calculated"
    );
    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcsize_core::{DeviceKind, DeviceTally, LineId, SizingError};

    fn line(id: u32, tally: DeviceTally) -> DcLine {
        DcLine {
            id: LineId(id),
            tally,
        }
    }

    fn basic_door() -> DeviceTally {
        DeviceTally::default()
            .with(DeviceKind::SmartCard, 2)
            .with(DeviceKind::DoorSensor, 2)
            .with(DeviceKind::MagneticLock, 2)
    }

    #[test]
    fn basic_door_needs_one_kt2_and_no_modules() {
        let result = calculate_line(&line(1, basic_door()), Catalog::standard()).unwrap();
        assert_eq!(result.demand.to_string(), "2R/4I/2O");
        assert_eq!(result.controllers.counts.kt_2, 1);
        assert_eq!(result.controllers.counts.total(), 1);
        assert_eq!(result.controllers.cost, 750);
        assert!(result.expansion.is_empty());
        assert_eq!(result.total_cost, 750);
    }

    #[test]
    fn shortage_is_covered_by_expansion() {
        // 1R/10I/4O against one kt-1 (4I/2O) leaves 6I/2O short.
        let tally = DeviceTally::default()
            .with(DeviceKind::SmartCard, 1)
            .with(DeviceKind::DoorSensor, 6)
            .with(DeviceKind::MagneticLock, 4);
        let result = calculate_line(&line(1, tally), Catalog::standard()).unwrap();
        assert_eq!(result.controllers.counts.kt_1, 1);
        assert_eq!(result.shortage().inputs, 6);
        assert_eq!(result.shortage().outputs, 2);
        assert_eq!(result.expansion.to_string(), "inout16 (12/4)");
        assert_eq!(result.total_cost, 450 + 447);
    }

    #[test]
    fn lines_do_not_share_capacity() {
        // Line 1 has plenty of spare inputs; line 2 still buys its own module.
        let lines = vec![
            line(1, DeviceTally::default().with(DeviceKind::SmartCard, 4)),
            line(
                2,
                DeviceTally::default()
                    .with(DeviceKind::SmartCard, 1)
                    .with(DeviceKind::DoorSensor, 5),
            ),
        ];
        let fleet = calculate(&lines, Catalog::standard()).unwrap();
        assert_eq!(fleet.lines[1].expansion.module_count(), 1);
        assert_eq!(fleet.totals.expansion_cost, 447);
    }

    #[test]
    fn three_identical_lines_triple_the_cost() {
        let lines: Vec<_> = (1..=3).map(|i| line(i, basic_door())).collect();
        let fleet = calculate(&lines, Catalog::standard()).unwrap();
        assert_eq!(fleet.total_controllers(), 3);
        assert_eq!(fleet.totals.controllers.kt_2, 3);
        assert_eq!(fleet.totals.grand_total, 3 * 750);
        let ids: Vec<_> = fleet.lines.iter().map(|l| l.line).collect();
        assert_eq!(ids, vec![LineId(1), LineId(2), LineId(3)]);
    }

    #[test]
    fn infeasible_line_halts_and_is_named() {
        let mut catalog = Catalog::standard().clone();
        for model in &mut catalog.controllers {
            model.readers = 0;
        }
        let lines = vec![
            line(1, DeviceTally::default().with(DeviceKind::DoorSensor, 2)),
            line(2, DeviceTally::default().with(DeviceKind::SmartCard, 1)),
        ];
        assert_eq!(
            calculate(&lines, &catalog),
            Err(SizingError::LineInfeasible {
                line: LineId(2),
                readers_required: 1
            })
        );
    }

    #[test]
    fn oversized_line_is_refused() {
        let tally = DeviceTally {
            smart_card: u32::MAX,
            fingerprint: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            calculate_line(&line(7, tally), Catalog::standard()),
            Err(SizingError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_fleet_is_zero() {
        let fleet = calculate(&[], Catalog::standard()).unwrap();
        assert!(fleet.is_empty());
        assert_eq!(fleet.totals.grand_total, 0);
    }
}
