//! End-to-end sizing scenarios: line book -> fleet -> license -> export.

use dcsize_core::{DeviceKind, DeviceTally, LicenseOutcome, LicensePricing, LicenseTier, LineId};
use dcsize_engine::sink::csv_export::CsvSink;
use dcsize_engine::{calculate, calculate_line, license, Catalog, LineBook, Report};
use std::io::Read;

fn basic_door() -> DeviceTally {
    DeviceTally::default()
        .with(DeviceKind::SmartCard, 2)
        .with(DeviceKind::DoorSensor, 2)
        .with(DeviceKind::MagneticLock, 2)
}

#[test]
fn single_basic_door() {
    let mut book = LineBook::new();
    let id = book.add(basic_door());

    let result = calculate_line(book.get(id).unwrap(), Catalog::standard()).unwrap();
    assert_eq!(
        (result.demand.readers, result.demand.inputs, result.demand.outputs),
        (2, 4, 2)
    );
    assert_eq!(result.controllers.counts.kt_2, 1);
    assert_eq!(result.controllers.counts.total(), 1);
    assert_eq!(result.controllers.cost, 750);
    assert!(result.shortage().is_zero());
    assert!(result.expansion.is_empty());
}

#[test]
fn three_identical_lines_stay_special() {
    let mut book = LineBook::new();
    for _ in 0..3 {
        book.add(basic_door());
    }

    let fleet = calculate(book.lines(), Catalog::standard()).unwrap();
    let single = calculate_line(&book.lines()[0], Catalog::standard()).unwrap();
    assert_eq!(fleet.total_controllers(), 3);
    assert_eq!(fleet.totals.grand_total, 3 * single.total_cost);

    let outcome = license::resolve(fleet.total_controllers(), false, &LicensePricing::default());
    assert_eq!(outcome.decision().unwrap().tier, LicenseTier::Special);
}

#[test]
fn thirty_three_controllers_go_corporate() {
    let mut book = LineBook::new();
    for _ in 0..33 {
        book.add(DeviceTally::default().with(DeviceKind::Fingerprint, 1));
    }
    let fleet = calculate(book.lines(), Catalog::standard()).unwrap();
    assert_eq!(fleet.total_controllers(), 33);

    let pricing = LicensePricing::default();
    let plain = license::resolve(fleet.total_controllers(), false, &pricing);
    assert_eq!(plain.decision().unwrap().tier, LicenseTier::Corporate);

    let redundant = license::resolve(fleet.total_controllers(), true, &pricing);
    let decision = redundant.decision().unwrap();
    assert_eq!(decision.tier, LicenseTier::Global);
    assert_eq!(decision.add_ons.len(), 2);
}

#[test]
fn zero_reader_line_is_feasible() {
    let mut book = LineBook::new();
    book.add(DeviceTally::default().with(DeviceKind::DoorSensor, 3));
    let fleet = calculate(book.lines(), Catalog::standard()).unwrap();

    let line = &fleet.lines[0];
    assert_eq!(line.controllers.counts.total(), 0);
    assert_eq!(line.controllers.cost, 0);
    assert_eq!(line.expansion.cost, 447);

    let outcome = license::resolve(fleet.total_controllers(), false, &LicensePricing::default());
    assert_eq!(outcome, LicenseOutcome::NotApplicable);
}

#[test]
fn edit_then_recalculate_rebuilds_totals() {
    let mut book = LineBook::new();
    let first = book.add(basic_door());
    book.add(basic_door());
    let before = calculate(book.lines(), Catalog::standard()).unwrap();

    book.set_device(first, DeviceKind::SmartCard, 4).unwrap();
    let after = calculate(book.lines(), Catalog::standard()).unwrap();

    assert_eq!(after.lines[0].controllers.counts.kt_400, 1);
    assert_eq!(after.lines[1], before.lines[1]);
    assert_eq!(
        after.totals.grand_total,
        after.lines.iter().map(|l| l.total_cost).sum::<u64>()
    );
    assert!(book.set_device(LineId(42), DeviceKind::Buzzer, 1).is_err());
}

#[test]
fn reader_increase_can_unlock_cheaper_expansion() {
    // 3 readers -> kt-2 + kt-1 (12 inputs): 33 short, past the two-module
    // search, so three in16. 4 readers -> kt-400 (16 inputs): 29 short, two
    // inout16 boards.
    let three = DeviceTally::default()
        .with(DeviceKind::SmartCard, 3)
        .with(DeviceKind::DoorSensor, 45);
    let four = three.with(DeviceKind::SmartCard, 4);

    let mut book = LineBook::new();
    book.add(three);
    book.add(four);
    let fleet = calculate(book.lines(), Catalog::standard()).unwrap();

    assert_eq!(fleet.lines[0].expansion.to_string(), "in16 (x3)");
    assert_eq!(fleet.lines[0].total_cost, 1200 + 3 * 470);
    assert_eq!(fleet.lines[1].expansion.module_count(), 2);
    assert_eq!(fleet.lines[1].total_cost, 1400 + 2 * 447);
}

#[test]
fn csv_export_to_file() {
    let mut book = LineBook::new();
    book.add(basic_door());
    book.add(DeviceTally::default().with(DeviceKind::DoorSensor, 40));
    let fleet = calculate(book.lines(), Catalog::standard()).unwrap();
    let outcome = license::resolve(fleet.total_controllers(), true, &LicensePricing::default());
    let rows = Report::build(&fleet, Some(&outcome)).to_export_rows();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut sink = CsvSink::new(file.as_file_mut());
    sink.write_rows(&rows).unwrap();
    let written = sink.finish().unwrap();
    assert_eq!(written, rows.len());

    let mut text = String::new();
    file.reopen().unwrap().read_to_string(&mut text).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), rows.len() + 1);
    assert!(lines[0].starts_with("DC_Line,Type,Readers"));
    assert!(lines.contains(&"2,Expansion,,,,,,,,in16 (x3),1410,"));
    assert!(lines.contains(&"LICENSE INFO,Primary License,Global License,,,,,,,,,"));
    assert!(lines
        .last()
        .unwrap()
        .starts_with("GRAND TOTAL,Summary,,,,0,1,0,750,,1410,2160"));
}
