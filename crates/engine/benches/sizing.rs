use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dcsize_core::{DcLine, DeviceKind, DeviceTally, LineId, Shortage};
use dcsize_engine::{calculate, select_controllers, select_expansion, Catalog};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_line(i: u32) -> DcLine {
    DcLine {
        id: LineId(i + 1),
        tally: DeviceTally::default()
            .with(DeviceKind::SmartCard, 1 + i % 4)
            .with(DeviceKind::Fingerprint, i % 2)
            .with(DeviceKind::DoorSensor, 2 + i % 3)
            .with(DeviceKind::MagneticLock, 1 + i % 2)
            .with(DeviceKind::RexButton, i % 3)
            .with(DeviceKind::DoubleDoorLock, i % 2),
    }
}

// ---------------------------------------------------------------------------
// Benchmark: controller search vs reader demand
// ---------------------------------------------------------------------------

fn bench_controller_search(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let mut group = c.benchmark_group("select_controllers");
    for readers in [2u32, 16, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(readers), &readers, |b, &r| {
            b.iter(|| black_box(select_controllers(black_box(r), catalog).unwrap()));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: expansion tiers
// ---------------------------------------------------------------------------

fn bench_expansion_tiers(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let mut group = c.benchmark_group("select_expansion");
    for (label, inputs, outputs) in [("single", 6, 2), ("pair", 20, 8), ("fallback", 40, 20)] {
        let shortage = Shortage { inputs, outputs };
        group.bench_function(label, |b| {
            b.iter(|| black_box(select_expansion(black_box(shortage), catalog)));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: whole fleet
// ---------------------------------------------------------------------------

fn bench_fleet(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let mut group = c.benchmark_group("calculate_fleet");
    for count in [10u32, 50, 200] {
        let lines: Vec<DcLine> = (0..count).map(make_line).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &lines, |b, lines| {
            b.iter(|| black_box(calculate(lines, catalog).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_controller_search,
    bench_expansion_tiers,
    bench_fleet,
);
criterion_main!(benches);
