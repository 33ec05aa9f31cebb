// Benchmarks for the Tomasulo core's pipeline controller, stepping the
// two bundled demo programs to completion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tomasulo_rust::{SimulatorConfig, TomasuloCore};

const DATA_DEPENDENCY: &str = "\
LW R6, 32(R2)
LW R2, 44(R3)
MUL R0, R2, R4
SUB R8, R6, R2
SW R8, 10(R6)
ADD R6, R8, R2";

const BRANCH_MISPREDICTION: &str = "\
ADDI R1, R0, 10
ADDI R2, R0, 10
BEQ R1, R2, 2
ADDI R3, R0, 5
ADD R4, R1, R2
SUB R5, R1, R2
SW R5, 0(R0)";

fn run_to_completion(core: &mut TomasuloCore) {
    while !core.is_done() {
        core.step();
    }
}

fn bench_data_dependency(c: &mut Criterion) {
    c.bench_function("data_dependency_chain", |b| {
        b.iter(|| {
            let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
            core.load(black_box(DATA_DEPENDENCY));
            run_to_completion(&mut core);
            black_box(core.metrics())
        });
    });
}

fn bench_branch_misprediction(c: &mut Criterion) {
    c.bench_function("branch_misprediction", |b| {
        b.iter(|| {
            let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
            core.load(black_box(BRANCH_MISPREDICTION));
            run_to_completion(&mut core);
            black_box(core.metrics())
        });
    });
}

fn bench_rob_capacity_scaling(c: &mut Criterion) {
    let program = (1..=64).map(|i| format!("ADDI R{}, R0, {i}", i % 32)).collect::<Vec<_>>().join("\n");

    c.bench_function("rob_capacity_scaling", |b| {
        b.iter(|| {
            let config = SimulatorConfig::new().with_rob_capacity(16);
            let mut core = TomasuloCore::new(config).unwrap();
            core.load(black_box(&program));
            run_to_completion(&mut core);
            black_box(core.metrics())
        });
    });
}

criterion_group!(benches, bench_data_dependency, bench_branch_misprediction, bench_rob_capacity_scaling);
criterion_main!(benches);
