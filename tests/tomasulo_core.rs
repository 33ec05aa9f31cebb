// Integration tests driving `TomasuloCore` through its public
// `step`/`register`/`metrics` surface, covering the data-dependency
// chain, RAT-shadowing, and operand-forwarding scenarios.

use tomasulo_rust::{SimulatorConfig, TomasuloCore};

fn run_to_completion(core: &mut TomasuloCore, max_cycles: u64) {
    let mut cycles = 0;
    while !core.is_done() && cycles < max_cycles {
        core.step();
        cycles += 1;
    }
    assert!(core.is_done(), "program did not drain within {max_cycles} cycles");
}

#[test]
fn data_dependency_chain_commits_with_mocked_loads() {
    let program = "\
LW R6, 32(R2)
LW R2, 44(R3)
MUL R0, R2, R4
SUB R8, R6, R2
SW R8, 10(R6)
ADD R6, R8, R2";

    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load(program);
    run_to_completion(&mut core, 200);

    let metrics = core.metrics();
    assert_eq!(metrics.branch_miss, 0);
    assert_eq!(metrics.retired, 6);
    assert_eq!(core.register("R2"), 99);
    assert_eq!(core.register("R0"), 0);
    assert_eq!(core.register("R8"), 0);
    assert_eq!(core.register("R6"), 99);
}

#[test]
fn rat_shadowing_keeps_only_the_last_writer() {
    let program = "\
ADDI R1, R0, 1
ADDI R1, R0, 2";

    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load(program);
    run_to_completion(&mut core, 50);

    assert_eq!(core.metrics().retired, 2);
    assert_eq!(core.register("R1"), 2);
}

#[test]
fn operand_forwarding_latches_both_slots_in_one_pass() {
    let program = "\
ADD R3, R1, R2
ADD R4, R3, R3";

    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load(program);
    run_to_completion(&mut core, 50);

    assert_eq!(core.metrics().retired, 2);
    assert_eq!(core.register("R3"), 0);
    assert_eq!(core.register("R4"), 0);
}

#[test]
fn step_is_a_no_op_once_drained() {
    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load("ADDI R1, R0, 5");
    run_to_completion(&mut core, 50);

    let clock_at_completion = core.metrics().clock;
    core.step();
    core.step();
    assert_eq!(core.metrics().clock, clock_at_completion);
}

#[test]
fn reloading_a_program_resets_microarchitectural_state() {
    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load("ADDI R1, R0, 5");
    run_to_completion(&mut core, 50);
    assert_eq!(core.register("R1"), 5);

    core.load("ADDI R1, R0, 9");
    assert_eq!(core.metrics().clock, 0);
    assert_eq!(core.register("R1"), 0);
    run_to_completion(&mut core, 50);
    assert_eq!(core.register("R1"), 9);
}
