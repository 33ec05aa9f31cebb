// Scenario B from the core's design notes: a taken BEQ must flush the
// speculative instructions fetched past it and redirect the PC to the
// branch target.

use tomasulo_rust::{SimulatorConfig, TomasuloCore};

#[test]
fn taken_branch_flushes_speculative_instructions() {
    let program = "\
ADDI R1, R0, 10
ADDI R2, R0, 10
BEQ R1, R2, 2
ADDI R3, R0, 5
ADD R4, R1, R2
SUB R5, R1, R2
SW R5, 0(R0)";

    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load(program);

    let mut cycles = 0;
    while !core.is_done() && cycles < 200 {
        core.step();
        cycles += 1;
    }
    assert!(core.is_done());

    let metrics = core.metrics();
    assert_eq!(metrics.branch_miss, 1);
    assert_eq!(metrics.retired, 5);

    assert_eq!(core.register("R1"), 10);
    assert_eq!(core.register("R2"), 10);
    assert_eq!(core.register("R3"), 0, "ADDI R3 was speculative and must not commit");
    assert_eq!(core.register("R4"), 0, "ADD R4 was speculative and must not commit");
    assert_eq!(core.register("R5"), 0, "post-flush SUB reads R1=R2=10 straight from the register file");
}

#[test]
fn not_taken_branch_does_not_flush() {
    let program = "\
ADDI R1, R0, 10
ADDI R2, R0, 3
BEQ R1, R2, 5
ADDI R3, R0, 7";

    let mut core = TomasuloCore::new(SimulatorConfig::new()).unwrap();
    core.load(program);

    let mut cycles = 0;
    while !core.is_done() && cycles < 200 {
        core.step();
        cycles += 1;
    }
    assert!(core.is_done());

    let metrics = core.metrics();
    assert_eq!(metrics.branch_miss, 0);
    assert_eq!(metrics.retired, 4);
    assert_eq!(core.register("R3"), 7);
}
