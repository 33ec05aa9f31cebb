// Integration tests for the instruction parser (spec §4.1): field
// layout per addressing mode, comment/blank-line handling, and silent
// drop of unparseable lines.

use tomasulo_rust::tomasulo::instruction::Opcode;
use tomasulo_rust::utils::parser::parse_program;

#[test]
fn register_form_splits_dest_src1_src2() {
    let instrs = parse_program("ADD R3, R1, R2");
    assert_eq!(instrs.len(), 1);
    let instr = &instrs[0];
    assert_eq!(instr.opcode, Opcode::Add);
    assert_eq!(instr.dest.as_deref(), Some("R3"));
    assert_eq!(instr.src1.as_deref(), Some("R1"));
    assert_eq!(instr.src2.as_deref(), Some("R2"));
    assert_eq!(instr.immediate, 0);
    assert_eq!(instr.pc_addr, 0);
}

#[test]
fn load_form_latches_offset_and_base() {
    let instrs = parse_program("LW R6, 32(R2)");
    let instr = &instrs[0];
    assert_eq!(instr.opcode, Opcode::Lw);
    assert_eq!(instr.dest.as_deref(), Some("R6"));
    assert!(instr.src1.is_none());
    assert_eq!(instr.src2.as_deref(), Some("R2"));
    assert_eq!(instr.immediate, 32);
}

#[test]
fn store_form_has_no_dest() {
    let instrs = parse_program("SW R8, 10(R6)");
    let instr = &instrs[0];
    assert_eq!(instr.opcode, Opcode::Sw);
    assert!(instr.dest.is_none());
    assert_eq!(instr.src1.as_deref(), Some("R8"));
    assert_eq!(instr.src2.as_deref(), Some("R6"));
    assert_eq!(instr.immediate, 10);
}

#[test]
fn branch_form_defers_the_immediate() {
    let instrs = parse_program("BEQ R1, R2, 2");
    let instr = &instrs[0];
    assert_eq!(instr.opcode, Opcode::Beq);
    assert_eq!(instr.dest.as_deref(), Some("R1"));
    assert_eq!(instr.src1.as_deref(), Some("R2"));
    assert_eq!(instr.src2.as_deref(), Some("2"));
    assert_eq!(instr.immediate, 0, "branch immediate is lifted at Issue, not parse time");
}

#[test]
fn blank_lines_and_comments_are_skipped() {
    let instrs = parse_program("\n# a comment\nADDI R1, R0, 5  # trailing comment\n\n");
    assert_eq!(instrs.len(), 1);
    assert_eq!(instrs[0].src2.as_deref(), Some("5"));
}

#[test]
fn unrecognized_opcodes_are_dropped_not_fatal() {
    let instrs = parse_program("NOPE R1, R2, R3\nADD R1, R2, R3");
    assert_eq!(instrs.len(), 1);
    assert_eq!(instrs[0].opcode, Opcode::Add);
}

#[test]
fn pc_addr_tracks_position_among_kept_instructions() {
    let instrs = parse_program("BOGUS\nADD R1, R2, R3\nSUB R4, R1, R2");
    assert_eq!(instrs.len(), 2);
    assert_eq!(instrs[0].pc_addr, 0);
    assert_eq!(instrs[1].pc_addr, 1);
}

#[test]
fn instruction_ids_are_monotonic_and_one_based() {
    let instrs = parse_program("ADD R1, R2, R3\nSUB R4, R1, R2\nMUL R5, R1, R2");
    let ids: Vec<u32> = instrs.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
