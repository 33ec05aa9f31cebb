// core.rs - Tomasulo's Algorithm implementation for out-of-order execution
//
// Tomasulo's algorithm is a hardware algorithm for dynamic scheduling of
// instructions to allow out-of-order execution. This module implements:
//   - Reservation stations for holding instructions
//   - Register renaming with a register alias table
//   - A common data bus for result forwarding
//   - A reorder buffer for in-order commit
//
// The cycle runs Commit, Write-Result, Execute, Issue in that fixed
// order (spec §4.6): later stages in a cycle never observe earlier
// stages' mutations through the data path they would in hardware, which
// is what makes "value written at cycle N visible to dependents at
// cycle N+1" hold without special-casing it.

use crate::config::SimulatorConfig;
use crate::errors::CoreError;
use crate::utils::parser::parse_program;

use super::instruction::{Instruction, Opcode, Stage};
use super::log::LogEvent;
use super::metrics::Metrics;
use super::rat::RegisterAliasTable;
use super::registers::{register_index, RegisterFile};
use super::reservation_station::{Operand, ReservationStation, RsClass};
use super::rob::ReorderBuffer;
use super::snapshot::{
    class_label, metrics_view, stage_label, InstructionView, RatBindingView, RegisterView, RobEntryView,
    ReservationStationView, Snapshot,
};

pub struct TomasuloCore {
    config: SimulatorConfig,
    metrics: Metrics,
    pc: usize,
    instruction_queue: Vec<Instruction>,
    rat: RegisterAliasTable,
    rob: ReorderBuffer,
    stations: Vec<ReservationStation>,
    reg_file: RegisterFile,
    log: Vec<LogEvent>,
}

impl TomasuloCore {
    pub fn new(config: SimulatorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let rat = RegisterAliasTable::new(config.num_registers);
        let rob = ReorderBuffer::new(config.rob_capacity);
        let stations = build_stations(&config);
        let reg_file = RegisterFile::new(config.num_registers);
        Ok(Self {
            config,
            metrics: Metrics::default(),
            pc: 0,
            instruction_queue: Vec::new(),
            rat,
            rob,
            stations,
            reg_file,
            log: Vec::new(),
        })
    }

    /// Reset all microarchitectural state and install a new program
    /// (spec §6 "Control operations required").
    pub fn load(&mut self, program: &str) {
        self.instruction_queue = parse_program(program);
        self.pc = 0;
        self.metrics = Metrics::default();
        self.rat = RegisterAliasTable::new(self.config.num_registers);
        self.rob = ReorderBuffer::new(self.config.rob_capacity);
        self.stations = build_stations(&self.config);
        self.reg_file = RegisterFile::new(self.config.num_registers);
        self.log.clear();
    }

    /// Advance one clock cycle. No-op once the instruction queue is
    /// drained and the ROB has emptied (spec §6).
    pub fn step(&mut self) {
        if self.pc >= self.instruction_queue.len() && self.rob.is_empty() {
            return;
        }
        self.metrics.clock += 1;

        let flushed = self.commit();
        if flushed {
            // Write-Result and Execute do not run after a flush; the
            // redirected fetch resumes next cycle (spec §4.7 step 4).
            return;
        }
        self.write_result();
        self.execute();
        self.issue();
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn register(&self, name: &str) -> i64 {
        register_index(name, self.config.num_registers).map(|idx| self.reg_file.read(idx)).unwrap_or(0)
    }

    pub fn log_tail(&self, n: usize) -> &[LogEvent] {
        let len = self.log.len();
        &self.log[len.saturating_sub(n)..]
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// True once the instruction queue is drained and the ROB has
    /// emptied, the condition under which `step` becomes a no-op.
    pub fn is_done(&self) -> bool {
        self.pc >= self.instruction_queue.len() && self.rob.is_empty()
    }

    // ---- Commit ---------------------------------------------------

    /// Returns `true` if a branch misprediction flush happened this
    /// cycle (spec §4.7).
    fn commit(&mut self) -> bool {
        if self.rob.is_empty() {
            return false;
        }
        let head = match self.rob.head() {
            Some(h) if h.ready => h.clone(),
            _ => return false,
        };

        let instr_index = head.instr_index;
        let opcode = self.instruction_queue[instr_index].opcode;
        let raw_text = self.instruction_queue[instr_index].raw_text.clone();
        let instr_id = self.instruction_queue[instr_index].id;
        let pc_addr = self.instruction_queue[instr_index].pc_addr;
        let immediate = self.instruction_queue[instr_index].immediate;
        let value = head.value.unwrap_or(0);

        if opcode.is_branch() {
            let taken = value == 1;

            self.rob.retire_head();
            self.metrics.retired += 1;
            self.instruction_queue[instr_index].stage = Stage::Committed;

            if taken {
                self.metrics.branch_miss += 1;
                self.log.push(LogEvent::Commit { cycle: self.metrics.clock, instr_id, raw_text });

                let target = (pc_addr as i64 + 1 + immediate) as usize;
                self.pc = target;

                self.rob.flush();
                for rs in self.stations.iter_mut() {
                    rs.clear();
                }
                self.rat.clear_all();

                self.log.push(LogEvent::FlushMispredict { cycle: self.metrics.clock, instr_id, target_pc: target });
                return true;
            }

            self.log.push(LogEvent::BranchNotTaken { cycle: self.metrics.clock, instr_id });
            return false;
        }

        if let Some(reg) = &head.dest_reg {
            if let Some(idx) = register_index(reg, self.config.num_registers) {
                let current = self.rat.get(idx);
                if current == Some(head.rob_id) || current.is_none() {
                    self.reg_file.write(idx, value);
                }
                self.rat.clear_if(idx, head.rob_id);
            }
        }

        self.rob.retire_head();
        self.metrics.retired += 1;
        self.instruction_queue[instr_index].stage = Stage::Committed;
        self.log.push(LogEvent::Commit { cycle: self.metrics.clock, instr_id, raw_text });
        false
    }

    // ---- Write-Result (CDB) ---------------------------------------

    fn write_result(&mut self) {
        let eligible: Vec<usize> = (0..self.stations.len())
            .filter(|&i| {
                let rs = &self.stations[i];
                rs.busy && rs.time_left == 0 && rs.dest.is_some()
            })
            .collect();

        for idx in eligible {
            let (op, vj, vk, dest) = {
                let rs = &self.stations[idx];
                (
                    rs.op.expect("eligible station has an op"),
                    rs.vj.and_then(|o| o.value()).unwrap_or(0),
                    rs.vk.and_then(|o| o.value()).unwrap_or(0),
                    rs.dest.expect("eligible station has a dest"),
                )
            };
            let result = compute_result(op, vj, vk);

            if let Some(entry) = self.rob.entry_mut(dest) {
                entry.value = Some(result);
                entry.ready = true;
                let instr_index = entry.instr_index;
                self.instruction_queue[instr_index].stage = Stage::WriteResult;
            }

            for rs in self.stations.iter_mut() {
                rs.forward(dest, result);
            }

            self.log.push(LogEvent::Write { cycle: self.metrics.clock, rob_id: dest, value: result, op: op.to_string() });

            self.stations[idx].clear();
        }
    }

    // ---- Execute ----------------------------------------------------

    fn execute(&mut self) {
        for rs in self.stations.iter_mut() {
            if rs.busy && rs.operands_ready() && rs.time_left > 0 {
                rs.time_left -= 1;
            }
        }
    }

    // ---- Issue ------------------------------------------------------

    fn issue(&mut self) {
        if self.pc >= self.instruction_queue.len() {
            return;
        }
        if self.rob.is_full() {
            self.metrics.stalls_rob += 1;
            self.log.push(LogEvent::BubbleRob { cycle: self.metrics.clock });
            return;
        }

        let opcode = self.instruction_queue[self.pc].opcode;
        let class = opcode.rs_class();
        let station_idx = match self.find_free_station(class) {
            Some(i) => i,
            None => {
                self.metrics.stalls_rs += 1;
                self.log.push(LogEvent::BubbleRs { cycle: self.metrics.clock, class: class.to_string() });
                return;
            },
        };

        if opcode.is_branch() {
            let instr = &mut self.instruction_queue[self.pc];
            if instr.immediate == 0 {
                if let Some(src2) = instr.src2.clone() {
                    if let Ok(v) = src2.parse::<i64>() {
                        instr.immediate = v;
                    }
                }
            }
        }

        let instr = self.instruction_queue[self.pc].clone();
        let (vj, vk) = self.latch_operands(&instr);
        let dest_reg = if opcode.writes_no_register() { None } else { instr.dest.clone() };

        let rob_id = self.rob.allocate(self.pc, dest_reg.clone());

        let latency = self.config.latency_of(opcode);
        let station = &mut self.stations[station_idx];
        station.issue(opcode, vj, vk, rob_id, latency);
        let rs_name = station.name.clone();

        if let Some(reg) = &dest_reg {
            if let Some(idx) = register_index(reg, self.config.num_registers) {
                self.rat.set(idx, rob_id);
            }
        }

        let issued = &mut self.instruction_queue[self.pc];
        issued.stage = Stage::Execute;
        let raw_text = issued.raw_text.clone();
        let instr_id = issued.id;

        self.log.push(LogEvent::Issue { cycle: self.metrics.clock, instr_id, raw_text, rs_name });
        self.pc += 1;
    }

    fn find_free_station(&self, class: RsClass) -> Option<usize> {
        self.stations.iter().position(|rs| rs.class == class && !rs.busy)
    }

    /// Per-opcode operand mapping at Issue (spec §4.5).
    fn latch_operands(&self, instr: &Instruction) -> (Operand, Operand) {
        match instr.opcode {
            Opcode::Sw | Opcode::Sd => {
                (self.operand_state(instr.src1.as_deref()), self.operand_state(instr.src2.as_deref()))
            },
            Opcode::Lw | Opcode::Ld => (Operand::Value(instr.immediate), self.operand_state(instr.src2.as_deref())),
            Opcode::Beq | Opcode::Bne => {
                (self.operand_state(instr.dest.as_deref()), self.operand_state(instr.src1.as_deref()))
            },
            _ => (self.operand_state(instr.src1.as_deref()), self.operand_state(instr.src2.as_deref())),
        }
    }

    /// The operand-state rule (spec §4.2): a register consults the RAT
    /// (latching a value if the producing ROB entry is ready, else the
    /// tag); anything else is parsed as an integer literal, 0 on failure.
    fn operand_state(&self, token: Option<&str>) -> Operand {
        let token = token.unwrap_or("");
        match register_index(token, self.config.num_registers) {
            Some(idx) => match self.rat.get(idx) {
                Some(rob_id) => match self.rob.entry(rob_id) {
                    Some(entry) if entry.ready => Operand::Value(entry.value.unwrap_or(0)),
                    Some(_) => Operand::Pending(rob_id),
                    None => Operand::Value(0),
                },
                None => Operand::Value(self.reg_file.read(idx)),
            },
            None => Operand::Value(token.parse::<i64>().unwrap_or(0)),
        }
    }

    // ---- Presenter interface (spec §6, §11) ------------------------

    pub fn snapshot(&self) -> Snapshot {
        let (clock, retired, stalls_rob, stalls_rs, branch_miss, ipc) = metrics_view(self.metrics);

        let instructions = self
            .instruction_queue
            .iter()
            .enumerate()
            .map(|(i, instr)| InstructionView {
                id: instr.id,
                raw_text: instr.raw_text.clone(),
                stage: stage_label(instr.stage),
                is_next_to_issue: i == self.pc,
            })
            .collect();

        let reservation_stations = self
            .stations
            .iter()
            .map(|rs| ReservationStationView {
                name: rs.name.clone(),
                class: class_label(rs.class),
                busy: rs.busy,
                op: rs.op.map(|o| o.to_string()),
                vj: rs.vj.and_then(|o| o.value()),
                vk: rs.vk.and_then(|o| o.value()),
                qj: rs.vj.and_then(|o| o.tag()),
                qk: rs.vk.and_then(|o| o.tag()),
                dest: rs.dest,
                time_left: rs.time_left,
            })
            .collect();

        let reorder_buffer = self
            .rob
            .iter_in_order()
            .map(|entry| RobEntryView {
                rob_id: entry.rob_id,
                raw_text: self.instruction_queue[entry.instr_index].raw_text.clone(),
                dest_reg: entry.dest_reg.clone(),
                value: entry.value,
                ready: entry.ready,
            })
            .collect();

        let rat = self
            .rat
            .bindings()
            .map(|(idx, rob_id)| RatBindingView { register: super::registers::register_name(idx), rob_id })
            .collect();

        let registers = self
            .reg_file
            .changed()
            .map(|(idx, value)| RegisterView { register: super::registers::register_name(idx), value })
            .collect();

        Snapshot {
            clock,
            retired,
            stalls_rob,
            stalls_rs,
            branch_miss,
            ipc,
            instructions,
            reservation_stations,
            reorder_buffer,
            rat,
            registers,
        }
    }
}

fn build_stations(config: &SimulatorConfig) -> Vec<ReservationStation> {
    let mut stations = Vec::with_capacity(config.rs_counts.total());
    for i in 0..config.rs_counts.add {
        stations.push(ReservationStation::new(format!("ADD{}", i + 1), RsClass::Add));
    }
    for i in 0..config.rs_counts.mul {
        stations.push(ReservationStation::new(format!("MUL{}", i + 1), RsClass::Mul));
    }
    for i in 0..config.rs_counts.load {
        stations.push(ReservationStation::new(format!("LOAD{}", i + 1), RsClass::Load));
    }
    stations
}

/// Write-Result's result formulas.
fn compute_result(op: Opcode, vj: i64, vk: i64) -> i64 {
    match op {
        Opcode::Add | Opcode::Addi => vj + vk,
        Opcode::Sub => vj - vk,
        Opcode::Mul => vj * vk,
        Opcode::Div => {
            if vk == 0 {
                0
            } else {
                floor_div(vj, vk)
            }
        },
        Opcode::Lw | Opcode::Ld => 99,
        // The store value (vj) is broadcast, not vk, even though vk
        // holds the base register used only for addressing.
        Opcode::Sw | Opcode::Sd => vj,
        Opcode::Beq => {
            if vj == vk {
                1
            } else {
                0
            }
        },
        Opcode::Bne => {
            if vj != vk {
                1
            } else {
                0
            }
        },
    }
}

/// Integer division rounding toward negative infinity (matches the
/// source's `//` operator), not Rust's default truncating division.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}
