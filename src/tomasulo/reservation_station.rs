// reservation_station.rs
//
// Reservation stations: three pools by functional-unit class. Holds
// either a resolved operand value or the producing ROB tag, never both
// (spec §3 invariant 2).

use super::instruction::Opcode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsClass {
    Add,
    Mul,
    Load,
}

impl fmt::Display for RsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RsClass::Add => "ADD",
            RsClass::Mul => "MUL",
            RsClass::Load => "LOAD",
        };
        write!(f, "{}", s)
    }
}

/// One operand slot: either a resolved value, or a tag naming the ROB
/// entry that will produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Value(i64),
    Pending(u32),
}

impl Operand {
    pub fn value(&self) -> Option<i64> {
        match self {
            Operand::Value(v) => Some(*v),
            Operand::Pending(_) => None,
        }
    }

    pub fn tag(&self) -> Option<u32> {
        match self {
            Operand::Value(_) => None,
            Operand::Pending(rob_id) => Some(*rob_id),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Operand::Value(_))
    }
}

#[derive(Debug, Clone)]
pub struct ReservationStation {
    pub name: String,
    pub class: RsClass,
    pub busy: bool,
    pub op: Option<Opcode>,
    pub vj: Option<Operand>,
    pub vk: Option<Operand>,
    pub dest: Option<u32>,
    pub time_left: usize,
}

impl ReservationStation {
    pub fn new(name: impl Into<String>, class: RsClass) -> Self {
        Self {
            name: name.into(),
            class,
            busy: false,
            op: None,
            vj: None,
            vk: None,
            dest: None,
            time_left: 0,
        }
    }

    /// Invariant 2 of §8: a non-busy slot keeps all other fields neutral.
    pub fn clear(&mut self) {
        self.busy = false;
        self.op = None;
        self.vj = None;
        self.vk = None;
        self.dest = None;
        self.time_left = 0;
    }

    pub fn issue(&mut self, op: Opcode, vj: Operand, vk: Operand, dest: u32, time_left: usize) {
        self.busy = true;
        self.op = Some(op);
        self.vj = Some(vj);
        self.vk = Some(vk);
        self.dest = Some(dest);
        self.time_left = time_left;
    }

    /// Resolved iff neither operand is still waiting on a producer.
    pub fn operands_ready(&self) -> bool {
        self.vj.map(|o| o.is_ready()).unwrap_or(false) && self.vk.map(|o| o.is_ready()).unwrap_or(false)
    }

    /// Forward a broadcast result into this station's operand slots if it
    /// is waiting on `producer` (§4.2 "Forwarding").
    pub fn forward(&mut self, producer: u32, value: i64) {
        if !self.busy {
            return;
        }
        if self.vj == Some(Operand::Pending(producer)) {
            self.vj = Some(Operand::Value(value));
        }
        if self.vk == Some(Operand::Pending(producer)) {
            self.vk = Some(Operand::Value(value));
        }
    }
}
