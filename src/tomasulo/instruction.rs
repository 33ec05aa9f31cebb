// instruction.rs
//
// The decoded instruction representation. Immutable after parsing except
// for the `stage` marker the presenter reads back after every `step()`.

use std::fmt;

/// Closed opcode set the parser and pipeline understand (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    Addi,
    Mul,
    Div,
    Lw,
    Sw,
    Ld,
    Sd,
    Beq,
    Bne,
}

impl Opcode {
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        use Opcode::*;
        Some(match s.to_ascii_uppercase().as_str() {
            "ADD" => Add,
            "SUB" => Sub,
            "ADDI" => Addi,
            "MUL" => Mul,
            "DIV" => Div,
            "LW" => Lw,
            "SW" => Sw,
            "LD" => Ld,
            "SD" => Sd,
            "BEQ" => Beq,
            "BNE" => Bne,
            _ => return None,
        })
    }

    /// Whether this opcode takes the `OP dest, imm(base)` memory form.
    pub fn is_memory_form(&self) -> bool {
        matches!(self, Opcode::Lw | Opcode::Sw | Opcode::Ld | Opcode::Sd)
    }

    pub fn is_load(&self) -> bool {
        matches!(self, Opcode::Lw | Opcode::Ld)
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Opcode::Sw | Opcode::Sd)
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Opcode::Beq | Opcode::Bne)
    }

    /// True for instructions that never write back to a register
    /// (stores and branches; see Issue §4.5).
    pub fn writes_no_register(&self) -> bool {
        self.is_store() || self.is_branch()
    }

    pub fn rs_class(&self) -> super::reservation_station::RsClass {
        use super::reservation_station::RsClass;
        match self {
            Opcode::Add | Opcode::Sub | Opcode::Addi | Opcode::Beq | Opcode::Bne => RsClass::Add,
            Opcode::Mul | Opcode::Div => RsClass::Mul,
            Opcode::Lw | Opcode::Sw | Opcode::Ld | Opcode::Sd => RsClass::Load,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Addi => "ADDI",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Lw => "LW",
            Opcode::Sw => "SW",
            Opcode::Ld => "LD",
            Opcode::Sd => "SD",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
        };
        write!(f, "{}", s)
    }
}

/// Where an instruction currently sits in the pipeline, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Issue,
    Execute,
    WriteResult,
    Committed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Issue => "Issue",
            Stage::Execute => "Execute",
            Stage::WriteResult => "Write Result",
            Stage::Committed => "Committed",
        };
        write!(f, "{}", s)
    }
}

/// A decoded instruction. `src2` on BEQ/BNE temporarily holds the branch
/// displacement as text until Issue lifts it into `immediate` (§4.5).
#[derive(Debug, Clone)]
pub struct Instruction {
    pub id: u32,
    pub opcode: Opcode,
    pub dest: Option<String>,
    pub src1: Option<String>,
    pub src2: Option<String>,
    pub immediate: i64,
    pub pc_addr: usize,
    pub raw_text: String,
    pub stage: Stage,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_text)
    }
}
