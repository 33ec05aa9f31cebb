// log.rs
//
// The core never emits raw strings (Design Note 9, "Observable log").
// It appends typed `LogEvent`s to an append-only sequence each cycle; a
// separate rendering step turns one into the text line the presenter
// shows (spec §6's "append-only log").

use std::fmt;

#[derive(Debug, Clone)]
pub enum LogEvent {
    Issue { cycle: u64, instr_id: u32, raw_text: String, rs_name: String },
    Write { cycle: u64, rob_id: u32, value: i64, op: String },
    Commit { cycle: u64, instr_id: u32, raw_text: String },
    BranchNotTaken { cycle: u64, instr_id: u32 },
    FlushMispredict { cycle: u64, instr_id: u32, target_pc: usize },
    BubbleRob { cycle: u64 },
    BubbleRs { cycle: u64, class: String },
}

impl LogEvent {
    pub fn cycle(&self) -> u64 {
        match self {
            LogEvent::Issue { cycle, .. }
            | LogEvent::Write { cycle, .. }
            | LogEvent::Commit { cycle, .. }
            | LogEvent::BranchNotTaken { cycle, .. }
            | LogEvent::FlushMispredict { cycle, .. }
            | LogEvent::BubbleRob { cycle }
            | LogEvent::BubbleRs { cycle, .. } => *cycle,
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Issue { cycle, instr_id, raw_text, rs_name } => {
                write!(f, "cycle {}: issue #{} `{}` -> {}", cycle, instr_id, raw_text, rs_name)
            },
            LogEvent::Write { cycle, rob_id, value, op } => {
                write!(f, "cycle {}: write {} val={} (ROB#{})", cycle, op, value, rob_id)
            },
            LogEvent::Commit { cycle, instr_id, raw_text } => {
                write!(f, "cycle {}: commit #{} `{}`", cycle, instr_id, raw_text)
            },
            LogEvent::BranchNotTaken { cycle, instr_id } => {
                write!(f, "cycle {}: branch #{} not taken, correct", cycle, instr_id)
            },
            LogEvent::FlushMispredict { cycle, instr_id, target_pc } => {
                write!(f, "cycle {}: branch #{} mispredicted, flush, pc -> {}", cycle, instr_id, target_pc)
            },
            LogEvent::BubbleRob { cycle } => write!(f, "cycle {}: ROB full, bubble", cycle),
            LogEvent::BubbleRs { cycle, class } => write!(f, "cycle {}: RS {} full, bubble", cycle, class),
        }
    }
}
