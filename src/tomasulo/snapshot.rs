// snapshot.rs
//
// A one-call view of the full microarchitectural state (§6 "Core ->
// presenter interface", §11 "Snapshot/debug rendering"). The teacher's
// `dump_state`/`dump_registers` built a single formatted string per call;
// this crate keeps the same idea but returns structured data so a
// presenter (the CLI here, a GUI elsewhere) can render it however it likes.

use serde::Serialize;

use super::instruction::Stage;
use super::metrics::Metrics;
use super::reservation_station::RsClass;

#[derive(Debug, Clone, Serialize)]
pub struct InstructionView {
    pub id: u32,
    pub raw_text: String,
    pub stage: String,
    pub is_next_to_issue: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationStationView {
    pub name: String,
    pub class: String,
    pub busy: bool,
    pub op: Option<String>,
    pub vj: Option<i64>,
    pub vk: Option<i64>,
    pub qj: Option<u32>,
    pub qk: Option<u32>,
    pub dest: Option<u32>,
    pub time_left: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RobEntryView {
    pub rob_id: u32,
    pub raw_text: String,
    pub dest_reg: Option<String>,
    pub value: Option<i64>,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatBindingView {
    pub register: String,
    pub rob_id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterView {
    pub register: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub clock: u64,
    pub retired: u64,
    pub stalls_rob: u64,
    pub stalls_rs: u64,
    pub branch_miss: u64,
    pub ipc: f64,
    pub instructions: Vec<InstructionView>,
    pub reservation_stations: Vec<ReservationStationView>,
    pub reorder_buffer: Vec<RobEntryView>,
    pub rat: Vec<RatBindingView>,
    pub registers: Vec<RegisterView>,
}

pub(super) fn stage_label(stage: Stage) -> String {
    stage.to_string()
}

pub(super) fn class_label(class: RsClass) -> String {
    class.to_string()
}

pub(super) fn metrics_view(metrics: Metrics) -> (u64, u64, u64, u64, u64, f64) {
    (metrics.clock, metrics.retired, metrics.stalls_rob, metrics.stalls_rs, metrics.branch_miss, metrics.ipc())
}
