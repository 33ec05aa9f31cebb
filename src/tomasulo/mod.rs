// mod.rs
//
// The Tomasulo out-of-order core: instruction representation,
// reservation stations, reorder buffer, register alias table,
// architectural register file, the typed event log, metrics, and the
// pipeline controller that ties them together.

pub mod engine;
pub mod instruction;
pub mod log;
pub mod metrics;
pub mod rat;
pub mod registers;
pub mod reservation_station;
pub mod rob;
pub mod snapshot;

pub use engine::TomasuloCore;
