// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// config.rs
//
// Process-wide configuration for the Tomasulo core: reservation-station
// pool sizes, reorder buffer capacity, register count, and per-opcode
// execute latencies. Built once via a builder and treated as immutable
// for the lifetime of a `TomasuloCore`.

use crate::errors::CoreError;
use crate::tomasulo::instruction::Opcode;
use std::collections::HashMap;

/// Number of ADD-class, MUL-class, and LOAD-class reservation stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsCounts {
    pub add: usize,
    pub mul: usize,
    pub load: usize,
}

impl RsCounts {
    pub fn total(&self) -> usize {
        self.add + self.mul + self.load
    }
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub rob_capacity: usize,
    pub rs_counts: RsCounts,
    pub num_registers: usize,
    pub latencies: HashMap<Opcode, usize>,
}

impl SimulatorConfig {
    /// Start from the spec's fixed defaults: ROB of 8, 3 ADD + 2 MUL + 3
    /// LOAD reservation stations, 32 integer registers.
    pub fn new() -> Self {
        Self {
            rob_capacity: 8,
            rs_counts: RsCounts { add: 3, mul: 2, load: 3 },
            num_registers: 32,
            latencies: default_latencies(),
        }
    }

    pub fn with_rob_capacity(mut self, capacity: usize) -> Self {
        self.rob_capacity = capacity;
        self
    }

    pub fn with_rs_counts(mut self, counts: RsCounts) -> Self {
        self.rs_counts = counts;
        self
    }

    pub fn with_num_registers(mut self, count: usize) -> Self {
        self.num_registers = count;
        self
    }

    pub fn with_latency(mut self, opcode: Opcode, cycles: usize) -> Self {
        self.latencies.insert(opcode, cycles);
        self
    }

    pub fn latency_of(&self, opcode: Opcode) -> usize {
        *self.latencies.get(&opcode).unwrap_or(&1)
    }

    /// Reject configurations the core cannot run: a zero-capacity ROB
    /// deadlocks Issue forever, and an empty reservation-station class
    /// does the same for any opcode routed to it.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.rob_capacity == 0 {
            return Err(CoreError::InvalidConfig("rob_capacity must be non-zero".into()));
        }
        if self.rs_counts.add == 0 || self.rs_counts.mul == 0 || self.rs_counts.load == 0 {
            return Err(CoreError::InvalidConfig(
                "every reservation-station class needs at least one slot".into(),
            ));
        }
        if self.num_registers == 0 {
            return Err(CoreError::InvalidConfig("num_registers must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_latencies() -> HashMap<Opcode, usize> {
    use Opcode::*;
    let mut m = HashMap::new();
    m.insert(Add, 2);
    m.insert(Sub, 2);
    m.insert(Addi, 2);
    m.insert(Mul, 6);
    m.insert(Div, 10);
    m.insert(Lw, 3);
    m.insert(Sw, 3);
    m.insert(Ld, 3);
    m.insert(Sd, 3);
    m.insert(Beq, 1);
    m.insert(Bne, 1);
    m
}
