// registers.rs
//
// The architectural register file: `R0`..`R{num_registers-1}`, all
// initially zero. `R0` is not special here, writes to it are permitted,
// matching the source this core is modeled on (spec §3).

#[derive(Debug, Clone)]
pub struct RegisterFile {
    data: Vec<i64>,
}

impl RegisterFile {
    pub fn new(num_registers: usize) -> Self {
        Self { data: vec![0; num_registers] }
    }

    pub fn read(&self, reg_index: usize) -> i64 {
        self.data.get(reg_index).copied().unwrap_or(0)
    }

    pub fn write(&mut self, reg_index: usize, value: i64) {
        if let Some(slot) = self.data.get_mut(reg_index) {
            *slot = value;
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entries that differ from their reset value of zero, for the
    /// presenter (§6 "register file (changed entries)").
    pub fn changed(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.data.iter().enumerate().filter_map(|(i, &v)| if v != 0 { Some((i, v)) } else { None })
    }
}

/// Parse `"R<n>"` into a 0-based register index, matching spec §2's
/// `R0`..`R31` naming. Returns `None` for anything else (an immediate
/// literal, a malformed token, or a register out of the configured range).
pub fn register_index(name: &str, num_registers: usize) -> Option<usize> {
    let digits = name.strip_prefix('R').or_else(|| name.strip_prefix('r'))?;
    let idx: usize = digits.parse().ok()?;
    if idx < num_registers {
        Some(idx)
    } else {
        None
    }
}

pub fn register_name(index: usize) -> String {
    format!("R{}", index)
}
