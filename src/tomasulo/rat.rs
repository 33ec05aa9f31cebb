// rat.rs
//
// Register Alias Table: per-architectural-register pointer to the ROB
// entry that will produce its next value. An empty entry means the
// register file is authoritative (spec §3, §4.2).

#[derive(Debug, Clone)]
pub struct RegisterAliasTable {
    mapping: Vec<Option<u32>>,
}

impl RegisterAliasTable {
    pub fn new(num_registers: usize) -> Self {
        Self { mapping: vec![None; num_registers] }
    }

    pub fn get(&self, reg_index: usize) -> Option<u32> {
        self.mapping.get(reg_index).copied().flatten()
    }

    /// Unconditionally shadows any previous mapping (§4.5 Issue).
    pub fn set(&mut self, reg_index: usize, rob_id: u32) {
        if let Some(slot) = self.mapping.get_mut(reg_index) {
            *slot = Some(rob_id);
        }
    }

    /// Clear only if this entry still points at `rob_id`, a later
    /// rename of the same register must not be clobbered (§4.7 Commit).
    pub fn clear_if(&mut self, reg_index: usize, rob_id: u32) {
        if let Some(slot) = self.mapping.get_mut(reg_index) {
            if *slot == Some(rob_id) {
                *slot = None;
            }
        }
    }

    pub fn clear_all(&mut self) {
        for slot in self.mapping.iter_mut() {
            *slot = None;
        }
    }

    /// Non-empty bindings, for the presenter (§6).
    pub fn bindings(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|rob_id| (i, rob_id)))
    }
}
