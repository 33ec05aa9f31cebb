// rob.rs
//
// Fixed-capacity circular Reorder Buffer. Enforces in-order commit of
// out-of-order results (spec §3, §4.7).

#[derive(Debug, Clone)]
pub struct RobEntry {
    pub rob_id: u32,
    /// Index into the core's instruction queue (stable across the
    /// entry's lifetime; see §4 Design Note on flat arrays indexed by ID).
    pub instr_index: usize,
    pub dest_reg: Option<String>,
    pub value: Option<i64>,
    pub ready: bool,
}

#[derive(Debug, Clone)]
pub struct ReorderBuffer {
    capacity: usize,
    slots: Vec<Option<RobEntry>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl ReorderBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: vec![None; capacity],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn head_index(&self) -> usize {
        self.head
    }

    /// The 1-based ROB id the next allocation would receive: `tail + 1`.
    /// Not monotonic across flushes, values cycle through `1..=capacity`.
    pub fn next_id(&self) -> u32 {
        (self.tail + 1) as u32
    }

    /// Allocate the entry at `tail`, advance `tail`, and grow `count`.
    /// Caller must have already checked `!is_full()`.
    pub fn allocate(&mut self, instr_index: usize, dest_reg: Option<String>) -> u32 {
        let rob_id = self.next_id();
        self.slots[self.tail] = Some(RobEntry {
            rob_id,
            instr_index,
            dest_reg,
            value: None,
            ready: false,
        });
        self.tail = (self.tail + 1) % self.capacity;
        self.count += 1;
        rob_id
    }

    pub fn entry_mut(&mut self, rob_id: u32) -> Option<&mut RobEntry> {
        self.slots.iter_mut().flatten().find(|e| e.rob_id == rob_id)
    }

    pub fn entry(&self, rob_id: u32) -> Option<&RobEntry> {
        self.slots.iter().flatten().find(|e| e.rob_id == rob_id)
    }

    pub fn head(&self) -> Option<&RobEntry> {
        self.slots[self.head].as_ref()
    }

    /// Free the head slot, advance `head`, and shrink `count`. Caller
    /// must have already checked the head is occupied and ready.
    pub fn retire_head(&mut self) -> RobEntry {
        let entry = self.slots[self.head].take().expect("retire_head on empty ROB");
        self.head = (self.head + 1) % self.capacity;
        self.count -= 1;
        entry
    }

    /// Atomic discard on branch misprediction (§4.7 step 3).
    pub fn flush(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Iterate occupied entries in commit order, starting at `head` for
    /// `count` entries (§6 "live ROB window in commit order").
    pub fn iter_in_order(&self) -> impl Iterator<Item = &RobEntry> {
        let mut idx = self.head;
        let count = self.count;
        let capacity = self.capacity.max(1);
        (0..count).map(move |_| {
            let entry = self.slots[idx].as_ref().expect("ROB window entry missing");
            idx = (idx + 1) % capacity;
            entry
        })
    }
}
