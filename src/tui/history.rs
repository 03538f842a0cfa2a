//! Fixed-capacity input history with independent write and recall cursors.

/// Default number of remembered input lines.
pub const HISTORY_CAPACITY: usize = 100;

/// Circular buffer of submitted lines.
///
/// `put` always names the next slot to overwrite. `get` is the recall cursor:
/// it jumps to the newest entry on every submit and then walks backwards and
/// forwards through non-empty slots. An empty string marks an unused slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRing {
    slots: Vec<String>,
    put: usize,
    get: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryRing {
    /// Build an empty ring. Capacity is floored at one slot.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![String::new(); capacity],
            put: 0,
            // One before slot 0, so the first recall after a submit lands on it.
            get: capacity - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn put_index(&self) -> usize {
        self.put
    }

    pub fn get_index(&self) -> usize {
        self.get
    }

    /// Record a submitted line, overwriting the oldest slot once full.
    pub fn put(&mut self, line: &str) {
        self.slots[self.put] = line.to_string();
        self.get = self.put;
        self.put = self.step_forward(self.put);
    }

    /// Recall the entry under the read cursor and step back.
    ///
    /// At an empty slot this falls through to [`Self::recall_next`], which
    /// produces the ping-pong at the oldest entry: repeated calls keep
    /// returning that entry.
    pub fn recall_previous(&mut self) -> String {
        let entry = &self.slots[self.get];
        if entry.is_empty() {
            return self.recall_next();
        }
        let entry = entry.clone();
        self.get = self.step_back(self.get);
        entry
    }

    /// Step forward and recall, or stay put and return an empty line.
    pub fn recall_next(&mut self) -> String {
        self.get = self.step_forward(self.get);
        let entry = &self.slots[self.get];
        if entry.is_empty() {
            self.get = self.step_back(self.get);
            return String::new();
        }
        entry.clone()
    }

    fn step_forward(&self, idx: usize) -> usize {
        (idx + 1) % self.slots.len()
    }

    fn step_back(&self, idx: usize) -> usize {
        (idx + self.slots.len() - 1) % self.slots.len()
    }
}
