/// Fixed capacity ring of the most recent tokens
///
/// Slots start out as the empty string, which never equals a real token.
/// `item(0)` is the oldest retained token, `item(capacity - 1)` the newest.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    slots: Vec<String>,
    index: usize,
    previous: usize,
}

impl ContextWindow {
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be greater than 0");
        Self {
            slots: vec![String::new(); capacity],
            index: 0,
            previous: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrite the slot at the write position and advance it
    pub fn push(&mut self, token: String) {
        self.slots[self.index] = token;
        self.previous = self.index;
        self.index = (self.index + 1) % self.slots.len();
    }

    /// Token at `offset` from the oldest slot
    #[inline]
    pub fn item(&self, offset: usize) -> &str {
        &self.slots[(self.index + offset) % self.slots.len()]
    }

    /// The most recently pushed token, empty before any push
    #[inline]
    pub fn previous(&self) -> &str {
        &self.slots[self.previous]
    }

    #[inline]
    pub fn center(&self) -> &str {
        self.item(self.slots.len() / 2)
    }
}
