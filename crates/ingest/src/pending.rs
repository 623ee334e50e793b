use std::collections::VecDeque;

/// Arrival-ordered holding area for payloads registered before the sink exists.
pub struct PendingBuffer<P> {
    held: VecDeque<P>,
}

impl<P> Default for PendingBuffer<P> {
    fn default() -> Self {
        Self {
            held: VecDeque::new(),
        }
    }
}

impl<P> PendingBuffer<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `payload` and returns its arrival slot.
    pub fn hold(&mut self, payload: P) -> usize {
        self.held.push_back(payload);
        self.held.len() - 1
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Yields held payloads oldest first, leaving the buffer empty.
    pub fn drain(&mut self) -> impl Iterator<Item = P> + '_ {
        self.held.drain(..)
    }
}
