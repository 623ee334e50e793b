/// What happened to a payload handed to `register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Passed straight to the sink.
    Forwarded,
    /// Held until the sink is attached; `position` is the zero-based arrival slot.
    Buffered { position: usize },
}

impl Delivery {
    pub fn is_buffered(&self) -> bool {
        matches!(self, Delivery::Buffered { .. })
    }
}

/// Outcome of replaying the pending buffer into a freshly attached sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub delivered: usize,
    pub failed: usize,
}

impl DrainReport {
    pub fn total(&self) -> usize {
        self.delivered + self.failed
    }
}
