//! src/orchestrator/handles.rs
//! Owned set of spawned-unit handles
//!
//! Handles are released by dropping them. `release()` drains the set, so a
//! second call, or the final `Drop`, releases nothing twice.

/// Ordered handles, each tagged with the index of the outcome it resolves.
#[derive(Debug)]
pub struct HandleSet<H> {
    indices: Vec<usize>,
    handles: Vec<H>,
}

impl<H> HandleSet<H> {
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            handles: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome_index: usize, handle: H) {
        self.indices.push(outcome_index);
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Consecutive batches of at most `size` handles with their outcome indices.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. Configured batch sizes are validated ≥ 1.
    pub fn batches_mut(&mut self, size: usize) -> impl Iterator<Item = (&[usize], &mut [H])> {
        self.indices.chunks(size).zip(self.handles.chunks_mut(size))
    }

    /// Drop every handle and return how many were released.
    pub fn release(&mut self) -> usize {
        let released = self.handles.len();
        self.indices.clear();
        self.handles.clear();
        released
    }
}

impl<H> Default for HandleSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Drop for HandleSet<H> {
    fn drop(&mut self) {
        self.release();
    }
}
