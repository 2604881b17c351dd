//! Append-only accumulation of decoded text.

/// The full reply text received so far.
///
/// Only [`Accumulator::push`] mutates it, so its length never decreases and
/// chunks appear in arrival order.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    text: String,
    chunks: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk and return the accumulated text.
    pub fn push(&mut self, chunk: &str) -> &str {
        self.text.push_str(chunk);
        self.chunks += 1;
        &self.text
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of chunks appended.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
