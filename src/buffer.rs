//! Append-only `f32` buffer used to collect one value per temporal period.

use crate::constants::DEFAULT_BUFFER_CAPACITY;

/// A growable sequence of `f32` values with amortized O(1) append.
///
/// The buffer only ever grows during a bin cycle; its contents are read back
/// as one contiguous slice at completion time.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowableBuffer {
    elements: Vec<f32>,
}

impl GrowableBuffer {
    /// Buffer with the default capacity hint.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Create an empty buffer with room for `capacity` elements before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        GrowableBuffer {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f32) {
        self.elements.push(value);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Contiguous view over the values appended so far, in insertion order.
    pub fn as_slice(&self) -> &[f32] {
        &self.elements
    }

    /// Owned copy of the appended values, trimmed to the current length.
    pub fn to_vec(&self) -> Vec<f32> {
        self.elements.clone()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<f32>> for GrowableBuffer {
    fn from(elements: Vec<f32>) -> Self {
        GrowableBuffer { elements }
    }
}
