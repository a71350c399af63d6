//! # Per-bin temporal state
//!
//! A [`BinState`] holds the two parallel buffers filled during the temporal
//! pass of one spatial bin for one variable: the accepted measurements and
//! their observation times. The pairing invariant
//! (`measurements.len() == times.len()`) is enforced by construction, since
//! the only mutator appends to both buffers at once.
//!
//! A [`BinContext`] is the per-bin store shared by every aggregator working on
//! the same bin. States are keyed by a typed [`StateKey`] derived from the
//! variable name, so two variables aggregated into the same bin can never
//! overwrite each other's buffers.
//!
//! ## Lifecycle
//!
//! ```text
//! init_temporal      → BinContext::insert(key, BinState::with_capacity(..))
//! aggregate_temporal → BinContext::get_mut(key)?.push_pair(value, time)
//! complete_temporal  → BinContext::get(key)  (read-only)
//! output emitted     → BinContext::clear()
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::buffer::GrowableBuffer;

/// Key identifying the state of one variable inside a [`BinContext`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(var_name: &str) -> Self {
        StateKey(var_name.to_string())
    }

    pub fn var_name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateKey {
    fn from(var_name: &str) -> Self {
        StateKey::new(var_name)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Measurements and times accumulated for one (bin, variable) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BinState {
    measurements: GrowableBuffer,
    times: GrowableBuffer,
}

impl BinState {
    /// Create an empty state whose buffers reserve `capacity` entries each.
    pub fn with_capacity(capacity: usize) -> Self {
        BinState {
            measurements: GrowableBuffer::with_capacity(capacity),
            times: GrowableBuffer::with_capacity(capacity),
        }
    }

    /// Append one (value, time) pair.
    pub fn push_pair(&mut self, value: f32, time: f32) {
        self.measurements.push(value);
        self.times.push(time);
    }

    pub fn measurements(&self) -> &[f32] {
        self.measurements.as_slice()
    }

    pub fn times(&self) -> &[f32] {
        self.times.as_slice()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

impl Default for BinState {
    fn default() -> Self {
        BinState {
            measurements: GrowableBuffer::new(),
            times: GrowableBuffer::new(),
        }
    }
}

/// Store hosting the [`BinState`] of every variable aggregated into one bin.
#[derive(Debug, Clone, Default)]
pub struct BinContext {
    states: HashMap<StateKey, BinState>,
}

impl BinContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `state` under `key`, replacing and returning any previous state.
    pub fn insert(&mut self, key: StateKey, state: BinState) -> Option<BinState> {
        self.states.insert(key, state)
    }

    pub fn get(&self, key: &StateKey) -> Option<&BinState> {
        self.states.get(key)
    }

    pub fn get_mut(&mut self, key: &StateKey) -> Option<&mut BinState> {
        self.states.get_mut(key)
    }

    pub fn remove(&mut self, key: &StateKey) -> Option<BinState> {
        self.states.remove(key)
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.states.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every state, ready for the next bin.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}
