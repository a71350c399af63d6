use tracing::trace;

use crate::{bin_state::BinState, constants::DEFAULT_BUFFER_CAPACITY, spatial::SpatialCandidate};

/// Collects one spatial candidate per period into a [`BinState`].
///
/// Periods must be supplied in temporal order by the caller; nothing is sorted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalAccumulator {
    initial_capacity: usize,
}

impl TemporalAccumulator {
    pub fn new(initial_capacity: usize) -> Self {
        TemporalAccumulator { initial_capacity }
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Fresh, empty state for one (bin, variable) pair.
    pub fn init(&self) -> BinState {
        BinState::with_capacity(self.initial_capacity)
    }

    /// Append `candidate` to `state` unless it carries no data.
    ///
    /// The spatial pass cannot suppress its NaN markers, so this is where
    /// periods without a valid observation are filtered out.
    pub fn accumulate(&self, state: &mut BinState, candidate: &SpatialCandidate) {
        if candidate.value.is_nan() {
            trace!(period_time = candidate.time, "dropping empty period");
            return;
        }
        state.push_pair(candidate.value, candidate.time);
    }
}

impl Default for TemporalAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
