//! # Spatial pass
//!
//! Reduces the raw observations that fall into one bin during one reporting
//! period to a single [`SpatialCandidate`].
//!
//! Each bin is expected to receive at most one contributing observation per
//! period. When that assumption is violated, the last valid observation in
//! arrival order wins; no averaging or ranking happens here.
//!
//! An observation is accepted when
//! - no quality mask is configured, or the mask value is exactly `1.0`, and
//! - the measured value is not NaN.

use crate::observation::Observation;

/// The (value, time) pair a bin contributes for one period.
///
/// Both fields are NaN when no observation was accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialCandidate {
    pub value: f32,
    pub time: f32,
}

impl SpatialCandidate {
    pub fn new(value: f32, time: f32) -> Self {
        SpatialCandidate { value, time }
    }

    /// The "no data" candidate.
    pub fn empty() -> Self {
        SpatialCandidate {
            value: f32::NAN,
            time: f32::NAN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_nan()
    }

    /// Feature vector layout: `[value, value_mjd]`.
    pub fn to_features(&self) -> [f32; 2] {
        [self.value, self.time]
    }
}

impl Default for SpatialCandidate {
    fn default() -> Self {
        Self::empty()
    }
}

/// Keeps the last valid observation of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialReducer {
    var_index: usize,
    mask_index: Option<usize>,
}

impl SpatialReducer {
    /// Arguments
    /// ---------
    /// * `var_index`: index of the measured variable in an [`Observation`]
    /// * `mask_index`: index of the quality mask, `None` when no masking applies
    pub fn new(var_index: usize, mask_index: Option<usize>) -> Self {
        SpatialReducer {
            var_index,
            mask_index,
        }
    }

    pub fn var_index(&self) -> usize {
        self.var_index
    }

    pub fn mask_index(&self) -> Option<usize> {
        self.mask_index
    }

    pub fn init(&self) -> SpatialCandidate {
        SpatialCandidate::empty()
    }

    /// Overwrite `candidate` with `observation` if the observation is valid.
    pub fn aggregate(&self, candidate: &mut SpatialCandidate, observation: &Observation) {
        let value = observation.get(self.var_index);
        let unmasked = match self.mask_index {
            None => true,
            Some(mask_index) => observation.get(mask_index) == 1.0,
        };
        if unmasked && !value.is_nan() {
            candidate.value = value;
            candidate.time = observation.mjd as f32;
        }
    }

    /// Nothing left to reduce at the end of the spatial pass.
    pub fn complete(&self, _candidate: &mut SpatialCandidate, _num_spatial_obs: usize) {}

    /// Run a whole spatial pass over `observations`.
    pub fn reduce<'a, I>(&self, observations: I) -> SpatialCandidate
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut candidate = self.init();
        let mut num_obs = 0;
        for observation in observations {
            self.aggregate(&mut candidate, observation);
            num_obs += 1;
        }
        self.complete(&mut candidate, num_obs);
        candidate
    }
}

#[cfg(test)]
mod spatial_test {
    use super::*;

    #[test]
    fn test_init_is_empty() {
        let reducer = SpatialReducer::new(0, None);
        let candidate = reducer.init();
        assert!(candidate.is_empty());
        assert!(candidate.value.is_nan());
        assert!(candidate.time.is_nan());
    }

    #[test]
    fn test_accepts_valid_observation() {
        let reducer = SpatialReducer::new(0, Some(1));
        let mut candidate = reducer.init();
        reducer.aggregate(&mut candidate, &Observation::new(56430.0, [1.5, 1.0]));
        assert_eq!(candidate, SpatialCandidate::new(1.5, 56430.0));

        reducer.complete(&mut candidate, 1);
        assert_eq!(candidate, SpatialCandidate::new(1.5, 56430.0));
    }

    #[test]
    fn test_masked_observation_is_rejected() {
        let reducer = SpatialReducer::new(0, Some(1));
        let candidate = reducer.reduce(&[
            Observation::new(56430.0, [1.5, 0.0]),
            Observation::new(56431.0, [2.5, 0.5]),
        ]);
        assert!(candidate.is_empty());
        assert!(candidate.time.is_nan());
    }

    #[test]
    fn test_nan_value_is_rejected() {
        let reducer = SpatialReducer::new(0, None);
        let candidate = reducer.reduce(&[Observation::new(56430.0, [f32::NAN])]);
        assert!(candidate.is_empty());
    }

    #[test]
    fn test_no_mask_accepts_any_flag() {
        let reducer = SpatialReducer::new(0, None);
        let candidate = reducer.reduce(&[Observation::new(56430.0, [0.8, 0.0])]);
        assert_eq!(candidate.value, 0.8);
    }

    #[test]
    fn test_last_valid_observation_wins() {
        let reducer = SpatialReducer::new(0, Some(1));
        let candidate = reducer.reduce(&[
            Observation::new(56430.0, [0.2, 1.0]),
            Observation::new(56431.0, [0.9, 1.0]),
            Observation::new(56432.0, [0.4, 0.0]),
            Observation::new(56433.0, [f32::NAN, 1.0]),
        ]);
        assert_eq!(candidate, SpatialCandidate::new(0.9, 56431.0));
    }

    #[test]
    fn test_to_features() {
        assert_eq!(SpatialCandidate::new(0.3, 12.0).to_features(), [0.3, 12.0]);
    }
}
