//! # Pinty aggregator
//!
//! [`PintyAggregator`] exposes the per-bin lifecycle a spatio-temporal
//! binning framework drives for every bin and variable:
//!
//! ```text
//! spatial pass (per period)      temporal pass (per bin)            output
//! ─────────────────────────      ─────────────────────────────      ──────────────
//! init_spatial                   init_temporal
//! aggregate_spatial × obs   ──▶  aggregate_temporal × periods  ──▶  compute_output
//! complete_spatial               complete_temporal
//! ```
//!
//! The spatial pass keeps the last valid observation of a period (see
//! [`SpatialReducer`]). The temporal pass collects one candidate per period
//! into the bin's [`BinContext`] and finally selects the value closest to the
//! mean (see [`StatisticalSelector`]).
//!
//! ## Features
//!
//! For a variable `v` the aggregator publishes
//!
//! | pass     | features                                |
//! |----------|-----------------------------------------|
//! | spatial  | `v`, `v_mjd`                            |
//! | temporal | `v`, `v_mjd`, `v_count`, `v_sigma`      |
//! | output   | `v`, `v_mjd`, `v_count`, `v_sigma`      |
//!
//! ## Example
//!
//! ```rust
//! use pinty::aggregator::PintyAggregator;
//! use pinty::bin_state::BinContext;
//! use pinty::observation::Observation;
//! use pinty::variables::VariableNames;
//!
//! let vars = VariableNames::new(["fapar", "valid"]);
//! let agg = PintyAggregator::new(Some(&vars), "fapar", Some("valid")).unwrap();
//!
//! let mut ctx = BinContext::new();
//! agg.init_temporal(&mut ctx);
//! for (mjd, value) in [(56300.0, 0.31), (56314.0, 0.35), (56328.0, 0.52)] {
//!     let mut candidate = agg.init_spatial();
//!     agg.aggregate_spatial(&mut candidate, &Observation::new(mjd, [value, 1.0]));
//!     agg.complete_spatial(&mut candidate, 1);
//!     agg.aggregate_temporal(&mut ctx, &candidate, 1).unwrap();
//! }
//! let result = agg.complete_temporal(&ctx, 3).unwrap();
//! assert_eq!(result.count, 3);
//! assert_eq!(result.value, 0.35);
//! ```

use std::fmt;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::{
    bin_state::{BinContext, StateKey},
    constants::{AGGREGATOR_NAME, COUNT_SUFFIX, MJD_SUFFIX, SIGMA_SUFFIX},
    observation::Observation,
    pinty_errors::PintyError,
    selector::{AggregationResult, StatisticalSelector, VarianceMethod},
    spatial::{SpatialCandidate, SpatialReducer},
    temporal::TemporalAccumulator,
    variables::VariableContext,
};

#[derive(Debug, Clone)]
pub struct PintyAggregator {
    state_key: StateKey,
    spatial: SpatialReducer,
    temporal: TemporalAccumulator,
    selector: StatisticalSelector,
    spatial_features: Vec<String>,
    features: Vec<String>,
}

impl PintyAggregator {
    /// Registered name of the aggregator.
    pub const NAME: &'static str = AGGREGATOR_NAME;

    /// Construct a new [`PintyAggregator`].
    ///
    /// Arguments
    /// -----------------
    /// * `var_ctx`: resolves variable names to observation indices.
    /// * `var_name`: the variable to aggregate.
    /// * `mask_name`: optional quality mask; an observation is kept only where the mask equals `1.0`.
    ///
    /// Return
    /// ----------
    /// * The aggregator, or
    ///   - [`PintyError::MissingVariableContext`] if `var_ctx` is `None`,
    ///   - [`PintyError::UnknownVariable`] if `var_name` cannot be resolved.
    ///
    /// A mask name that cannot be resolved is not an error: the aggregator
    /// then runs unmasked and a warning is logged.
    pub fn new(
        var_ctx: Option<&dyn VariableContext>,
        var_name: &str,
        mask_name: Option<&str>,
    ) -> Result<Self, PintyError> {
        let var_ctx = var_ctx.ok_or(PintyError::MissingVariableContext)?;
        let var_index = var_ctx
            .variable_index(var_name)
            .ok_or_else(|| PintyError::UnknownVariable(var_name.to_string()))?;

        let mask_index = mask_name.and_then(|mask| {
            let index = var_ctx.variable_index(mask);
            if index.is_none() {
                warn!(
                    var = var_name,
                    mask, "mask variable not found, observations will not be masked"
                );
            }
            index
        });

        debug!(var = var_name, var_index, ?mask_index, "created {} aggregator", Self::NAME);

        Ok(PintyAggregator {
            state_key: StateKey::new(var_name),
            spatial: SpatialReducer::new(var_index, mask_index),
            temporal: TemporalAccumulator::default(),
            selector: StatisticalSelector::default(),
            spatial_features: spatial_feature_names(var_name),
            features: feature_names(var_name),
        })
    }

    /// Use `method` for the standard deviation computed at completion.
    pub fn with_variance_method(mut self, method: VarianceMethod) -> Self {
        self.selector = StatisticalSelector::new(method);
        self
    }

    /// Reserve `capacity` periods in the buffers created by [`init_temporal`](Self::init_temporal).
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.temporal = TemporalAccumulator::new(capacity);
        self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn var_name(&self) -> &str {
        self.state_key.var_name()
    }

    pub fn var_index(&self) -> usize {
        self.spatial.var_index()
    }

    pub fn mask_index(&self) -> Option<usize> {
        self.spatial.mask_index()
    }

    pub fn variance_method(&self) -> VarianceMethod {
        self.selector.variance_method()
    }

    pub fn initial_capacity(&self) -> usize {
        self.temporal.initial_capacity()
    }

    pub fn spatial_feature_names(&self) -> &[String] {
        &self.spatial_features
    }

    pub fn temporal_feature_names(&self) -> &[String] {
        &self.features
    }

    pub fn output_feature_names(&self) -> &[String] {
        &self.features
    }

    pub fn init_spatial(&self) -> SpatialCandidate {
        self.spatial.init()
    }

    pub fn aggregate_spatial(&self, candidate: &mut SpatialCandidate, observation: &Observation) {
        self.spatial.aggregate(candidate, observation);
    }

    pub fn complete_spatial(&self, candidate: &mut SpatialCandidate, num_spatial_obs: usize) {
        self.spatial.complete(candidate, num_spatial_obs);
    }

    /// Create this variable's buffers in `ctx`, discarding any previous ones.
    pub fn init_temporal(&self, ctx: &mut BinContext) {
        ctx.insert(self.state_key.clone(), self.temporal.init());
    }

    /// Add one period's spatial candidate to the bin.
    ///
    /// Fails only if [`init_temporal`](Self::init_temporal) was not called on `ctx`.
    pub fn aggregate_temporal(
        &self,
        ctx: &mut BinContext,
        spatial: &SpatialCandidate,
        _num_spatial_obs: usize,
    ) -> Result<(), PintyError> {
        let state = ctx
            .get_mut(&self.state_key)
            .ok_or_else(|| PintyError::BinStateNotInitialized(self.var_name().to_string()))?;
        self.temporal.accumulate(state, spatial);
        Ok(())
    }

    /// Select the representative value of the bin.
    ///
    /// Fails only if [`init_temporal`](Self::init_temporal) was not called on `ctx`.
    pub fn complete_temporal(
        &self,
        ctx: &BinContext,
        _num_temporal_obs: usize,
    ) -> Result<AggregationResult, PintyError> {
        let state = ctx
            .get(&self.state_key)
            .ok_or_else(|| PintyError::BinStateNotInitialized(self.var_name().to_string()))?;
        Ok(self.selector.complete(state))
    }

    /// Output vector in [`output_feature_names`](Self::output_feature_names) order.
    pub fn compute_output(&self, temporal: &AggregationResult) -> [f32; 4] {
        temporal.to_output()
    }
}

impl fmt::Display for PintyAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask_index = self.mask_index().map_or(-1, |i| i as i64);
        write!(
            f,
            "{}{{varIndex={}, maskIndex={}, spatialFeatureNames=[{}], temporalFeatureNames=[{}], outputFeatureNames=[{}]}}",
            Self::NAME,
            self.var_index(),
            mask_index,
            self.spatial_features.iter().join(", "),
            self.features.iter().join(", "),
            self.features.iter().join(", "),
        )
    }
}

fn spatial_feature_names(var_name: &str) -> Vec<String> {
    vec![var_name.to_string(), format!("{var_name}{MJD_SUFFIX}")]
}

fn feature_names(var_name: &str) -> Vec<String> {
    vec![
        var_name.to_string(),
        format!("{var_name}{MJD_SUFFIX}"),
        format!("{var_name}{COUNT_SUFFIX}"),
        format!("{var_name}{SIGMA_SUFFIX}"),
    ]
}
