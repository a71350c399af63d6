//! # Constants and type definitions for Pinty
//!
//! Numeric tolerances, buffer defaults and the naming conventions used for
//! the features an aggregator publishes.

// -------------------------------------------------------------------------------------------------
// Numeric constants
// -------------------------------------------------------------------------------------------------

/// Tolerance used when comparing distances to the mean during selection
pub const EPS: f32 = 1e-6;

/// Initial capacity of the per-bin buffers, sized for a yearly series of biweekly composites
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Modified Julian Date
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Feature naming
// -------------------------------------------------------------------------------------------------

/// Name under which the aggregator is registered in a binning framework
pub const AGGREGATOR_NAME: &str = "PINTY";

/// Suffix of the feature carrying the time of the selected value
pub const MJD_SUFFIX: &str = "_mjd";

/// Suffix of the feature carrying the number of accumulated periods
pub const COUNT_SUFFIX: &str = "_count";

/// Suffix of the feature carrying the population standard deviation
pub const SIGMA_SUFFIX: &str = "_sigma";
