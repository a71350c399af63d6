//! # Pinty
//!
//! Temporal compositing of sparse per-bin observations: for every spatial bin,
//! one observation is kept per reporting period, and the series is reduced to
//! the value closest to its mean, along with that value's time, the number of
//! periods and the standard deviation.
//!
//! Start from [`aggregator::PintyAggregator`], or from [`config::PintyConfig`]
//! when the aggregator is configured from a file.

pub mod aggregator;
pub mod bin_state;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod observation;
pub mod pinty_errors;
pub mod selector;
pub mod spatial;
pub mod temporal;
pub mod time;
pub mod variables;
