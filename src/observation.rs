use hifitime::Epoch;
use smallvec::SmallVec;

use crate::{constants::MJD, time::epoch_to_mjd};

/// One raw sample record for a spatial location in an input swath
///
/// # Fields
///
/// * `mjd` - The observation time in modified julian date
/// * `values` - The extracted variable values, indexed through a [`VariableContext`](crate::variables::VariableContext)
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub mjd: MJD,
    values: SmallVec<[f32; 8]>,
}

impl Observation {
    /// Create a new observation
    ///
    /// Arguments
    /// ---------
    /// * `mjd`: the observation time (MJD)
    /// * `values`: the variable values, in variable-context order
    pub fn new<I>(mjd: MJD, values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        Observation {
            mjd,
            values: values.into_iter().collect(),
        }
    }

    /// Create a new observation from an epoch, converted to MJD (UTC)
    pub fn from_epoch<I>(epoch: &Epoch, values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        Self::new(epoch_to_mjd(epoch), values)
    }

    /// Value of the variable at `index`; an index outside the record reads as NaN.
    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(f32::NAN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
