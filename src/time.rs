use hifitime::Epoch;
use std::str::FromStr;

use crate::{constants::MJD, pinty_errors::PintyError};

/// Transformation from an epoch to modified julian date (MJD) in the UTC frame
///
/// Argument
/// --------
/// * `epoch`: the epoch to convert
///
/// Return
/// ------
/// * the epoch as a modified julian date (UTC)
pub fn epoch_to_mjd(epoch: &Epoch) -> MJD {
    epoch.to_mjd_utc_days()
}

/// Transformation from modified julian date (MJD, UTC) to an epoch
pub fn mjd_to_epoch(mjd: MJD) -> Epoch {
    Epoch::from_mjd_utc(mjd)
}

/// Transformation from date in the format YYYY-MM-ddTHH:mm:ss to modified julian date (MJD)
///
/// Argument
/// --------
/// * `date`: a date in the format YYYY-MM-ddTHH:mm:ss, UTC unless a scale is given
///
/// Return
/// ------
/// * the date in modified julian date (MJD), or [`PintyError::InvalidDate`] if it cannot be parsed
pub fn iso_to_mjd(date: &str) -> Result<MJD, PintyError> {
    let epoch = Epoch::from_str(date).map_err(|e| PintyError::InvalidDate(format!("{date}: {e}")))?;
    Ok(epoch_to_mjd(&epoch))
}
