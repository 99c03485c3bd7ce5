use sci_rs::signal::filter::design::Sos;
use sci_rs::signal::filter::sosfiltfilt_dyn;

use crate::{SignalError, SignalResult};

/// Odd-extension length used at each end: three times the tap count of the cascade.
pub fn padlen(sos: &[Sos<f64>]) -> usize {
  3 * (2 * sos.len() + 1)
}

/// Zero-phase filtering: run the cascade forward, then backward over the result.
pub fn filtfilt(sos: &[Sos<f64>], x: &[f64]) -> SignalResult<Vec<f64>> {
  let padlen = padlen(sos);
  if x.len() <= padlen {
    return Err(SignalError::SignalTooShort {
      len: x.len(),
      padlen,
    });
  }
  Ok(sosfiltfilt_dyn(x.iter(), sos))
}
