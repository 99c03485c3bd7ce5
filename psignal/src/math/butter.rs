//! Digital Butterworth design as second-order sections.
//!
//! Frequencies are normalized to Nyquist, so a cutoff `Wn` must lie in `(0, 1)`.

use std::fmt;

use sci_rs::signal::filter::design::{
  butter_dyn, DigitalFilter, FilterBandType, FilterOutputType, Sos, SosFormatFilter,
};

use crate::{SignalError, SignalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
  Low,
  High,
  Stop,
}

impl FilterKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      FilterKind::Low => "low",
      FilterKind::High => "high",
      FilterKind::Stop => "stop",
    }
  }

  fn band_type(&self) -> FilterBandType {
    match self {
      FilterKind::Low => FilterBandType::Lowpass,
      FilterKind::High => FilterBandType::Highpass,
      FilterKind::Stop => FilterBandType::Bandstop,
    }
  }

  /// Band-stop is specified by two edges, the other kinds by one.
  pub fn check(&self, cutoff: &Cutoff) -> SignalResult<()> {
    match (self, cutoff) {
      (FilterKind::Stop, Cutoff::Band(..)) => Ok(()),
      (FilterKind::Stop, Cutoff::Single(_)) => Err(SignalError::CutoffShape {
        kind: self.to_string(),
        expected: "a (low, high) pair as",
      }),
      (_, Cutoff::Single(_)) => Ok(()),
      (_, Cutoff::Band(..)) => Err(SignalError::CutoffShape {
        kind: self.to_string(),
        expected: "a single frequency as",
      }),
    }
  }
}

impl fmt::Display for FilterKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Cutoff frequency in Hz, either a single corner or a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
  Single(f64),
  Band(f64, f64),
}

impl Cutoff {
  pub fn values(&self) -> Vec<f64> {
    match *self {
      Cutoff::Single(f) => vec![f],
      Cutoff::Band(lo, hi) => vec![lo, hi],
    }
  }

  /// Integer-truncated frequencies joined by `-`, as used in output file names.
  pub fn label(&self) -> String {
    self
      .values()
      .iter()
      .map(|f| format!("{}", f.trunc() as i64))
      .collect::<Vec<_>>()
      .join("-")
  }

  /// Divide every edge by the Nyquist frequency of `rate`.
  pub fn normalized(&self, rate: u64) -> Vec<f64> {
    let nyq = 0.5 * rate as f64;
    self.values().iter().map(|f| f / nyq).collect()
  }
}

impl From<f64> for Cutoff {
  fn from(f: f64) -> Self {
    Cutoff::Single(f)
  }
}

impl From<(f64, f64)> for Cutoff {
  fn from((lo, hi): (f64, f64)) -> Self {
    Cutoff::Band(lo, hi)
  }
}

impl TryFrom<&[f64]> for Cutoff {
  type Error = SignalError;

  fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
    match *values {
      [f] => Ok(Cutoff::Single(f)),
      [lo, hi] => Ok(Cutoff::Band(lo, hi)),
      _ => Err(SignalError::CutoffCount(values.len())),
    }
  }
}

/// Design an `order` Butterworth filter for normalized edges `wn`.
pub fn butter(order: usize, wn: &[f64], kind: FilterKind) -> SignalResult<Vec<Sos<f64>>> {
  if order == 0 {
    return Err(SignalError::InvalidOrder);
  }
  let in_range = wn.iter().all(|w| *w > 0.0 && *w < 1.0);
  let shape_ok = match kind {
    FilterKind::Stop => wn.len() == 2 && wn[0] < wn[1],
    _ => wn.len() == 1,
  };
  if !in_range || !shape_ok {
    return Err(SignalError::InvalidCutoff(wn.to_vec()));
  }

  let design = butter_dyn(
    order,
    wn.to_vec(),
    Some(kind.band_type()),
    Some(false),
    Some(FilterOutputType::Sos),
    None,
  );
  match design {
    DigitalFilter::Sos(SosFormatFilter { sos }) => Ok(sos),
    _ => Err(SignalError::Design(kind.to_string())),
  }
}
