use std::path::PathBuf;

use thiserror::Error;

pub type SignalResult<T = ()> = Result<T, SignalError>;

#[derive(Debug, Error)]
pub enum SignalError {
  #[error("Failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("{0}")]
  Csv(#[from] csv::Error),

  #[error("Line {line}: {msg}")]
  Parse { line: u64, msg: String },

  #[error("Recording needs at least two samples, found {0}")]
  TooFewSamples(usize),

  #[error("Sampling period must be positive and finite, got {0}")]
  SamplingPeriod(f64),

  #[error("Interval start at sample {start} is beyond the {len} samples available")]
  IntervalOutOfRange { start: usize, len: usize },

  #[error("{kind} filter expects {expected} cutoff")]
  CutoffShape { kind: String, expected: &'static str },

  #[error("Cutoff takes one or two frequencies, got {0}")]
  CutoffCount(usize),

  #[error("Normalized cutoff must satisfy 0 < Wn < 1 with ascending band edges, got {0:?}")]
  InvalidCutoff(Vec<f64>),

  #[error("Filter order must be at least 1")]
  InvalidOrder,

  #[error("Input of {len} samples must be longer than the pad length {padlen}")]
  SignalTooShort { len: usize, padlen: usize },

  #[error("No filter has been applied yet")]
  NotFiltered,

  #[error("Filter design did not yield second-order sections for {0} filter")]
  Design(String),

  #[error("{0}")]
  Plot(String),
}
