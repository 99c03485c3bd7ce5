pub use butter::*;
pub use fft::*;
pub use filtfilt::*;

pub mod butter;
pub mod fft;
pub mod filtfilt;

/// Round half to even at the given number of decimals.
pub fn round_decimals(x: f64, decimals: i32) -> f64 {
  let scale = 10f64.powi(decimals);
  (x * scale).round_ties_even() / scale
}

/// Convert a span in milliseconds to a sample count at `rate` samples per second.
pub fn ms_to_samples(ms: f64, rate: u64) -> usize {
  let n = (ms * rate as f64 / 1000.0).round_ties_even();
  if n <= 0.0 {
    0
  } else {
    n as usize
  }
}
