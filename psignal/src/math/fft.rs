use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::cmp::Ordering;

/// Sample frequencies of an `n` point transform with sample spacing `d`.
/// Non-negative bins come first, followed by the negative half.
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
  let val = 1.0 / (n as f64 * d);
  let mut result = Vec::with_capacity(n);
  let m = if n % 2 == 0 { n / 2 } else { n / 2 + 1 };
  for i in 0..m {
    result.push(i as f64 * val);
  }
  for i in -(n as i64 / 2)..0 {
    result.push(i as f64 * val);
  }
  result
}

/// Frequency bins (Hz) paired with the magnitude of the transform at each bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
  pub frequencies: Vec<f64>,
  pub magnitude: Vec<f64>,
}

impl Spectrum {
  pub fn compute(series: &[f64], rate: u64) -> Self {
    let n = series.len();
    if n == 0 {
      return Self {
        frequencies: vec![],
        magnitude: vec![],
      };
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = series.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    Self {
      frequencies: fft_frequencies(n, 1.0 / rate as f64),
      magnitude: buffer.iter().map(|x| x.norm()).collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.magnitude.len()
  }

  pub fn is_empty(&self) -> bool {
    self.magnitude.is_empty()
  }

  /// The first `n / 2` bins: DC up to just below Nyquist.
  pub fn positive(&self) -> (&[f64], &[f64]) {
    let half = self.len() / 2;
    (&self.frequencies[..half], &self.magnitude[..half])
  }

  /// Frequency of the largest positive-half magnitude, ignoring DC.
  pub fn peak_frequency(&self) -> Option<f64> {
    let (freqs, mags) = self.positive();
    freqs
      .iter()
      .zip(mags.iter())
      .skip(1)
      .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
      .map(|(f, _)| *f)
  }
}
