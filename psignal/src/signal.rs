use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::*;

use crate::{
  butter, filtfilt, ms_to_samples, Cutoff, Dataset, FilterKind, Plot, PlotConfig, SignalError,
  SignalResult, Spectrum,
};

pub const DEFAULT_TITLE: &str = "No title set";
pub const DEFAULT_ORDER: usize = 5;
/// Visible window of the spectrum plot in kHz.
pub const FFT_WINDOW_KHZ: (f64, f64) = (10.0, 1200.0);

/// A single-channel recording with its filtered view and cached spectra.
#[derive(Debug, Clone)]
pub struct Signal {
  id: String,
  data: Dataset,
  sampling_period: f64,
  sampling_rate: u64,
  filtered: Option<Vec<f64>>,
  applied_filters: IndexMap<FilterKind, Cutoff>,
  spectrum_raw: Option<Spectrum>,
  spectrum_filtered: Option<Spectrum>,
}

impl Signal {
  /// Load a recording from disk, optionally keeping only `length_ms` starting at `start_ms`.
  pub fn open(
    path: &Path,
    id: impl Into<String>,
    start_ms: Option<f64>,
    length_ms: Option<f64>,
  ) -> SignalResult<Self> {
    let data = Dataset::csv_series(path)?;
    let signal = Self::from_dataset(data, id, start_ms, length_ms)?;
    info!(
      "Loaded {} samples at {} Hz from {}",
      signal.len(),
      signal.sampling_rate,
      path.display()
    );
    Ok(signal)
  }

  pub fn from_dataset(
    mut data: Dataset,
    id: impl Into<String>,
    start_ms: Option<f64>,
    length_ms: Option<f64>,
  ) -> SignalResult<Self> {
    let sampling_period = data.sampling_period()?;
    let sampling_rate = (1.0 / sampling_period).round_ties_even() as u64;

    data.shift_to_origin();

    let start = start_ms.map(|ms| ms_to_samples(ms, sampling_rate)).unwrap_or(0);
    let length = length_ms.map(|ms| ms_to_samples(ms, sampling_rate)).unwrap_or(0);
    if start > 0 || length > 0 {
      data.trim(start, length)?;
      debug!("Trimmed to {} samples starting at sample {}", data.len(), start);
    }

    Ok(Self {
      id: id.into(),
      data,
      sampling_period,
      sampling_rate,
      filtered: None,
      applied_filters: IndexMap::new(),
      spectrum_raw: None,
      spectrum_filtered: None,
    })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Seconds per sample.
  pub fn sampling_period(&self) -> f64 {
    self.sampling_period
  }

  /// Samples per second.
  pub fn sampling_rate(&self) -> u64 {
    self.sampling_rate
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn data(&self) -> &Dataset {
    &self.data
  }

  pub fn time(&self) -> Vec<f64> {
    self.data.x()
  }

  pub fn raw(&self) -> Vec<f64> {
    self.data.y()
  }

  pub fn filtered(&self) -> Option<&[f64]> {
    self.filtered.as_deref()
  }

  pub fn applied_filters(&self) -> &IndexMap<FilterKind, Cutoff> {
    &self.applied_filters
  }

  /// Butterworth filter the raw amplitude forward and backward, replacing the filtered view.
  /// Re-applying a kind overwrites its recorded cutoff.
  pub fn apply_filter(
    &mut self,
    cutoff: impl Into<Cutoff>,
    order: usize,
    kind: FilterKind,
  ) -> SignalResult<()> {
    let cutoff = cutoff.into();
    kind.check(&cutoff)?;

    let sos = butter(order, &cutoff.normalized(self.sampling_rate), kind)?;
    let filtered = filtfilt(&sos, &self.raw())?;
    info!("Applied {} filter at {:?} Hz with order {}", kind, cutoff.values(), order);

    self.filtered = Some(filtered);
    self.applied_filters.insert(kind, cutoff);
    self.spectrum_filtered = None;
    Ok(())
  }

  /// Applied filters as `<kind>-<cutoff>` joined by `_`, in first-application order.
  pub fn filter_summary(&self) -> String {
    self
      .applied_filters
      .iter()
      .map(|(kind, cutoff)| format!("{}-{}", kind, cutoff.label()))
      .collect::<Vec<_>>()
      .join("_")
  }

  /// Magnitude spectrum of the raw or filtered amplitude, computed once and cached.
  /// The filtered spectrum is dropped whenever a new filter is applied.
  pub fn spectrum(&mut self, filtered: bool) -> SignalResult<&Spectrum> {
    let rate = self.sampling_rate;
    let spectrum: &Spectrum = if filtered {
      let series = self.filtered.as_deref().ok_or(SignalError::NotFiltered)?;
      self.spectrum_filtered.get_or_insert_with(|| {
        debug!("Computing filtered spectrum over {} samples", series.len());
        Spectrum::compute(series, rate)
      })
    } else {
      let data = &self.data;
      self.spectrum_raw.get_or_insert_with(|| {
        debug!("Computing raw spectrum over {} samples", data.len());
        Spectrum::compute(&data.y(), rate)
      })
    };
    Ok(spectrum)
  }

  /// File name of the time-domain plot.
  pub fn plot_name(&self, filename: Option<&str>, filtered: bool) -> SignalResult<String> {
    let base = filename.unwrap_or(self.id.as_str());
    if filtered {
      if self.applied_filters.is_empty() {
        return Err(SignalError::NotFiltered);
      }
      Ok(format!("{}_{}.png", base, self.filter_summary()))
    } else {
      Ok(format!("{}.png", base))
    }
  }

  /// File name of the spectrum plot.
  pub fn fft_plot_name(&self, filename: Option<&str>) -> String {
    format!("{}-fft.png", filename.unwrap_or(self.id.as_str()))
  }

  /// Time-domain plot written to the working directory.
  pub fn plot(
    &self,
    filename: Option<&str>,
    title: Option<&str>,
    filtered: bool,
  ) -> SignalResult<PathBuf> {
    self.plot_in(Path::new("."), filename, title, filtered)
  }

  pub fn plot_in(
    &self,
    dir: &Path,
    filename: Option<&str>,
    title: Option<&str>,
    filtered: bool,
  ) -> SignalResult<PathBuf> {
    let out_file = dir.join(self.plot_name(filename, filtered)?);
    let title = title.unwrap_or(DEFAULT_TITLE);
    let (title, amplitude) = if filtered {
      let filtered = self.filtered.clone().ok_or(SignalError::NotFiltered)?;
      (format!("{}_filt", title), filtered)
    } else {
      (title.to_string(), self.raw())
    };

    let points: Vec<(f64, f64)> = self.time().into_iter().zip(amplitude).collect();
    Plot::line(
      &points,
      PlotConfig {
        out_file: &out_file,
        title: &title,
        x_label: "Time (ms)",
        y_label: "Amplitude",
        x_range: None,
        y_range: None,
      },
    )?;
    info!("Wrote {}", out_file.display());
    Ok(out_file)
  }

  /// Spectrum plot in kHz written to the working directory.
  pub fn plot_fft(
    &mut self,
    filename: Option<&str>,
    title: Option<&str>,
    filtered: bool,
    ylim: Option<(f64, f64)>,
  ) -> SignalResult<PathBuf> {
    self.plot_fft_in(Path::new("."), filename, title, filtered, ylim)
  }

  pub fn plot_fft_in(
    &mut self,
    dir: &Path,
    filename: Option<&str>,
    title: Option<&str>,
    filtered: bool,
    ylim: Option<(f64, f64)>,
  ) -> SignalResult<PathBuf> {
    let out_file = dir.join(self.fft_plot_name(filename));
    let title = title.unwrap_or(DEFAULT_TITLE);
    let title = if filtered {
      format!("{}-filtered", title)
    } else {
      title.to_string()
    };

    let spectrum = self.spectrum(filtered)?;
    let (freqs, mags) = spectrum.positive();
    let points: Vec<(f64, f64)> = freqs
      .iter()
      .zip(mags.iter())
      .map(|(f, m)| (f / 1000.0, *m))
      .collect();

    Plot::line(
      &points,
      PlotConfig {
        out_file: &out_file,
        title: &title,
        x_label: "Frequency (KHz)",
        y_label: "Amplitude",
        x_range: Some(FFT_WINDOW_KHZ.0..FFT_WINDOW_KHZ.1),
        y_range: ylim.map(|(lo, hi)| lo..hi),
      },
    )?;
    info!("Wrote {}", out_file.display());
    Ok(out_file)
  }
}
