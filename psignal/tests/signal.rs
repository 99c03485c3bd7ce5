use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use psignal::*;

/// Write a recorder export: three preamble lines, then `time;acc` rows with comma decimals.
fn write_recording(dir: &Path, name: &str, t0_ms: f64, dt_ms: f64, values: &[f64]) -> PathBuf {
  let mut text = String::from("Recorder;export\nTime;Channel A\n(ms);(g)\n");
  for (i, v) in values.iter().enumerate() {
    let t = t0_ms + i as f64 * dt_ms;
    text.push_str(&format!("{:.6};{:.9}\n", t, v).replace('.', ","));
  }
  let path = dir.join(name);
  fs::write(&path, text).unwrap();
  path
}

fn tone(freq: f64, rate: f64, n: usize) -> Vec<f64> {
  (0..n).map(|i| (2.0 * PI * freq * i as f64 / rate).sin()).collect()
}

fn two_tones(rate: f64, n: usize) -> Vec<f64> {
  tone(50.0, rate, n)
    .iter()
    .zip(tone(3000.0, rate, n))
    .map(|(a, b)| a + 0.5 * b)
    .collect()
}

#[test]
fn load_derives_sampling_and_shifts_origin() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_recording(dir.path(), "rec.csv", -5.0, 0.1, &tone(50.0, 10_000.0, 500));

  let signal = Signal::open(&path, "sig1", None, None).unwrap();
  assert_eq!(signal.sampling_rate(), 10_000);
  assert_eq!(signal.sampling_period(), 0.0001);
  assert_eq!(signal.len(), 500);
  assert_eq!(signal.time()[0], 0.0);
  assert_abs_diff_eq!(signal.time()[10], 1.0, epsilon = 1e-9);
  assert!(signal.filtered().is_none());
}

#[test]
fn interval_trims_prefix_then_length() {
  let dir = tempfile::tempdir().unwrap();
  let values = tone(50.0, 10_000.0, 1000);
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &values);
  let full = Signal::open(&path, "full", None, None).unwrap();

  let signal = Signal::open(&path, "sig1", Some(10.0), Some(20.0)).unwrap();
  assert_eq!(signal.len(), 200);
  assert_eq!(signal.raw()[0], full.raw()[100]);
  assert_abs_diff_eq!(signal.time()[0], 10.0, epsilon = 1e-9);

  let tail = Signal::open(&path, "tail", Some(90.0), Some(50.0)).unwrap();
  assert_eq!(tail.len(), 100);

  let err = Signal::open(&path, "late", Some(200.0), None).unwrap_err();
  assert!(matches!(err, SignalError::IntervalOutOfRange { start: 2000, len: 1000 }));
}

#[test]
fn missing_file_is_an_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = Signal::open(&dir.path().join("nope.csv"), "sig1", None, None).unwrap_err();
  assert!(matches!(err, SignalError::Io { .. }));
}

#[test]
fn lowpass_keeps_slow_tone_in_phase_and_removes_fast_tone() {
  let dir = tempfile::tempdir().unwrap();
  let rate = 10_000.0;
  let n = 2000;
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(rate, n));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  signal.apply_filter(500.0, DEFAULT_ORDER, FilterKind::Low).unwrap();
  let filtered = signal.filtered().unwrap();
  assert_eq!(filtered.len(), n);

  let slow = tone(50.0, rate, n);
  for i in 400..1600 {
    assert_abs_diff_eq!(filtered[i], slow[i], epsilon = 1e-3);
  }

  // peak of the slow tone lands on the same sample
  let argmax = |xs: &[f64]| {
    (400..600)
      .max_by(|a, b| xs[*a].partial_cmp(&xs[*b]).unwrap())
      .unwrap()
  };
  assert_eq!(argmax(filtered), argmax(&slow));
}

#[test]
fn highpass_removes_slow_tone() {
  let dir = tempfile::tempdir().unwrap();
  let rate = 10_000.0;
  let n = 2000;
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(rate, n));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  signal.apply_filter(1000.0, DEFAULT_ORDER, FilterKind::High).unwrap();
  let fast: Vec<f64> = tone(3000.0, rate, n).iter().map(|x| 0.5 * x).collect();
  let filtered = signal.filtered().unwrap();
  for i in 400..1600 {
    assert_abs_diff_eq!(filtered[i], fast[i], epsilon = 1e-3);
  }
}

#[test]
fn bandstop_requires_a_pair() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(10_000.0, 2000));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  let err = signal.apply_filter(150.0, 5, FilterKind::Stop).unwrap_err();
  assert!(matches!(err, SignalError::CutoffShape { .. }));
  assert!(signal.applied_filters().is_empty());

  let err = signal.apply_filter((100.0, 200.0), 5, FilterKind::Low).unwrap_err();
  assert!(matches!(err, SignalError::CutoffShape { .. }));

  signal.apply_filter((2000.0, 4000.0), 5, FilterKind::Stop).unwrap();
  let slow = tone(50.0, 10_000.0, 2000);
  let filtered = signal.filtered().unwrap();
  for i in 400..1600 {
    assert_abs_diff_eq!(filtered[i], slow[i], epsilon = 1e-2);
  }
}

#[test]
fn cutoff_above_nyquist_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(10_000.0, 2000));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();
  let err = signal.apply_filter(6000.0, 5, FilterKind::Low).unwrap_err();
  assert!(matches!(err, SignalError::InvalidCutoff(_)));
}

#[test]
fn filter_summary_overwrites_same_kind_in_place() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(10_000.0, 2000));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  signal.apply_filter(150.0, 5, FilterKind::Low).unwrap();
  assert_eq!(signal.plot_name(None, true).unwrap(), "sig1_low-150.png");

  signal.apply_filter(400.7, 5, FilterKind::High).unwrap();
  signal.apply_filter(200.0, 5, FilterKind::Low).unwrap();
  signal.apply_filter((800.0, 1200.0), 5, FilterKind::Stop).unwrap();
  assert_eq!(signal.filter_summary(), "low-200_high-400_stop-800-1200");
  assert_eq!(
    signal.plot_name(Some("run"), true).unwrap(),
    "run_low-200_high-400_stop-800-1200.png"
  );
}

#[test]
fn spectrum_peaks_at_tone_and_is_recomputed_after_filtering() {
  let dir = tempfile::tempdir().unwrap();
  let rate = 10_000.0;
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(rate, 2000));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  let raw = signal.spectrum(false).unwrap().clone();
  assert_eq!(raw.positive().0.len(), 1000);
  assert_abs_diff_eq!(raw.peak_frequency().unwrap(), 50.0, epsilon = 1e-9);

  assert!(matches!(signal.spectrum(true), Err(SignalError::NotFiltered)));

  signal.apply_filter(1000.0, 5, FilterKind::High).unwrap();
  let high = signal.spectrum(true).unwrap().clone();
  assert_abs_diff_eq!(high.peak_frequency().unwrap(), 3000.0, epsilon = 1e-9);

  signal.apply_filter(500.0, 5, FilterKind::Low).unwrap();
  let low = signal.spectrum(true).unwrap().clone();
  assert_abs_diff_eq!(low.peak_frequency().unwrap(), 50.0, epsilon = 1e-9);

  // the raw spectrum stays cached and untouched
  assert_eq!(signal.spectrum(false).unwrap(), &raw);
}

#[test]
fn plots_are_named_after_identifier_and_filters() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.1, &two_tones(10_000.0, 2000));
  let mut signal = Signal::open(&path, "sig1", None, None).unwrap();

  let err = signal.plot_in(dir.path(), None, None, true).unwrap_err();
  assert!(matches!(err, SignalError::NotFiltered));

  let raw = signal.plot_in(dir.path(), None, None, false).unwrap();
  assert_eq!(raw, dir.path().join("sig1.png"));
  assert!(raw.exists());

  signal.apply_filter(150.0, 5, FilterKind::Low).unwrap();
  let filtered = signal.plot_in(dir.path(), None, Some("run 3"), true).unwrap();
  assert_eq!(filtered, dir.path().join("sig1_low-150.png"));
  assert!(filtered.exists());
}

#[test]
fn fft_plot_covers_khz_window() {
  let dir = tempfile::tempdir().unwrap();
  let rate = 1_000_000.0;
  let path = write_recording(dir.path(), "rec.csv", 0.0, 0.001, &tone(100_000.0, rate, 4000));
  let mut signal = Signal::open(&path, "sig2", None, None).unwrap();
  assert_eq!(signal.sampling_rate(), 1_000_000);

  let out = signal.plot_fft_in(dir.path(), None, None, false, None).unwrap();
  assert_eq!(out, dir.path().join("sig2-fft.png"));
  assert!(out.exists());
  let peak = signal.spectrum(false).unwrap().peak_frequency().unwrap();
  assert_abs_diff_eq!(peak, 100_000.0, epsilon = 1e-6);

  signal.apply_filter(200_000.0, 5, FilterKind::Low).unwrap();
  let out = signal
    .plot_fft_in(dir.path(), Some("custom"), Some("t"), true, Some((0.0, 5e5)))
    .unwrap();
  assert_eq!(out, dir.path().join("custom-fft.png"));
  assert!(out.exists());
}

#[test]
fn blank_units_line_keeps_origin_and_trim_offsets() {
  let dir = tempfile::tempdir().unwrap();
  let mut text = String::from("Time;Channel A\n(ms);(g)\n\n");
  for i in 0..100 {
    text.push_str(&format!("{:.6};{:.6}\n", i as f64 * 0.1, i as f64).replace('.', ","));
  }
  let path = dir.path().join("blank.csv");
  fs::write(&path, text).unwrap();

  let signal = Signal::open(&path, "sig1", None, None).unwrap();
  assert_eq!(signal.len(), 100);
  assert_eq!(signal.raw()[0], 0.0);

  let trimmed = Signal::open(&path, "sig1", Some(1.0), Some(2.0)).unwrap();
  assert_eq!(trimmed.raw(), (10..30).map(|i| i as f64).collect::<Vec<_>>());
}
