use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use psignal::{Theme, DEFAULT_ORDER};

#[derive(Parser)]
#[command(
  name = "ps_signal",
  version,
  about = "Plot accelerometer recordings in time or frequency domain",
  long_about = "Load a semicolon separated, comma decimal recording, optionally trim it to an interval,\n\
                apply Butterworth filters and write a time or FFT plot as PNG."
)]
pub struct Cli {
  /// Recording to load
  pub file: PathBuf,

  /// Keep LENGTH_MS milliseconds starting at START_MS
  #[arg(short, long, num_args = 2, value_names = ["START_MS", "LENGTH_MS"])]
  pub interval: Option<Vec<f64>>,

  /// Plot title
  #[arg(short, long)]
  pub title: Option<String>,

  /// Low-pass cutoff in Hz
  #[arg(long, value_name = "HZ")]
  pub lp: Option<f64>,

  /// High-pass cutoff in Hz
  #[arg(long, value_name = "HZ")]
  pub hp: Option<f64>,

  /// Band-stop edges in Hz
  #[arg(long, num_args = 2, value_names = ["LOW_HZ", "HIGH_HZ"])]
  pub bs: Option<Vec<f64>>,

  /// Butterworth order used for every filter
  #[arg(long, default_value_t = DEFAULT_ORDER)]
  pub order: usize,

  /// Plot the magnitude spectrum instead of the time series
  #[arg(long)]
  pub fft: bool,

  /// Fixed y-range of the spectrum plot
  #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
  pub ylim: Option<Vec<f64>>,

  /// Base name of the output file, defaults to the recording's file stem
  #[arg(long)]
  pub id: Option<String>,

  /// Directory the PNG is written to
  #[arg(short, long, default_value = ".")]
  pub out_dir: PathBuf,

  /// Plot palette
  #[arg(long, value_enum, default_value_t = ThemeChoice::Darkgrid)]
  pub theme: ThemeChoice,

  /// Increase verbosity (-v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
  Darkgrid,
  Plain,
}

impl From<ThemeChoice> for Theme {
  fn from(choice: ThemeChoice) -> Self {
    match choice {
      ThemeChoice::Darkgrid => Theme::darkgrid(),
      ThemeChoice::Plain => Theme::plain(),
    }
  }
}

impl Cli {
  pub fn interval(&self) -> (Option<f64>, Option<f64>) {
    match self.interval.as_deref() {
      Some(&[start, length]) => (Some(start), Some(length)),
      _ => (None, None),
    }
  }

  pub fn ylim(&self) -> Option<(f64, f64)> {
    match self.ylim.as_deref() {
      Some(&[lo, hi]) => Some((lo, hi)),
      _ => None,
    }
  }

  pub fn id(&self) -> String {
    self
      .id
      .clone()
      .or_else(|| {
        self
          .file
          .file_stem()
          .map(|s| s.to_string_lossy().into_owned())
      })
      .unwrap_or_else(|| "signal".to_string())
  }
}
