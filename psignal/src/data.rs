use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::*;

use crate::{round_decimals, SignalError, SignalResult};

/// Metadata line, column header, units line.
const PREAMBLE_LINES: u64 = 3;
const HEADER_LINE: u64 = 2;

pub trait Y: Clone {
  fn y(&self) -> f64;
}

pub trait X: Clone {
  fn x(&self) -> f64;
}

impl Y for f64 {
  fn y(&self) -> f64 {
    *self
  }
}

impl X for f64 {
  fn x(&self) -> f64 {
    *self
  }
}

/// One row of a recording: time in milliseconds and acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
  pub time: f64,
  pub acc: f64,
}

impl Y for Sample {
  fn y(&self) -> f64 {
    self.acc.y()
  }
}

impl X for Sample {
  fn x(&self) -> f64 {
    self.time.x()
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset(pub Vec<Sample>);

impl Dataset {
  pub fn new(data: Vec<Sample>) -> Self {
    Self(data)
  }

  pub fn x(&self) -> Vec<f64> {
    self.0.iter().map(|d| d.x()).collect()
  }

  pub fn y(&self) -> Vec<f64> {
    self.0.iter().map(|d| d.y()).collect()
  }

  pub fn data(&self) -> &Vec<Sample> {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Read a recording exported as `;` separated columns with `,` as the decimal mark.
  /// The first and third lines are metadata, the second is a header whose text is ignored.
  /// Every remaining line must hold exactly two fields: time (ms) and acceleration.
  pub fn csv_series(path: &Path) -> SignalResult<Dataset> {
    let file = File::open(path).map_err(|source| SignalError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let data = Self::from_reader(file)?;
    debug!("Read {} samples from {}", data.len(), path.display());
    Ok(data)
  }

  pub fn from_reader<R: Read>(reader: R) -> SignalResult<Dataset> {
    let mut reader = BufReader::new(reader);

    // the preamble is consumed by physical line so a blank metadata line still counts
    let mut preamble = String::new();
    for line in 1..=PREAMBLE_LINES {
      preamble.clear();
      if reader.read_line(&mut preamble).map_err(csv::Error::from)? == 0 {
        break;
      }
      let fields = preamble.trim_end_matches(['\r', '\n']).split(';').count();
      if line == HEADER_LINE && fields != 2 {
        return Err(SignalError::Parse {
          line,
          msg: format!("expected 2 header columns, found {}", fields),
        });
      }
    }

    let mut csv = csv::ReaderBuilder::new()
      .delimiter(b';')
      .has_headers(false)
      .flexible(true)
      .from_reader(reader);

    let mut samples = vec![];
    for (row, record) in csv.records().enumerate() {
      let record = record?;
      let line = PREAMBLE_LINES + record.position().map(|p| p.line()).unwrap_or(row as u64 + 1);
      if record.len() != 2 {
        return Err(SignalError::Parse {
          line,
          msg: format!("expected 2 fields, found {}", record.len()),
        });
      }
      samples.push(Sample {
        time: parse_decimal(&record[0], line)?,
        acc: parse_decimal(&record[1], line)?,
      });
    }
    Ok(Dataset::new(samples))
  }

  /// Seconds between the first two samples, rounded to 12 decimals.
  pub fn sampling_period(&self) -> SignalResult<f64> {
    if self.len() < 2 {
      return Err(SignalError::TooFewSamples(self.len()));
    }
    let period = round_decimals((self.0[1].time - self.0[0].time) / 1000.0, 12);
    if !period.is_finite() || period <= 0.0 {
      return Err(SignalError::SamplingPeriod(period));
    }
    Ok(period)
  }

  /// Shift every timestamp so the first sample sits at 0 ms.
  pub fn shift_to_origin(&mut self) {
    if let Some(t0) = self.0.first().map(|s| s.time) {
      for sample in self.0.iter_mut() {
        sample.time -= t0;
      }
    }
  }

  /// Drop `start` leading samples, then keep at most `length` of the rest.
  /// Zero for either count leaves that side untouched.
  pub fn trim(&mut self, start: usize, length: usize) -> SignalResult<()> {
    if start > 0 {
      if start > self.len() {
        return Err(SignalError::IntervalOutOfRange {
          start,
          len: self.len(),
        });
      }
      self.0.drain(..start);
    }
    if length > 0 {
      self.0.truncate(length);
    }
    Ok(())
  }
}

fn parse_decimal(field: &str, line: u64) -> SignalResult<f64> {
  let normalized = field.trim().replace(',', ".");
  normalized.parse::<f64>().map_err(|_| SignalError::Parse {
    line,
    msg: format!("{:?} is not a number", field),
  })
}
