use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::full_palette::GREY_800;

use crate::{SignalError, SignalResult};

/// Canvas size in pixels, a 14 x 10 inch figure at 100 dpi.
pub const CANVAS: (u32, u32) = (1400, 1000);

/// Process-wide palette. Set once at startup with [`init_theme`]; plots read it via [`theme`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
  pub background: RGBColor,
  pub plot_background: RGBColor,
  pub grid: RGBColor,
  pub line: RGBColor,
  pub text: RGBColor,
}

impl Theme {
  /// Grey-blue panel with a white grid and a deep blue trace.
  pub const fn darkgrid() -> Self {
    Self {
      background: WHITE,
      plot_background: RGBColor(234, 234, 242),
      grid: WHITE,
      line: RGBColor(76, 114, 176),
      text: GREY_800,
    }
  }

  pub const fn plain() -> Self {
    Self {
      background: WHITE,
      plot_background: WHITE,
      grid: RGBColor(220, 220, 220),
      line: BLACK,
      text: BLACK,
    }
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::darkgrid()
  }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Returns false if a theme was already installed.
pub fn init_theme(theme: Theme) -> bool {
  THEME.set(theme).is_ok()
}

pub fn theme() -> &'static Theme {
  THEME.get_or_init(Theme::default)
}

pub struct PlotConfig<'a> {
  pub out_file: &'a Path,
  pub title: &'a str,
  pub x_label: &'a str,
  pub y_label: &'a str,
  /// Fixed x window. Points outside it are not drawn.
  pub x_range: Option<Range<f64>>,
  /// Fixed y range, otherwise fitted to the visible points.
  pub y_range: Option<Range<f64>>,
}

pub struct Plot;

impl Plot {
  pub fn line(points: &[(f64, f64)], cfg: PlotConfig<'_>) -> SignalResult<()> {
    let PlotConfig {
      out_file,
      title,
      x_label,
      y_label,
      x_range,
      y_range,
    } = cfg;

    let visible: Vec<(f64, f64)> = match &x_range {
      Some(r) => points
        .iter()
        .copied()
        .filter(|(x, _)| *x >= r.start && *x <= r.end)
        .collect(),
      None => points.to_vec(),
    };
    let x_range = x_range.unwrap_or_else(|| span(visible.iter().map(|p| p.0)));
    let y_range = y_range.unwrap_or_else(|| span(visible.iter().map(|p| p.1)));

    let theme = theme();
    let root = BitMapBackend::new(out_file, CANVAS).into_drawing_area();
    root
      .fill(&theme.background)
      .map_err(|e| SignalError::Plot(format!("Failed to fill drawing area: {}", e)))?;

    let mut chart = ChartBuilder::on(&root)
      .margin(20)
      .set_label_area_size(LabelAreaPosition::Left, 110)
      .set_label_area_size(LabelAreaPosition::Bottom, 80)
      .caption(title, ("sans-serif", 32.0).into_font().color(&theme.text))
      .build_cartesian_2d(x_range, y_range)
      .map_err(|e| SignalError::Plot(format!("Failed to build cartesian 2d: {}", e)))?;

    chart
      .plotting_area()
      .fill(&theme.plot_background)
      .map_err(|e| SignalError::Plot(format!("Failed to fill plot area: {}", e)))?;

    chart
      .configure_mesh()
      .bold_line_style(theme.grid.stroke_width(2))
      .light_line_style(theme.grid)
      .axis_style(theme.plot_background)
      .label_style(("sans-serif", 22, &theme.text).into_text_style(&root))
      .x_desc(x_label)
      .y_desc(y_label)
      .draw()
      .map_err(|e| SignalError::Plot(format!("Failed to draw mesh: {}", e)))?;

    chart
      .draw_series(LineSeries::new(visible, theme.line.stroke_width(1)))
      .map_err(|e| SignalError::Plot(format!("Failed to draw series: {}", e)))?;

    root
      .present()
      .map_err(|e| SignalError::Plot(format!("Failed to write {}: {}", out_file.display(), e)))?;
    Ok(())
  }
}

/// Tight min..max of `values`, widened when empty or flat so the axis stays drawable.
fn span<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
  let (min, max) = values.fold((f64::MAX, f64::MIN), |acc, v| (acc.0.min(v), acc.1.max(v)));
  if min > max {
    0.0..1.0
  } else if min == max {
    min - 0.5..max + 0.5
  } else {
    min..max
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn span_is_tight() {
    assert_eq!(span([3.0, -1.0, 2.0].into_iter()), -1.0..3.0);
  }

  #[test]
  fn span_widens_degenerate_input() {
    assert_eq!(span(std::iter::empty()), 0.0..1.0);
    assert_eq!(span([2.0, 2.0].into_iter()), 1.5..2.5);
  }

  #[test]
  fn theme_defaults_when_unset() {
    assert_eq!(Theme::default(), Theme::darkgrid());
    assert_eq!(*theme(), Theme::darkgrid());
  }
}
