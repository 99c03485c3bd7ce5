use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use psignal::*;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
  dotenv::dotenv().ok();
  let cli = Cli::parse();

  let log_level = match cli.verbose {
    0 => env_log_level(),
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  init_logger_with(log_level)?;
  init_theme(cli.theme.into());

  let (start_ms, length_ms) = cli.interval();
  let mut signal = Signal::open(&cli.file, cli.id(), start_ms, length_ms)
    .with_context(|| format!("Failed to load {}", cli.file.display()))?;

  if let Some(lp) = cli.lp {
    signal.apply_filter(lp, cli.order, FilterKind::Low)?;
  }
  if let Some(hp) = cli.hp {
    signal.apply_filter(hp, cli.order, FilterKind::High)?;
  }
  if let Some(bs) = cli.bs.as_deref() {
    signal.apply_filter(Cutoff::try_from(bs)?, cli.order, FilterKind::Stop)?;
  }
  let filtered = !signal.applied_filters().is_empty();

  let out_file = if cli.fft {
    signal.plot_fft_in(&cli.out_dir, None, cli.title.as_deref(), filtered, cli.ylim())?
  } else {
    signal.plot_in(&cli.out_dir, None, cli.title.as_deref(), filtered)?
  };
  println!("{}", out_file.display());

  Ok(())
}
