use log::*;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Level named by `LOG_LEVEL`, falling back to info.
pub fn env_log_level() -> LevelFilter {
  let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
  match log_level.to_lowercase().as_str() {
    "trace" => LevelFilter::Trace,
    "debug" => LevelFilter::Debug,
    "info" => LevelFilter::Info,
    "warn" => LevelFilter::Warn,
    "error" => LevelFilter::Error,
    _ => LevelFilter::Info,
  }
}

pub fn init_logger() -> anyhow::Result<()> {
  init_logger_with(env_log_level())
}

pub fn init_logger_with(log_level: LevelFilter) -> anyhow::Result<()> {
  let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
  let mut cfg = ConfigBuilder::new();
  cfg.set_time_offset(offset);
  let cfg = cfg.build();

  TermLogger::init(log_level, cfg, TerminalMode::Mixed, ColorChoice::Auto)
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))
}
