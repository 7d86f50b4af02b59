use std::{
  io,
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use log::LevelFilter;

pub fn level_for(verbosity: u8) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Routes `log` records, including those forwarded from `tracing`, to
/// stderr or to `log_file`.
pub fn setup(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let dispatch = fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level_for(verbosity));

  let dispatch = match log_file {
    Some(path) => {
      let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
      dispatch.chain(file)
    },
    None => dispatch.chain(io::stderr()),
  };

  dispatch.apply().context("failed to install logger")?;
  Ok(())
}
