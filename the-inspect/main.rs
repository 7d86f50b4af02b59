mod cli;
mod commands;
mod logging;

use std::io::{
  self,
  Write,
};

use anyhow::{
  Context,
  Result,
};
use clap::Parser;
use the_input::{
  DecodeLimits,
  Decoder,
};

use crate::cli::{
  Cli,
  Command,
};

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::setup(cli.verbosity, cli.log_file.as_deref())?;

  let limits = match &cli.config_file {
    Some(path) => {
      DecodeLimits::load(path).with_context(|| format!("failed to load {}", path.display()))?
    },
    None => DecodeLimits::default(),
  };
  log::debug!("decode limits: {limits:?}");
  let decoder = Decoder::new(limits);

  let stdout = io::stdout();
  let mut out = stdout.lock();
  match cli.command {
    Command::Decode { file, json } => {
      let bytes = commands::read_input(file.as_deref())?;
      commands::decode(&decoder, &bytes, json, &mut out)?;
    },
    Command::Stream { file } => {
      let bytes = commands::read_input(file.as_deref())?;
      let summary = commands::stream(&decoder, &bytes, &mut out)?;
      log::info!("replayed {} frames", summary.frames);
    },
    Command::Encode { file, delimited } => {
      let json = commands::read_input(file.as_deref())?;
      commands::encode(&json, delimited, &mut out)?;
    },
  }
  out.flush()?;
  Ok(())
}
