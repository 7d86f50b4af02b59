use std::path::PathBuf;

use clap::{
  ArgAction,
  Parser,
  Subcommand,
};

#[derive(Parser, Debug)]
#[command(name = "the-inspect", about, version)]
pub struct Cli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  pub verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  pub log_file: Option<PathBuf>,

  /// Load decode limits from a TOML file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  pub config_file: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
  /// Decode a single frame and print it with its diagnostics
  Decode {
    /// Frame bytes (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the frame as JSON
    #[arg(long)]
    json: bool,
  },

  /// Replay a length-delimited frame stream through the session checks
  Stream {
    /// Stream bytes (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
  },

  /// Encode a JSON frame (or array of frames) to wire bytes on stdout
  Encode {
    /// JSON input (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Prefix each frame with its length; implied for arrays
    #[arg(long)]
    delimited: bool,
  },
}
