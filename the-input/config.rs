use std::{
  fs,
  io,
  path::{
    Path,
    PathBuf,
  },
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

/// Bounds applied to every decoded frame.
///
/// ```toml
/// max-frame-bytes = 1048576
/// max-events = 512
/// validate = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DecodeLimits {
  pub max_frame_bytes:  usize,
  pub max_events:       usize,
  /// Applies to paste, text and composition strings.
  pub max_string_bytes: usize,
  /// Reject frames failing [`Input::validate`](crate::Input::validate).
  pub validate:         bool,
}

impl Default for DecodeLimits {
  fn default() -> Self {
    Self {
      max_frame_bytes:  4 * 1024 * 1024,
      max_events:       4096,
      max_string_bytes: 64 * 1024,
      validate:         true,
    }
  }
}

impl DecodeLimits {
  pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(contents)?)
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml_str(&contents)
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid decode limits: {0}")]
  Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod test {
  use std::io::Write;

  use super::*;

  #[test]
  fn missing_keys_take_defaults() {
    let limits = DecodeLimits::from_toml_str("max-events = 8\nvalidate = false\n").unwrap();
    assert_eq!(limits.max_events, 8);
    assert!(!limits.validate);
    assert_eq!(limits.max_frame_bytes, DecodeLimits::default().max_frame_bytes);
  }

  #[test]
  fn unknown_keys_are_rejected() {
    let err = DecodeLimits::from_toml_str("max-evnets = 8\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn nesting_depth_is_not_configurable() {
    let err = DecodeLimits::from_toml_str("max-depth = 32\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max-string-bytes = 16").unwrap();
    let limits = DecodeLimits::load(file.path()).unwrap();
    assert_eq!(limits.max_string_bytes, 16);

    let missing = file.path().with_extension("missing");
    assert!(matches!(
      DecodeLimits::load(&missing),
      Err(ConfigError::Read { .. })
    ));
  }
}
