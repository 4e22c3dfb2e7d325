use std::path::PathBuf;

use sha1::{Digest, Sha1};

use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::params::Parameters;

/// Default extension for artifact filenames.
pub const DEFAULT_EXT: &str = "tsv";

/// Filename options for [`artifact_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
  /// Extension appended to the filename stem.
  pub ext: String,

  /// Replace the stem with its lowercase-hex SHA-1 digest. Used when the
  /// readable stem could exceed path-length limits or contain characters
  /// unsafe for a filename (arbitrary file paths, URLs).
  pub digest: bool,
}

impl Default for PathOptions {
  fn default() -> Self {
    Self {
      ext: DEFAULT_EXT.to_string(),
      digest: false,
    }
  }
}

impl PathOptions {
  /// Digest-named, with the default extension.
  pub fn digest() -> Self {
    Self {
      digest: true,
      ..Self::default()
    }
  }

  /// Readable stem with a custom extension.
  pub fn ext(ext: impl Into<String>) -> Self {
    Self {
      ext: ext.into(),
      digest: false,
    }
  }
}

/// Build the canonical path for a task identity.
///
/// Layout: `{base_dir}/{tag}/{type_name}/{filename}`. The filename stem
/// joins every `key-value` pair, sorted lexicographically, with `-`; an
/// empty parameter set yields the stem `output`. Insertion order of the
/// parameters never matters.
///
/// Pure function with no side effects: identical inputs always produce the
/// identical path, so concurrent callers agree on the target without
/// coordination.
pub fn artifact_path(
  config: &TaskConfig,
  type_name: &str,
  parameters: &Parameters,
  options: &PathOptions,
) -> Result<PathBuf, TaskError> {
  if config.base_dir.as_os_str().is_empty() {
    return Err(TaskError::Misconfigured(format!(
      "no base directory configured for task '{type_name}'"
    )));
  }
  if config.tag.is_empty() {
    return Err(TaskError::Misconfigured(format!(
      "no tag configured for task '{type_name}'"
    )));
  }

  let mut stem = if parameters.is_empty() {
    "output".to_string()
  } else {
    let mut parts: Vec<String> = parameters
      .iter()
      .map(|(key, value)| format!("{key}-{value}"))
      .collect();
    parts.sort();
    parts.join("-")
  };

  if options.digest {
    stem = hex_sha1(&stem);
  }

  Ok(
    config
      .base_dir
      .join(&config.tag)
      .join(type_name)
      .join(format!("{stem}.{}", options.ext)),
  )
}

/// Lowercase hex SHA-1 of `input`, 40 characters.
fn hex_sha1(input: &str) -> String {
  let digest = Sha1::digest(input.as_bytes());
  digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
