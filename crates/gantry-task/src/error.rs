use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the addressing and identity layer.
///
/// Everything except [`TaskError::Io`] is deterministic and surfaced before
/// any filesystem mutation; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum TaskError {
  /// Programmer error: a task kind is missing configuration it needs before
  /// it can be addressed or run.
  #[error("misconfigured: {0}")]
  Misconfigured(String),

  /// A normalization rule was declared for a parameter, but the task never
  /// supplied an implementation for it.
  #[error("no substitute implemented for parameter '{parameter}'")]
  MissingCapability { parameter: String },

  /// A presence-check task was scheduled although its precondition was
  /// false: the named external dependency does not resolve.
  #[error("external dependency '{name}' required: {message}")]
  DependencyUnavailable { name: String, message: String },

  /// A temporary leftover was found where a finished output was expected.
  /// The output is treated as absent.
  #[error("partial write detected at {}", .path.display())]
  PartialWrite { path: PathBuf },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
