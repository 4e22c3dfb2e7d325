use std::path::PathBuf;

use gantry_task::{Parameters, Task, TaskError};
use tracing::info;

/// Creates a directory, parents included.
///
/// The output path is the parameter itself rather than a built artifact
/// path, and completeness is directory existence. Idempotent by
/// construction: creating an existing directory is a no-op.
pub struct Directory {
  path: PathBuf,
}

impl Directory {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl Task for Directory {
  fn name(&self) -> &str {
    "directory"
  }

  fn parameters(&self) -> Parameters {
    Parameters::new().with("path", self.path.clone())
  }

  fn output_path(&self) -> Result<PathBuf, TaskError> {
    Ok(self.path.clone())
  }

  fn complete(&self) -> Result<bool, TaskError> {
    Ok(self.path.is_dir())
  }

  fn run(&self) -> Result<(), TaskError> {
    std::fs::create_dir_all(&self.path)?;
    info!(path = %self.path.display(), "created directory");
    Ok(())
  }
}
