use std::io::Write;
use std::path::PathBuf;

use gantry_task::{Parameters, PathOptions, Task, TaskConfig, TaskError};
use tracing::info;

use crate::fs;

/// Writes the input file's record count, as a decimal followed by a
/// newline, to a digest-named output.
pub struct LineCount {
  config: TaskConfig,
  filename: PathBuf,
}

impl LineCount {
  pub fn new(config: TaskConfig, filename: impl Into<PathBuf>) -> Self {
    Self {
      config,
      filename: filename.into(),
    }
  }
}

impl Task for LineCount {
  fn name(&self) -> &str {
    "line-count"
  }

  fn config(&self) -> Option<&TaskConfig> {
    Some(&self.config)
  }

  fn parameters(&self) -> Parameters {
    Parameters::new().with("filename", self.filename.clone())
  }

  fn path_options(&self) -> PathOptions {
    PathOptions::digest()
  }

  fn run(&self) -> Result<(), TaskError> {
    let count = fs::count_records(&self.filename).map_err(|err| {
      TaskError::Misconfigured(format!(
        "line-count: cannot read {}: {err}",
        self.filename.display()
      ))
    })?;
    self.output()?.write(|out| writeln!(out, "{count}"))?;
    info!(input = %self.filename.display(), count, "counted records");
    Ok(())
  }
}
