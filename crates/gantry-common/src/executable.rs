use gantry_task::{Parameters, Task, TaskError};

use crate::fs;

/// Presence check for an external executable.
///
/// Considers itself complete only when `name` resolves on the
/// environment's search path. Reaching [`Task::run`] means the
/// precondition was false when the task was scheduled, so it always fails
/// with a missing-dependency error.
pub struct Executable {
  name: String,
  message: String,
}

impl Executable {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      message: String::new(),
    }
  }

  /// Advisory text appended to the failure, e.g. install instructions.
  pub fn message(mut self, message: impl Into<String>) -> Self {
    self.message = message.into();
    self
  }
}

impl Task for Executable {
  fn name(&self) -> &str {
    "executable"
  }

  // `message` is advisory only and deliberately excluded from identity.
  fn parameters(&self) -> Parameters {
    Parameters::new().with("name", self.name.as_str())
  }

  fn complete(&self) -> Result<bool, TaskError> {
    Ok(fs::which(&self.name).is_some())
  }

  fn run(&self) -> Result<(), TaskError> {
    Err(TaskError::DependencyUnavailable {
      name: self.name.clone(),
      message: self.message.clone(),
    })
  }
}
