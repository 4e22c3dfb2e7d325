use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::normalize::{self, Rule};
use crate::params::Parameters;
use crate::path::{self, PathOptions};
use crate::target::LocalTarget;

/// The contract every concrete task implements.
///
/// A task is identified by its type name, a storage tag, and the parameters
/// meaningful to its output; everything else about it is invisible to the
/// addressing layer. Completeness is a cheap predicate — typically output
/// existence, never recomputation — and [`Task::run`] performs the work,
/// writing its output atomically (staged in the destination directory, then
/// renamed into place).
///
/// The lifecycle is driven by an external scheduler: it plans with
/// [`Task::parameters`], skips satisfied work with [`Task::complete`], and
/// conditionally invokes [`Task::run`]. A failed run is terminal for that
/// attempt; a later scheduling pass starts over from planning.
pub trait Task {
  /// Stable type name; becomes the path segment below the tag.
  fn name(&self) -> &str;

  /// Storage configuration, or `None` for tasks with no filesystem output.
  fn config(&self) -> Option<&TaskConfig> {
    None
  }

  /// The parameters meaningful to output identity, in declaration order.
  fn parameters(&self) -> Parameters;

  /// Normalization rules applied before path construction.
  fn rules(&self) -> Vec<Rule> {
    Vec::new()
  }

  /// Filename options for the canonical path.
  fn path_options(&self) -> PathOptions {
    PathOptions::default()
  }

  /// Canonical output path for this identity: parameters are normalized,
  /// then handed to the path builder.
  fn output_path(&self) -> Result<PathBuf, TaskError> {
    let config = self.config().ok_or_else(|| {
      TaskError::Misconfigured(format!(
        "no base directory or tag configured for task '{}'",
        self.name()
      ))
    })?;
    let normalized = normalize::normalize(&self.parameters(), &self.rules())?;
    path::artifact_path(config, self.name(), &normalized, &self.path_options())
  }

  /// Output handle at the canonical path.
  fn output(&self) -> Result<LocalTarget, TaskError> {
    Ok(LocalTarget::new(self.output_path()?))
  }

  /// Whether the output already exists in its finished form.
  fn complete(&self) -> Result<bool, TaskError> {
    Ok(self.output()?.exists())
  }

  /// Perform the work and write the output atomically.
  fn run(&self) -> Result<(), TaskError>;
}

/// What a single scheduling attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The task was already complete; `run` was not invoked.
  Skipped,
  /// The task ran to completion.
  Completed,
}

/// One scheduling attempt: check completeness, run only if needed.
///
/// This is the call order an external scheduler follows per task — plan,
/// check, conditionally run. Retry policy and concurrency stay with the
/// caller.
pub fn execute(task: &dyn Task) -> Result<Outcome, TaskError> {
  if task.complete()? {
    debug!(task = task.name(), "already satisfied, skipping");
    return Ok(Outcome::Skipped);
  }

  info!(task = task.name(), "running");
  match task.run() {
    Ok(()) => {
      info!(task = task.name(), "satisfied");
      Ok(Outcome::Completed)
    }
    Err(err) => {
      error!(task = task.name(), error = %err, "failed");
      Err(err)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;
  use crate::normalize::first_of_month;
  use crate::params::ParamValue;

  struct Touch {
    config: TaskConfig,
    label: String,
  }

  impl Task for Touch {
    fn name(&self) -> &str {
      "touch"
    }

    fn config(&self) -> Option<&TaskConfig> {
      Some(&self.config)
    }

    fn parameters(&self) -> Parameters {
      Parameters::new().with("label", self.label.as_str())
    }

    fn run(&self) -> Result<(), TaskError> {
      self.output()?.write(|out| writeln!(out, "done"))
    }
  }

  struct Degenerate;

  impl Task for Degenerate {
    fn name(&self) -> &str {
      "degenerate"
    }

    fn parameters(&self) -> Parameters {
      Parameters::new()
    }

    fn run(&self) -> Result<(), TaskError> {
      Ok(())
    }
  }

  struct Monthly {
    config: TaskConfig,
    date: chrono::NaiveDate,
  }

  impl Task for Monthly {
    fn name(&self) -> &str {
      "monthly"
    }

    fn config(&self) -> Option<&TaskConfig> {
      Some(&self.config)
    }

    fn parameters(&self) -> Parameters {
      Parameters::new().with("date", self.date)
    }

    fn rules(&self) -> Vec<Rule> {
      vec![first_of_month("date")]
    }

    fn run(&self) -> Result<(), TaskError> {
      Ok(())
    }
  }

  fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_execute_runs_then_skips() {
    let dir = tempfile::tempdir().unwrap();
    let task = Touch {
      config: TaskConfig::new(dir.path(), "t"),
      label: "a".into(),
    };

    assert!(!task.complete().unwrap());
    assert_eq!(execute(&task).unwrap(), Outcome::Completed);
    assert!(task.complete().unwrap());
    assert_eq!(execute(&task).unwrap(), Outcome::Skipped);
  }

  #[test]
  fn test_output_path_layout() {
    let task = Touch {
      config: TaskConfig::new("/var/data", "t"),
      label: "a".into(),
    };
    assert_eq!(
      task.output_path().unwrap(),
      std::path::Path::new("/var/data/t/touch/label-a.tsv")
    );
  }

  #[test]
  fn test_unconfigured_task_cannot_be_addressed() {
    let err = Degenerate.output_path().unwrap_err();
    assert!(matches!(err, TaskError::Misconfigured(message) if message.contains("degenerate")));
  }

  #[test]
  fn test_rules_flow_into_output_path() {
    let config = TaskConfig::new("/var/data", "t");
    let a = Monthly { config: config.clone(), date: date(2020, 1, 5) };
    let b = Monthly { config, date: date(2020, 1, 20) };

    assert_eq!(a.output_path().unwrap(), b.output_path().unwrap());
    assert_eq!(
      a.output_path().unwrap(),
      std::path::Path::new("/var/data/t/monthly/date-2020-01-01.tsv")
    );
  }

  #[test]
  fn test_normalization_is_for_naming_only() {
    // The raw parameter set is untouched; only the path reflects the rule.
    let task = Monthly {
      config: TaskConfig::new("/var/data", "t"),
      date: date(2020, 1, 5),
    };
    assert_eq!(
      task.parameters().get("date"),
      Some(&ParamValue::Date(date(2020, 1, 5)))
    );
  }
}
