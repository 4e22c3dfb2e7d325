use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage configuration for a family of tasks.
///
/// `base_dir` is the root directory all task outputs live under; `tag`
/// shards a group of related tasks below it. Both are injected at
/// construction — there is no process-wide default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
  pub base_dir: PathBuf,
  pub tag: String,
}

impl TaskConfig {
  pub fn new(base_dir: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
    Self {
      base_dir: base_dir.into(),
      tag: tag.into(),
    }
  }
}
