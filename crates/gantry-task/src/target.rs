use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::error::TaskError;

/// Handle to a task output on the local filesystem.
///
/// Writes are staged under a random `.tmp-` suffix in the destination
/// directory and renamed into place once flushed, so a half-written output
/// is never observable at the final path — regardless of when the writing
/// process is killed, the output is either complete or absent. A leftover
/// staging file therefore means the output is absent, not damaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTarget {
  path: PathBuf,
}

impl LocalTarget {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Whether the finished output exists. This is the sole completeness
  /// signal; it never inspects content.
  pub fn exists(&self) -> bool {
    self.path.is_file()
  }

  /// Staging leftovers for this output: `{filename}.tmp-*` siblings from
  /// writes that never reached the rename.
  pub fn partial_leftovers(&self) -> Vec<PathBuf> {
    let Some(dir) = self.path.parent() else {
      return Vec::new();
    };
    let Some(file_name) = self.path.file_name().and_then(|n| n.to_str()) else {
      return Vec::new();
    };
    let marker = format!("{file_name}.tmp-");
    let Ok(entries) = fs::read_dir(dir) else {
      return Vec::new();
    };

    let mut leftovers: Vec<PathBuf> = entries
      .filter_map(|entry| entry.ok())
      .map(|entry| entry.path())
      .filter(|path| {
        path
          .file_name()
          .and_then(|n| n.to_str())
          .is_some_and(|n| n.starts_with(&marker))
      })
      .collect();
    leftovers.sort();
    leftovers
  }

  /// Open the finished output for reading.
  ///
  /// Fails with [`TaskError::PartialWrite`] when only staging leftovers
  /// exist at the expected location, so consumers never mistake debris for
  /// data.
  pub fn open(&self) -> Result<File, TaskError> {
    if !self.exists()
      && let Some(leftover) = self.partial_leftovers().into_iter().next()
    {
      warn!(
        path = %self.path.display(),
        leftover = %leftover.display(),
        "expected output absent, staging leftover present"
      );
      return Err(TaskError::PartialWrite {
        path: self.path.clone(),
      });
    }
    Ok(File::open(&self.path)?)
  }

  /// Read the finished output as a string.
  pub fn read_to_string(&self) -> Result<String, TaskError> {
    let mut content = String::new();
    io::Read::read_to_string(&mut self.open()?, &mut content)?;
    Ok(content)
  }

  /// Write the output atomically.
  ///
  /// Parent directories are created as needed. `write_fn` receives a
  /// buffered writer over a staging file in the destination directory; the
  /// staging file is renamed to the final path after a successful flush and
  /// removed on failure.
  pub fn write(
    &self,
    write_fn: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
  ) -> Result<(), TaskError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }

    let staging = self.staging_path();
    match write_staged(&staging, write_fn).and_then(|()| fs::rename(&staging, &self.path)) {
      Ok(()) => Ok(()),
      Err(err) => {
        let _ = fs::remove_file(&staging);
        Err(TaskError::Io(err))
      }
    }
  }

  fn staging_path(&self) -> PathBuf {
    let file_name = self
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "output".to_string());
    self
      .path
      .with_file_name(format!("{file_name}.tmp-{}", Uuid::new_v4().simple()))
  }
}

fn write_staged(
  staging: &Path,
  write_fn: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> io::Result<()> {
  let mut writer = BufWriter::new(File::create(staging)?);
  write_fn(&mut writer)?;
  writer.flush()
}
