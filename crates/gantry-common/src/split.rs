use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gantry_task::{Parameters, PathOptions, Task, TaskConfig, TaskError};
use tracing::info;
use uuid::Uuid;

use crate::fs;

/// Idempotent file chunking.
///
/// Splits the input file into a bounded number of chunk files and records
/// their absolute paths in a manifest, one per line, ordered by ascending
/// chunk filename. The manifest is the task's output; once it exists the
/// task is complete and never re-runs for the same `(filename, chunks)`
/// pair. It is digest-named because the identity includes a full input
/// path.
///
/// Chunk files carry a random per-invocation prefix, so concurrent or
/// repeated invocations sharing the directory cannot collide — the prefix
/// is the sole isolation mechanism, no locks are taken.
pub struct SplitFile {
  config: TaskConfig,
  filename: PathBuf,
  chunks: u32,
}

impl SplitFile {
  pub fn new(config: TaskConfig, filename: impl Into<PathBuf>) -> Self {
    Self {
      config,
      filename: filename.into(),
      chunks: 1,
    }
  }

  /// Number of chunks to split into. Must be positive; defaults to 1.
  pub fn chunks(mut self, chunks: u32) -> Self {
    self.chunks = chunks;
    self
  }

  /// Copy records into consecutive chunk files of `records_per_chunk`
  /// records each; the last chunk may be shorter. Records keep their
  /// delimiters untouched, so concatenating the chunks in filename order
  /// reproduces the input byte-for-byte.
  fn write_chunks(
    &self,
    dir: &Path,
    prefix: &str,
    records_per_chunk: u64,
    record_count: u64,
  ) -> Result<(), TaskError> {
    let mut reader = BufReader::new(File::open(&self.filename)?);
    let mut record = Vec::new();
    let mut remaining = record_count;
    let mut index = 0u32;

    while remaining > 0 {
      let take = remaining.min(records_per_chunk);
      let chunk = File::create(dir.join(format!("{prefix}-{index:05}")))?;
      let mut out = BufWriter::new(chunk);
      for _ in 0..take {
        record.clear();
        if reader.read_until(b'\n', &mut record)? == 0 {
          break;
        }
        out.write_all(&record)?;
      }
      out.flush()?;
      remaining -= take;
      index += 1;
    }
    Ok(())
  }
}

impl Task for SplitFile {
  fn name(&self) -> &str {
    "split-file"
  }

  fn config(&self) -> Option<&TaskConfig> {
    Some(&self.config)
  }

  fn parameters(&self) -> Parameters {
    Parameters::new()
      .with("filename", self.filename.clone())
      .with("chunks", i64::from(self.chunks))
  }

  fn path_options(&self) -> PathOptions {
    PathOptions::digest()
  }

  fn run(&self) -> Result<(), TaskError> {
    if self.chunks == 0 {
      return Err(TaskError::Misconfigured(
        "split-file: chunks must be positive".to_string(),
      ));
    }
    let line_count = fs::count_records(&self.filename).map_err(|err| {
      TaskError::Misconfigured(format!(
        "split-file: cannot read {}: {err}",
        self.filename.display()
      ))
    })?;
    let chunks = u64::from(self.chunks);
    let records_per_chunk = (line_count + chunks) / chunks;

    let manifest = self.output()?;
    let taskdir = manifest
      .path()
      .parent()
      .map(Path::to_path_buf)
      .ok_or_else(|| {
        TaskError::Misconfigured(format!(
          "split-file: manifest path {} has no parent directory",
          manifest.path().display()
        ))
      })?;
    std::fs::create_dir_all(&taskdir).map_err(|err| {
      TaskError::Misconfigured(format!(
        "split-file: cannot create {}: {err}",
        taskdir.display()
      ))
    })?;
    let taskdir = std::path::absolute(&taskdir)?;

    let prefix = Uuid::new_v4().simple().to_string();
    info!(
      input = %self.filename.display(),
      lines = line_count,
      chunks = self.chunks,
      records_per_chunk,
      "splitting"
    );

    self.write_chunks(&taskdir, &prefix, records_per_chunk, line_count)?;

    let chunk_files = fs::files_with_prefix(&taskdir, &prefix)?;
    manifest.write(|out| {
      for chunk in &chunk_files {
        writeln!(out, "{}", chunk.display())?;
      }
      Ok(())
    })?;
    info!(
      manifest = %manifest.path().display(),
      chunk_count = chunk_files.len(),
      "wrote manifest"
    );
    Ok(())
  }
}
