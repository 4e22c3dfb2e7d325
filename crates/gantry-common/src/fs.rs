//! Filesystem helpers shared by the out-of-the-box tasks.

use std::env;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Resolve `name` against the environment's executable search path.
///
/// Returns the first `PATH` entry under which `name` is a regular,
/// executable file; `None` when nothing resolves. Boolean-ish by design:
/// no version probing, no shell involved.
pub fn which(name: &str) -> Option<PathBuf> {
  let path_var = env::var_os("PATH")?;
  env::split_paths(&path_var)
    .map(|dir| dir.join(name))
    .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path)
    .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}

/// Count newline-terminated records in the file at `path`.
///
/// A trailing record without a final newline still counts as one record.
pub fn count_records(path: &Path) -> io::Result<u64> {
  let mut reader = BufReader::new(std::fs::File::open(path)?);
  let mut record = Vec::new();
  let mut count = 0u64;
  loop {
    record.clear();
    if reader.read_until(b'\n', &mut record)? == 0 {
      return Ok(count);
    }
    count += 1;
  }
}

/// Files directly under `dir` whose name starts with `prefix`, sorted by
/// filename.
pub fn files_with_prefix(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if path.is_file()
      && entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with(prefix))
    {
      files.push(path);
    }
  }
  files.sort();
  Ok(files)
}
