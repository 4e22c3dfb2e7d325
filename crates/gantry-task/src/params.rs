use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// A single parameter value as it appears in a canonical filename.
///
/// The `Display` output is the exact text joined into the filename stem, so
/// it must stay stable: dates render as `%Y-%m-%d`, paths as given.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
  Str(String),
  Int(i64),
  Date(NaiveDate),
  Path(PathBuf),
}

impl fmt::Display for ParamValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Str(s) => f.write_str(s),
      Self::Int(n) => write!(f, "{n}"),
      Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
      Self::Path(p) => write!(f, "{}", p.display()),
    }
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl From<i64> for ParamValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<NaiveDate> for ParamValue {
  fn from(value: NaiveDate) -> Self {
    Self::Date(value)
  }
}

impl From<PathBuf> for ParamValue {
  fn from(value: PathBuf) -> Self {
    Self::Path(value)
  }
}

impl From<&Path> for ParamValue {
  fn from(value: &Path) -> Self {
    Self::Path(value.to_path_buf())
  }
}

/// Insertion-ordered mapping of parameter names to values.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Only fields meaningful to output identity belong here — anything
/// irrelevant to naming is excluded by the task author, not left to
/// accident.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Vec<(String, ParamValue)>);

impl Parameters {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  /// Builder-style insert.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    self.insert(name, value);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
    let name = name.into();
    let value = value.into();
    match self.0.iter_mut().find(|(k, _)| *k == name) {
      Some((_, v)) => *v = value,
      None => self.0.push((name, value)),
    }
  }

  pub fn get(&self, name: &str) -> Option<&ParamValue> {
    self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
  }

  /// Convenience accessor for date-valued parameters.
  pub fn date(&self, name: &str) -> Option<NaiveDate> {
    match self.get(name) {
      Some(ParamValue::Date(d)) => Some(*d),
      _ => None,
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|(k, _)| k == name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Pairs in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }
}
