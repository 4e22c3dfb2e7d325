use std::fmt;

use chrono::Datelike;

use crate::error::TaskError;
use crate::params::{ParamValue, Parameters};

/// Substitute function of a normalization rule.
///
/// Must be a pure function of the parameter values it is handed (it may
/// read sibling parameters) and idempotent: applied to its own output it
/// yields the same value.
pub type Substitute = Box<dyn Fn(&Parameters) -> Result<ParamValue, TaskError> + Send + Sync>;

/// Rewrites one named parameter before path construction, so semantically
/// equivalent inputs collapse onto one canonical output.
///
/// Rules are supplied by the concrete task author and applied in a single
/// pass by [`normalize`]. A rule for a parameter that is not present is
/// skipped without error.
pub struct Rule {
  parameter: String,
  substitute: Option<Substitute>,
}

impl Rule {
  /// A rule with an implemented substitute.
  pub fn new(
    parameter: impl Into<String>,
    substitute: impl Fn(&Parameters) -> Result<ParamValue, TaskError> + Send + Sync + 'static,
  ) -> Self {
    Self {
      parameter: parameter.into(),
      substitute: Some(Box::new(substitute)),
    }
  }

  /// A rule that is declared but not implemented.
  ///
  /// Normalizing a parameter set that contains `parameter` fails with
  /// [`TaskError::MissingCapability`] — the raw value is never passed
  /// through silently, since that would defeat deduplication.
  pub fn declared(parameter: impl Into<String>) -> Self {
    Self {
      parameter: parameter.into(),
      substitute: None,
    }
  }

  pub fn parameter(&self) -> &str {
    &self.parameter
  }
}

impl fmt::Debug for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Rule")
      .field("parameter", &self.parameter)
      .field("implemented", &self.substitute.is_some())
      .finish()
  }
}

/// Apply `rules` to `parameters`, producing the normalized set used for
/// naming (not for execution logic).
///
/// Substitutes read the original values, so no rule observes another's
/// output.
pub fn normalize(parameters: &Parameters, rules: &[Rule]) -> Result<Parameters, TaskError> {
  let mut normalized = parameters.clone();
  for rule in rules {
    if !parameters.contains(&rule.parameter) {
      continue;
    }
    match &rule.substitute {
      Some(substitute) => {
        normalized.insert(rule.parameter.clone(), substitute(parameters)?);
      }
      None => {
        return Err(TaskError::MissingCapability {
          parameter: rule.parameter.clone(),
        });
      }
    }
  }
  Ok(normalized)
}

/// Rule mapping a date-valued parameter to the first day of its month.
///
/// With this rule a task parameterized by an arbitrary calendar date
/// reports the same output for every day of a single month, so a month of
/// daily invocations reuses one result.
pub fn first_of_month(parameter: impl Into<String>) -> Rule {
  let name = parameter.into();
  let key = name.clone();
  Rule::new(name, move |params| match params.get(&key) {
    Some(ParamValue::Date(d)) => {
      let first = d.with_day(1).expect("day 1 exists in every month");
      Ok(ParamValue::Date(first))
    }
    Some(other) => Err(TaskError::Misconfigured(format!(
      "parameter '{key}' must be a date, got '{other}'"
    ))),
    None => Err(TaskError::MissingCapability { parameter: key.clone() }),
  })
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_days_of_one_month_collapse() {
    let rules = [first_of_month("date")];
    let a = Parameters::new().with("date", date(2020, 1, 5)).with("kind", "full");
    let b = Parameters::new().with("date", date(2020, 1, 20)).with("kind", "full");

    let na = normalize(&a, &rules).unwrap();
    let nb = normalize(&b, &rules).unwrap();
    assert_eq!(na, nb);
    assert_eq!(na.date("date"), Some(date(2020, 1, 1)));
  }

  #[test]
  fn test_distinct_months_stay_distinct() {
    let rules = [first_of_month("date")];
    let jan = Parameters::new().with("date", date(2020, 1, 31));
    let feb = Parameters::new().with("date", date(2020, 2, 1));

    assert_ne!(normalize(&jan, &rules).unwrap(), normalize(&feb, &rules).unwrap());
  }

  #[test]
  fn test_substitute_is_idempotent() {
    let rules = [first_of_month("date")];
    let params = Parameters::new().with("date", date(2021, 7, 19));

    let once = normalize(&params, &rules).unwrap();
    let twice = normalize(&once, &rules).unwrap();
    assert_eq!(once, twice);
  }

  #[test]
  fn test_declared_rule_without_implementation_fails_fast() {
    let rules = [Rule::declared("date")];
    let params = Parameters::new().with("date", date(2020, 1, 5));

    let err = normalize(&params, &rules).unwrap_err();
    assert!(matches!(err, TaskError::MissingCapability { parameter } if parameter == "date"));
  }

  #[test]
  fn test_rule_for_absent_parameter_is_skipped() {
    // Even a declared-only rule is inert while its parameter is absent.
    let rules = [Rule::declared("date"), first_of_month("begin")];
    let params = Parameters::new().with("name", "x");

    let normalized = normalize(&params, &rules).unwrap();
    assert_eq!(normalized, params);
  }

  #[test]
  fn test_substitutes_read_original_values() {
    // Both rules see the raw input, not each other's output.
    let rules = [
      Rule::new("a", |p| match p.get("a") {
        Some(ParamValue::Int(n)) => Ok(ParamValue::Int(n + 1)),
        _ => Ok(ParamValue::Int(0)),
      }),
      Rule::new("b", |p| match p.get("a") {
        Some(value) => Ok(value.clone()),
        None => Ok(ParamValue::Int(-1)),
      }),
    ];
    let params = Parameters::new().with("a", 1i64).with("b", 9i64);

    let normalized = normalize(&params, &rules).unwrap();
    assert_eq!(normalized.get("a"), Some(&ParamValue::Int(2)));
    assert_eq!(normalized.get("b"), Some(&ParamValue::Int(1)));
  }
}
