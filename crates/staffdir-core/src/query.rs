//! Query construction and evaluation.
//!
//! A [`DirectoryQuery`] is an AND-combined list of typed field matchers.
//! Caller input is carried as opaque parameter values — it is never
//! assembled into a query string. Backends bind each value as a statement
//! parameter; [`DirectoryQuery::matches`] evaluates the same semantics
//! in memory.

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  record::PersonRecord,
};

// ─── Fields and operators ────────────────────────────────────────────────────

/// A searchable field of [`PersonRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
  /// Free-text term, matched against the combined `name_search` haystack.
  Term,
  Department,
  JobTitle,
  Building,
  MailStop,
  OfficePhone,
  /// Matches if any entry of `job_categories` contains the value.
  JobCategory,
  DepartmentCode,
  LoginName,
}

impl SearchField {
  /// The operator this field is matched with: identifiers are exact,
  /// everything else is case-insensitive substring.
  pub fn op(self) -> MatchOp {
    match self {
      Self::DepartmentCode | Self::LoginName => MatchOp::Equals,
      _ => MatchOp::Contains,
    }
  }
}

/// How a matcher compares its value against a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOp {
  /// Case-insensitive "contains".
  Contains,
  /// Exact equality.
  Equals,
}

impl MatchOp {
  pub fn eval(self, haystack: &str, needle: &str) -> bool {
    match self {
      Self::Contains => haystack.to_lowercase().contains(&needle.to_lowercase()),
      Self::Equals => haystack == needle,
    }
  }
}

// ─── Matchers ────────────────────────────────────────────────────────────────

/// One field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatcher {
  pub field: SearchField,
  pub op:    MatchOp,
  pub value: String,
}

impl FieldMatcher {
  /// Evaluate this constraint against a record.
  pub fn matches(&self, record: &PersonRecord) -> bool {
    let haystack: &str = match self.field {
      SearchField::Term => &record.name_search,
      SearchField::Department => &record.department,
      SearchField::JobTitle => &record.job_title,
      SearchField::Building => &record.building,
      SearchField::MailStop => &record.mail_stop,
      SearchField::OfficePhone => &record.office_phone,
      SearchField::JobCategory => {
        // Multi-valued: any category may satisfy the constraint.
        return record
          .job_categories
          .iter()
          .any(|c| self.op.eval(c, &self.value));
      }
      SearchField::DepartmentCode => &record.department_code,
      SearchField::LoginName => &record.login_name,
    };
    self.op.eval(haystack, &self.value)
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// An AND-combined set of field matchers. An empty query matches every
/// record; adding matchers only ever narrows the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
  matchers: Vec<FieldMatcher>,
}

impl DirectoryQuery {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a constraint on `field` with the field's canonical operator.
  ///
  /// Empty input means "no constraint on this field" (a blank search form
  /// field) and is dropped rather than matched literally.
  pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
    let value = value.into();
    if !value.is_empty() {
      self.matchers.push(FieldMatcher { field, op: field.op(), value });
    }
    self
  }

  pub fn matchers(&self) -> &[FieldMatcher] {
    &self.matchers
  }

  /// Evaluate the query against a record in memory. Backends that compile
  /// the query to their own predicate language must preserve these
  /// semantics.
  pub fn matches(&self, record: &PersonRecord) -> bool {
    self.matchers.iter().all(|m| m.matches(record))
  }
}

// ─── Department code ─────────────────────────────────────────────────────────

/// A validated, numeric-shaped department code.
///
/// Parsing rejects anything non-numeric before it can reach the query
/// builder, so the department-code listing never sees an invalid shape.
/// Constructible only through [`DepartmentCode::parse`] or from an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCode(String);

impl DepartmentCode {
  pub fn parse(input: &str) -> Result<Self> {
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(input.to_owned()))
    } else {
      Err(Error::NonNumericDepartmentCode(input.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<u32> for DepartmentCode {
  fn from(code: u32) -> Self {
    Self(code.to_string())
  }
}

impl std::str::FromStr for DepartmentCode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl std::fmt::Display for DepartmentCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
