//! Projection profiles — the named, ordered field subsets each endpoint
//! emits.
//!
//! The per-endpoint differences live in one table ([`Profile::fields`]) so
//! drift between endpoint shapes stays visible and testable instead of
//! being copy-pasted into each handler. Output member order is the declared
//! order of the profile, never alphabetical; consumers rely on it.

use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{MapAccess, Visitor},
  ser::SerializeMap,
};
use serde_json::Value;

use crate::record::{NameMeta, PersonRecord};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// A projectable output attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  LoginName,
  FirstName,
  LastName,
  PreferredName,
  PreferredPronouns,
  JobTitle,
  WorkingTitle,
  Department,
  DepartmentCode,
  JobCategories,
  OfficePhone,
  Email,
  Building,
  Office,
  MailStop,
  Website,
  LabGroupSite,
  Description,
  Education,
  ResearchStatement,
  OtherInfo,
  Photo,
  Vita,
  PrivacyFlag,
  UpdatedAt,
}

impl Field {
  /// The JSON member key this field is emitted under.
  pub fn key(self) -> &'static str {
    match self {
      Self::LoginName => "login_name",
      Self::FirstName => "first_name",
      Self::LastName => "last_name",
      Self::PreferredName => "preferred_name",
      Self::PreferredPronouns => "preferred_pronouns",
      Self::JobTitle => "job_title",
      Self::WorkingTitle => "working_title",
      Self::Department => "department",
      Self::DepartmentCode => "department_code",
      Self::JobCategories => "job_categories",
      Self::OfficePhone => "office_phone",
      Self::Email => "email",
      Self::Building => "building",
      Self::Office => "office",
      Self::MailStop => "mail_stop",
      Self::Website => "website",
      Self::LabGroupSite => "lab_group_site",
      Self::Description => "description",
      Self::Education => "education",
      Self::ResearchStatement => "research_statement",
      Self::OtherInfo => "other_info",
      Self::Photo => "photo",
      Self::Vita => "vita",
      Self::PrivacyFlag => "privacy_flag",
      Self::UpdatedAt => "updated_at",
    }
  }

  /// Extract this field's value from a record and its joined name
  /// metadata. First/last name come from the side store; missing metadata
  /// projects as null (the recoverable-integrity path).
  fn extract(self, record: &PersonRecord, names: Option<&NameMeta>) -> Value {
    fn opt(value: &Option<String>) -> Value {
      match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
      }
    }

    match self {
      Self::LoginName => Value::String(record.login_name.clone()),
      Self::FirstName => match names {
        Some(n) => Value::String(n.first_name.clone()),
        None => Value::Null,
      },
      Self::LastName => match names {
        Some(n) => Value::String(n.last_name.clone()),
        None => Value::Null,
      },
      Self::PreferredName => opt(&record.preferred_name),
      Self::PreferredPronouns => opt(&record.preferred_pronouns),
      Self::JobTitle => Value::String(record.job_title.clone()),
      Self::WorkingTitle => opt(&record.working_title),
      Self::Department => Value::String(record.department.clone()),
      Self::DepartmentCode => Value::String(record.department_code.clone()),
      Self::JobCategories => Value::Array(
        record
          .job_categories
          .iter()
          .cloned()
          .map(Value::String)
          .collect(),
      ),
      Self::OfficePhone => Value::String(record.office_phone.clone()),
      Self::Email => opt(&record.email),
      Self::Building => Value::String(record.building.clone()),
      Self::Office => opt(&record.office),
      Self::MailStop => Value::String(record.mail_stop.clone()),
      Self::Website => opt(&record.website),
      Self::LabGroupSite => opt(&record.lab_group_site),
      Self::Description => opt(&record.description),
      Self::Education => opt(&record.education),
      Self::ResearchStatement => opt(&record.research_statement),
      Self::OtherInfo => opt(&record.other_info),
      Self::Photo => opt(&record.photo),
      Self::Vita => opt(&record.vita),
      Self::PrivacyFlag => Value::Bool(record.privacy_flag),
      Self::UpdatedAt => Value::String(record.updated_at.to_rfc3339()),
    }
  }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// Named projection profile; one per endpoint output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
  /// Free-text search results.
  SearchSummary,
  /// Department-code listing.
  DepartmentSummary,
  /// Department + job-category listing.
  CategorySummary,
  /// Single-record lookup; every attribute, including the privacy flag
  /// itself.
  Detail,
}

impl Profile {
  /// The ordered field list for this profile. Declared order is output
  /// order.
  pub fn fields(self) -> &'static [Field] {
    use Field::*;
    match self {
      Self::SearchSummary => &[
        LoginName,
        FirstName,
        LastName,
        PreferredName,
        JobTitle,
        OfficePhone,
        Department,
        MailStop,
        Building,
        Photo,
      ],
      Self::DepartmentSummary => &[
        LoginName,
        FirstName,
        LastName,
        PreferredName,
        JobTitle,
        Department,
        Building,
        Photo,
      ],
      Self::CategorySummary => &[
        LoginName,
        FirstName,
        LastName,
        PreferredName,
        JobTitle,
        OfficePhone,
        Department,
        MailStop,
        Building,
      ],
      Self::Detail => &[
        LoginName,
        FirstName,
        LastName,
        PreferredName,
        PreferredPronouns,
        Website,
        JobTitle,
        WorkingTitle,
        Department,
        DepartmentCode,
        JobCategories,
        OfficePhone,
        Email,
        Building,
        Office,
        MailStop,
        LabGroupSite,
        Description,
        Education,
        ResearchStatement,
        OtherInfo,
        Photo,
        Vita,
        PrivacyFlag,
        UpdatedAt,
      ],
    }
  }
}

/// Project a visible record through `profile`.
pub fn project(
  record: &PersonRecord,
  names: Option<&NameMeta>,
  profile: Profile,
) -> ProjectedRecord {
  ProjectedRecord {
    fields: profile
      .fields()
      .iter()
      .map(|f| (f.key().to_owned(), f.extract(record, names)))
      .collect(),
  }
}

// ─── Projected record ────────────────────────────────────────────────────────

/// A projected record: ordered key/value pairs, serialised as a JSON object
/// whose member order is the profile's declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
  fields: Vec<(String, Value)>,
}

impl ProjectedRecord {
  pub fn fields(&self) -> &[(String, Value)] {
    &self.fields
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.fields.iter().map(|(k, _)| k.as_str())
  }
}

impl Serialize for ProjectedRecord {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.fields.len()))?;
    for (k, v) in &self.fields {
      map.serialize_entry(k, v)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for ProjectedRecord {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct PairVisitor;

    impl<'de> Visitor<'de> for PairVisitor {
      type Value = ProjectedRecord;

      fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a JSON object")
      }

      // Collect entries in encounter order; a plain map type would lose it.
      fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
      ) -> Result<Self::Value, A::Error> {
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
          fields.push((key, value));
        }
        Ok(ProjectedRecord { fields })
      }
    }

    deserializer.deserialize_map(PairVisitor)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;

  fn record() -> PersonRecord {
    PersonRecord {
      id:                 Uuid::new_v4(),
      login_name:         "jsmith".into(),
      name_search:        "jane smith".into(),
      preferred_name:     Some("Janie".into()),
      preferred_pronouns: Some("she/her".into()),
      department:         "Biology".into(),
      department_code:    "42".into(),
      job_title:          "Research Associate".into(),
      working_title:      None,
      job_categories:     vec!["Research Staff".into()],
      building:           "Redfield".into(),
      office:             Some("2-14".into()),
      mail_stop:          "MS-32".into(),
      office_phone:       "x2345".into(),
      email:              Some("jsmith@example.edu".into()),
      website:            None,
      lab_group_site:     None,
      description:        Some("Studies plankton.".into()),
      education:          None,
      research_statement: None,
      other_info:         None,
      photo:              Some("https://cdn.example.edu/jsmith.jpg".into()),
      vita:               None,
      privacy_flag:       false,
      updated_at:         Utc::now(),
    }
  }

  fn names() -> NameMeta {
    NameMeta { first_name: "Jane".into(), last_name: "Smith".into() }
  }

  #[test]
  fn summary_emits_declared_fields_in_declared_order() {
    let projected = project(&record(), Some(&names()), Profile::SearchSummary);
    let keys: Vec<&str> = projected.keys().collect();
    assert_eq!(keys, vec![
      "login_name",
      "first_name",
      "last_name",
      "preferred_name",
      "job_title",
      "office_phone",
      "department",
      "mail_stop",
      "building",
      "photo",
    ]);
  }

  #[test]
  fn detail_includes_privacy_flag_and_profile_content() {
    let projected = project(&record(), Some(&names()), Profile::Detail);
    assert_eq!(projected.get("privacy_flag"), Some(&Value::Bool(false)));
    assert_eq!(
      projected.get("description"),
      Some(&Value::String("Studies plankton.".into()))
    );
    assert!(projected.get("research_statement").is_some());
  }

  #[test]
  fn department_summary_omits_phone_and_mail_stop() {
    let projected =
      project(&record(), Some(&names()), Profile::DepartmentSummary);
    assert!(projected.get("office_phone").is_none());
    assert!(projected.get("mail_stop").is_none());
    assert!(projected.get("building").is_some());
  }

  #[test]
  fn missing_name_metadata_projects_as_null() {
    let projected = project(&record(), None, Profile::SearchSummary);
    assert_eq!(projected.get("first_name"), Some(&Value::Null));
    assert_eq!(projected.get("last_name"), Some(&Value::Null));
    // Record-local fields are unaffected.
    assert_eq!(
      projected.get("login_name"),
      Some(&Value::String("jsmith".into()))
    );
  }

  #[test]
  fn encode_decode_round_trip_preserves_values_and_order() {
    let projected = project(&record(), Some(&names()), Profile::SearchSummary);
    let json = serde_json::to_string(&projected).unwrap();
    let decoded: ProjectedRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, projected);
  }
}
