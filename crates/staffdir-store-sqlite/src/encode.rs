//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, job categories as compact
//! JSON arrays, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use staffdir_core::record::PersonRecord;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Job categories ──────────────────────────────────────────────────────────

pub fn encode_categories(categories: &[String]) -> Result<String> {
  Ok(serde_json::to_string(categories)?)
}

pub fn decode_categories(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub person_id:          String,
  pub login_name:         String,
  pub name_search:        String,
  pub preferred_name:     Option<String>,
  pub preferred_pronouns: Option<String>,
  pub department:         String,
  pub department_code:    String,
  pub job_title:          String,
  pub working_title:      Option<String>,
  pub job_categories:     String,
  pub building:           String,
  pub office:             Option<String>,
  pub mail_stop:          String,
  pub office_phone:       String,
  pub email:              Option<String>,
  pub website:            Option<String>,
  pub lab_group_site:     Option<String>,
  pub description:        Option<String>,
  pub education:          Option<String>,
  pub research_statement: Option<String>,
  pub other_info:         Option<String>,
  pub photo:              Option<String>,
  pub vita:               Option<String>,
  pub privacy_flag:       bool,
  pub updated_at:         String,
}

impl RawPerson {
  pub fn into_record(self) -> Result<PersonRecord> {
    Ok(PersonRecord {
      id:                 decode_uuid(&self.person_id)?,
      login_name:         self.login_name,
      name_search:        self.name_search,
      preferred_name:     self.preferred_name,
      preferred_pronouns: self.preferred_pronouns,
      department:         self.department,
      department_code:    self.department_code,
      job_title:          self.job_title,
      working_title:      self.working_title,
      job_categories:     decode_categories(&self.job_categories)?,
      building:           self.building,
      office:             self.office,
      mail_stop:          self.mail_stop,
      office_phone:       self.office_phone,
      email:              self.email,
      website:            self.website,
      lab_group_site:     self.lab_group_site,
      description:        self.description,
      education:          self.education,
      research_statement: self.research_statement,
      other_info:         self.other_info,
      photo:              self.photo,
      vita:               self.vita,
      privacy_flag:       self.privacy_flag,
      updated_at:         decode_dt(&self.updated_at)?,
    })
  }
}
