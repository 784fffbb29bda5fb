//! `PersonRecord` — one directory entry — and the name metadata that lives
//! in a parallel store.
//!
//! Records are created and updated entirely by the administrative sync
//! workflow; this crate only ever reads them. First and last name are *not*
//! stored on the record: they live in a separate metadata store keyed by
//! `id` and must be joined explicitly (see [`NameMeta`] and
//! [`crate::store::DirectoryStore::name_meta`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single directory entry.
///
/// String fields that participate in substring matching (`department`,
/// `job_title`, `building`, `mail_stop`, `office_phone`, `department_code`)
/// are plain `String`s where empty means "not set". Purely displayed fields
/// are `Option<String>` and project as JSON null when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
  /// Opaque stable identifier; the key into the name-metadata store.
  pub id:                 Uuid,
  /// Unique; the detail-lookup key.
  pub login_name:         String,
  /// Combined, normalised name-and-keyword haystack the free-text search
  /// term is matched against. Populated by the admin workflow alongside
  /// the name metadata.
  pub name_search:        String,
  pub preferred_name:     Option<String>,
  pub preferred_pronouns: Option<String>,
  pub department:         String,
  /// Numeric-shaped string; matched by exact equality.
  pub department_code:    String,
  pub job_title:          String,
  pub working_title:      Option<String>,
  /// Multi-value; matched by substring against each entry.
  pub job_categories:     Vec<String>,
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
  /// Reference/URL, not inline content.
  pub other_info:         Option<String>,
  pub photo:              Option<String>,
  pub vita:               Option<String>,
  /// When true the record is excluded from every directory response.
  pub privacy_flag:       bool,
  /// Stamped by the admin workflow on each sync; read-only here.
  pub updated_at:         DateTime<Utc>,
}

/// First/last name pair from the side metadata store, joined by record id.
///
/// The upstream data model keeps these in a separate per-user metadata
/// table, so a missing row is possible; callers treat that as a recoverable
/// per-record gap, not a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMeta {
  pub first_name: String,
  pub last_name:  String,
}
