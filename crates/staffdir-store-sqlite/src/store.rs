//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use staffdir_core::{
  query::{DirectoryQuery, MatchOp, SearchField},
  record::{NameMeta, PersonRecord},
  store::DirectoryStore,
};

use crate::{
  Result,
  encode::{RawPerson, encode_categories, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const PERSON_COLUMNS: &str = "person_id, login_name, name_search, \
   preferred_name, preferred_pronouns, department, department_code, \
   job_title, working_title, job_categories, building, office, mail_stop, \
   office_phone, email, website, lab_group_site, description, education, \
   research_statement, other_info, photo, vita, privacy_flag, updated_at";

/// Column a search field is matched against. `Term` searches the stored
/// name/keyword haystack; `JobCategory` substring-matches the serialised
/// JSON array.
fn column_for(field: SearchField) -> &'static str {
  match field {
    SearchField::Term => "name_search",
    SearchField::Department => "department",
    SearchField::JobTitle => "job_title",
    SearchField::Building => "building",
    SearchField::MailStop => "mail_stop",
    SearchField::OfficePhone => "office_phone",
    SearchField::JobCategory => "job_categories",
    SearchField::DepartmentCode => "department_code",
    SearchField::LoginName => "login_name",
  }
}

/// Escape `%`, `_`, and the escape character itself so a bound `LIKE`
/// pattern matches them literally, as the in-memory evaluation does.
fn escape_like(value: &str) -> String {
  value
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_")
}

fn raw_person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:          row.get(0)?,
    login_name:         row.get(1)?,
    name_search:        row.get(2)?,
    preferred_name:     row.get(3)?,
    preferred_pronouns: row.get(4)?,
    department:         row.get(5)?,
    department_code:    row.get(6)?,
    job_title:          row.get(7)?,
    working_title:      row.get(8)?,
    job_categories:     row.get(9)?,
    building:           row.get(10)?,
    office:             row.get(11)?,
    mail_stop:          row.get(12)?,
    office_phone:       row.get(13)?,
    email:              row.get(14)?,
    website:            row.get(15)?,
    lab_group_site:     row.get(16)?,
    description:        row.get(17)?,
    education:          row.get(18)?,
    research_statement: row.get(19)?,
    other_info:         row.get(20)?,
    photo:              row.get(21)?,
    vita:               row.get(22)?,
    privacy_flag:       row.get(23)?,
    updated_at:         row.get(24)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A directory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Ingestion surface ─────────────────────────────────────────────────

  /// Insert or replace a record. Used by the admin sync workflow and by
  /// tests; not part of the read-only [`DirectoryStore`] trait.
  pub async fn upsert_person(&self, record: &PersonRecord) -> Result<()> {
    let id_str         = encode_uuid(record.id);
    let categories_str = encode_categories(&record.job_categories)?;
    let updated_at_str = encode_dt(record.updated_at);
    let record         = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO people (
             person_id, login_name, name_search,
             preferred_name, preferred_pronouns, department, department_code,
             job_title, working_title, job_categories, building, office,
             mail_stop, office_phone, email, website, lab_group_site,
             description, education, research_statement, other_info, photo,
             vita, privacy_flag, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24,
                     ?25)",
          rusqlite::params![
            id_str,
            record.login_name,
            record.name_search,
            record.preferred_name,
            record.preferred_pronouns,
            record.department,
            record.department_code,
            record.job_title,
            record.working_title,
            categories_str,
            record.building,
            record.office,
            record.mail_stop,
            record.office_phone,
            record.email,
            record.website,
            record.lab_group_site,
            record.description,
            record.education,
            record.research_statement,
            record.other_info,
            record.photo,
            record.vita,
            record.privacy_flag,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or replace the name-metadata row for a record id.
  pub async fn upsert_name_meta(
    &self,
    id: Uuid,
    first_name: &str,
    last_name: &str,
  ) -> Result<()> {
    let id_str = encode_uuid(id);
    let first = first_name.to_owned();
    let last = last_name.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO name_meta (person_id, first_name, last_name)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, first, last],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = crate::Error;

  async fn find(&self, query: &DirectoryQuery) -> Result<Vec<PersonRecord>> {
    // Compile each matcher to a parameterised condition. Values are always
    // bound, never concatenated into the SQL text. LIKE metacharacters in
    // the value are escaped so they match literally. SQLite folds case for
    // ASCII only (its built-in lower() has the same limit), so non-ASCII
    // input diverges from the Unicode-aware in-memory evaluation.
    let mut conds: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();
    for matcher in query.matchers() {
      let column = column_for(matcher.field);
      match matcher.op {
        MatchOp::Contains => {
          conds.push(format!("{column} LIKE ?{} ESCAPE '\\'", params.len() + 1));
          params.push(format!("%{}%", escape_like(&matcher.value)));
        }
        MatchOp::Equals => {
          conds.push(format!("{column} = ?{}", params.len() + 1));
          params.push(matcher.value.clone());
        }
      }
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };
    let sql = format!("SELECT {PERSON_COLUMNS} FROM people {where_clause}");

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), raw_person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_record).collect()
  }

  async fn name_meta(&self, id: Uuid) -> Result<Option<NameMeta>> {
    let id_str = encode_uuid(id);

    let meta: Option<NameMeta> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT first_name, last_name FROM name_meta WHERE person_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(NameMeta {
                  first_name: row.get(0)?,
                  last_name:  row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(meta)
  }
}
