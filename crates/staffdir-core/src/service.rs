//! [`Directory`] — the query/filter/projection pipeline behind the four
//! directory operations.
//!
//! Each operation builds a [`DirectoryQuery`], retrieves candidates from
//! the store, drops private records, joins the name metadata, sorts by the
//! joined last name, and projects through the endpoint's profile. The
//! pipeline is stateless; a `Directory` can serve any number of concurrent
//! requests.

use tracing::{debug, warn};

use crate::{
  Error, Result,
  projection::{self, Profile, ProjectedRecord},
  query::{DepartmentCode, DirectoryQuery, SearchField},
  record::{NameMeta, PersonRecord},
  response::DirectoryResponse,
  store::DirectoryStore,
  visibility::{self, Origin},
};

/// Free-text search inputs, one per search form field. Empty fields impose
/// no constraint.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
  pub term:         String,
  pub department:   String,
  pub job_title:    String,
  pub building:     String,
  pub mail_stop:    String,
  pub office_phone: String,
}

/// The directory query service over a record repository `S`.
#[derive(Debug, Clone)]
pub struct Directory<S> {
  store: S,
}

impl<S: DirectoryStore> Directory<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Free-text search across the directory.
  pub async fn search(
    &self,
    request: SearchRequest,
    origin: Origin,
  ) -> Result<DirectoryResponse> {
    let query = DirectoryQuery::new()
      .with(SearchField::Term, request.term)
      .with(SearchField::Department, request.department)
      .with(SearchField::JobTitle, request.job_title)
      .with(SearchField::Building, request.building)
      .with(SearchField::MailStop, request.mail_stop)
      .with(SearchField::OfficePhone, request.office_phone);

    // Both origins currently receive the same summary shape; the split is
    // the seam where an external-origin redaction profile would plug in.
    let profile = match origin {
      Origin::Trusted => Profile::SearchSummary,
      Origin::External => Profile::SearchSummary,
    };
    self.run(query, profile).await
  }

  /// Single-record lookup by login name. Returns a sequence of length zero
  /// or one, in the same envelope as the list operations.
  pub async fn get_by_login(
    &self,
    login_name: &str,
    origin: Origin,
  ) -> Result<DirectoryResponse> {
    let query = DirectoryQuery::new().with(SearchField::LoginName, login_name);

    let profile = match origin {
      Origin::Trusted => Profile::Detail,
      Origin::External => Profile::Detail,
    };
    self.run(query, profile).await
  }

  /// Everyone in the department with the given code.
  ///
  /// Takes the already-validated [`DepartmentCode`]; non-numeric input is
  /// rejected at the route layer, before the query builder runs.
  pub async fn list_by_department_code(
    &self,
    code: &DepartmentCode,
  ) -> Result<DirectoryResponse> {
    let query =
      DirectoryQuery::new().with(SearchField::DepartmentCode, code.as_str());
    self.run(query, Profile::DepartmentSummary).await
  }

  /// Everyone in `department` whose job categories match `category`.
  pub async fn list_by_department_and_category(
    &self,
    department: &str,
    category: &str,
  ) -> Result<DirectoryResponse> {
    let query = DirectoryQuery::new()
      .with(SearchField::Department, department)
      .with(SearchField::JobCategory, category);
    self.run(query, Profile::CategorySummary).await
  }

  /// The shared pipeline: retrieve, filter, join names, sort, project.
  async fn run(
    &self,
    query: DirectoryQuery,
    profile: Profile,
  ) -> Result<DirectoryResponse> {
    let candidates = self
      .store
      .find(&query)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    debug!(candidates = candidates.len(), ?profile, "retrieved candidate set");

    let mut joined: Vec<(PersonRecord, Option<NameMeta>)> =
      Vec::with_capacity(candidates.len());
    for record in candidates.into_iter().filter(visibility::is_visible) {
      let names = self
        .store
        .name_meta(record.id)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?;
      if names.is_none() {
        // Null-fill the name fields rather than failing the response.
        warn!(
          id = %record.id,
          login_name = %record.login_name,
          "record has no name metadata"
        );
      }
      joined.push((record, names));
    }

    // The sort key lives in the side metadata store, hence the join above.
    // Case-folded so a lowercase surname does not sort after the whole
    // uppercase range.
    joined.sort_by(|a, b| {
      last_name(&a.1)
        .to_lowercase()
        .cmp(&last_name(&b.1).to_lowercase())
    });

    let records: Vec<ProjectedRecord> = joined
      .iter()
      .map(|(record, names)| projection::project(record, names.as_ref(), profile))
      .collect();
    Ok(DirectoryResponse::from_records(records))
  }
}

fn last_name(names: &Option<NameMeta>) -> &str {
  names.as_ref().map(|n| n.last_name.as_str()).unwrap_or("")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{collections::HashMap, convert::Infallible};

  use chrono::Utc;
  use serde_json::Value;
  use uuid::Uuid;

  use super::*;

  /// Vec-backed store evaluating queries with [`DirectoryQuery::matches`].
  struct MemoryStore {
    records: Vec<PersonRecord>,
    names:   HashMap<Uuid, NameMeta>,
  }

  impl MemoryStore {
    fn new() -> Self {
      Self { records: Vec::new(), names: HashMap::new() }
    }

    fn add(&mut self, record: PersonRecord, first: &str, last: &str) {
      self
        .names
        .insert(record.id, NameMeta {
          first_name: first.into(),
          last_name:  last.into(),
        });
      self.records.push(record);
    }

    /// Insert a record with no row in the name store.
    fn add_nameless(&mut self, record: PersonRecord) {
      self.records.push(record);
    }
  }

  impl DirectoryStore for MemoryStore {
    type Error = Infallible;

    async fn find(
      &self,
      query: &DirectoryQuery,
    ) -> Result<Vec<PersonRecord>, Infallible> {
      Ok(
        self
          .records
          .iter()
          .filter(|r| query.matches(r))
          .cloned()
          .collect(),
      )
    }

    async fn name_meta(&self, id: Uuid) -> Result<Option<NameMeta>, Infallible> {
      Ok(self.names.get(&id).cloned())
    }
  }

  fn person(login: &str, department: &str, code: &str) -> PersonRecord {
    PersonRecord {
      id:                 Uuid::new_v4(),
      login_name:         login.into(),
      name_search:        String::new(),
      preferred_name:     None,
      preferred_pronouns: None,
      department:         department.into(),
      department_code:    code.into(),
      job_title:          "Staff".into(),
      working_title:      None,
      job_categories:     vec![],
      building:           "Main".into(),
      office:             None,
      mail_stop:          "MS-1".into(),
      office_phone:       String::new(),
      email:              None,
      website:            None,
      lab_group_site:     None,
      description:        None,
      education:          None,
      research_statement: None,
      other_info:         None,
      photo:              None,
      vita:               None,
      privacy_flag:       false,
      updated_at:         Utc::now(),
    }
  }

  fn biology_fixture() -> Directory<MemoryStore> {
    let mut store = MemoryStore::new();

    let mut smith = person("jsmith", "Biology", "42");
    smith.name_search = "jane smith plankton".into();
    store.add(smith, "Jane", "Smith");

    let mut green = person("agreen", "Biology", "42");
    green.name_search = "alex green plankton".into();
    green.privacy_flag = true;
    store.add(green, "Alex", "Green");

    let mut adams = person("badams", "Biology", "42");
    adams.name_search = "bo adams benthic".into();
    store.add(adams, "Bo", "Adams");

    let chen = person("lchen", "Geology", "7");
    store.add(chen, "Li", "Chen");

    Directory::new(store)
  }

  fn logins(response: &DirectoryResponse) -> Vec<String> {
    response
      .records()
      .iter()
      .map(|r| match r.get("login_name") {
        Some(Value::String(s)) => s.clone(),
        other => panic!("login_name missing or not a string: {other:?}"),
      })
      .collect()
  }

  #[tokio::test]
  async fn private_records_never_appear_on_any_operation() {
    let directory = biology_fixture();

    for origin in [Origin::Trusted, Origin::External] {
      let by_search = directory
        .search(
          SearchRequest { term: "plankton".into(), ..Default::default() },
          origin,
        )
        .await
        .unwrap();
      assert!(!logins(&by_search).contains(&"agreen".to_string()));

      let by_login = directory.get_by_login("agreen", origin).await.unwrap();
      assert!(by_login.is_no_results());
    }

    let by_code = directory
      .list_by_department_code(&DepartmentCode::parse("42").unwrap())
      .await
      .unwrap();
    assert!(!logins(&by_code).contains(&"agreen".to_string()));
  }

  #[tokio::test]
  async fn department_code_scenario_returns_only_visible_in_name_order() {
    let directory = biology_fixture();

    let response = directory
      .list_by_department_code(&DepartmentCode::parse("42").unwrap())
      .await
      .unwrap();

    // Green is private; Adams sorts before Smith.
    assert_eq!(logins(&response), vec!["badams", "jsmith"]);
  }

  #[tokio::test]
  async fn results_are_ordered_by_joined_last_name() {
    let directory = biology_fixture();

    let response = directory
      .search(
        SearchRequest { department: "biology".into(), ..Default::default() },
        Origin::Trusted,
      )
      .await
      .unwrap();

    let last_names: Vec<String> = response
      .records()
      .iter()
      .map(|r| match r.get("last_name") {
        Some(Value::String(s)) => s.clone(),
        other => panic!("last_name missing: {other:?}"),
      })
      .collect();
    let mut sorted = last_names.clone();
    sorted.sort();
    assert_eq!(last_names, sorted);
  }

  #[tokio::test]
  async fn last_name_ordering_ignores_case() {
    let mut store = MemoryStore::new();
    store.add(person("s1", "Biology", "42"), "Sam", "Smith");
    store.add(person("d1", "Biology", "42"), "Dana", "deVries");
    store.add(person("a1", "Biology", "42"), "Ana", "Adams");
    let directory = Directory::new(store);

    let response = directory
      .list_by_department_code(&DepartmentCode::parse("42").unwrap())
      .await
      .unwrap();

    // "deVries" belongs between "Adams" and "Smith", not after them.
    assert_eq!(logins(&response), vec!["a1", "d1", "s1"]);
  }

  #[tokio::test]
  async fn adding_search_fields_never_widens_results() {
    let directory = biology_fixture();

    let broad = directory
      .search(
        SearchRequest { term: "plankton".into(), ..Default::default() },
        Origin::Trusted,
      )
      .await
      .unwrap();
    let narrow = directory
      .search(
        SearchRequest {
          term: "plankton".into(),
          department: "Biology".into(),
          mail_stop: "MS-1".into(),
          ..Default::default()
        },
        Origin::Trusted,
      )
      .await
      .unwrap();

    let broad_logins = logins(&broad);
    for login in logins(&narrow) {
      assert!(broad_logins.contains(&login));
    }
  }

  #[tokio::test]
  async fn get_by_login_returns_single_detail_element() {
    let directory = biology_fixture();

    let response = directory
      .get_by_login("jsmith", Origin::Trusted)
      .await
      .unwrap();
    assert_eq!(response.records().len(), 1);

    let detail = &response.records()[0];
    assert_eq!(detail.get("privacy_flag"), Some(&Value::Bool(false)));
    assert_eq!(
      detail.get("department_code"),
      Some(&Value::String("42".into()))
    );
  }

  #[tokio::test]
  async fn get_by_login_unknown_is_no_results() {
    let directory = biology_fixture();
    let response = directory
      .get_by_login("nobody", Origin::Trusted)
      .await
      .unwrap();
    assert!(response.is_no_results());
    assert_eq!(response.to_json().unwrap(), "null");
  }

  #[tokio::test]
  async fn origin_branches_yield_identical_payloads() {
    let directory = biology_fixture();

    let trusted = directory
      .get_by_login("jsmith", Origin::Trusted)
      .await
      .unwrap();
    let external = directory
      .get_by_login("jsmith", Origin::External)
      .await
      .unwrap();
    assert_eq!(trusted, external);
  }

  #[tokio::test]
  async fn department_code_string_and_integer_forms_are_equivalent() {
    let directory = biology_fixture();

    let from_str = directory
      .list_by_department_code(&DepartmentCode::parse("42").unwrap())
      .await
      .unwrap();
    let from_int = directory
      .list_by_department_code(&DepartmentCode::from(42u32))
      .await
      .unwrap();
    assert_eq!(from_str, from_int);
  }

  #[tokio::test]
  async fn missing_name_metadata_is_null_filled_not_fatal() {
    let mut store = MemoryStore::new();
    store.add_nameless(person("orphan", "Biology", "42"));
    let directory = Directory::new(store);

    let response = directory
      .list_by_department_code(&DepartmentCode::parse("42").unwrap())
      .await
      .unwrap();

    assert_eq!(logins(&response), vec!["orphan"]);
    assert_eq!(response.records()[0].get("last_name"), Some(&Value::Null));
  }

  #[tokio::test]
  async fn category_listing_requires_both_constraints() {
    let mut store = MemoryStore::new();

    let mut tech = person("tech1", "Biology", "42");
    tech.job_categories = vec!["Technical Staff".into()];
    store.add(tech, "Tess", "Nguyen");

    let mut faculty = person("fac1", "Biology", "42");
    faculty.job_categories = vec!["Faculty".into()];
    store.add(faculty, "Finn", "Okafor");

    let mut other_dept = person("tech2", "Geology", "7");
    other_dept.job_categories = vec!["Technical Staff".into()];
    store.add(other_dept, "Gus", "Ives");

    let directory = Directory::new(store);
    let response = directory
      .list_by_department_and_category("Biology", "technical")
      .await
      .unwrap();

    assert_eq!(logins(&response), vec!["tech1"]);
  }
}
