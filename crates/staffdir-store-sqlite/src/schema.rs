//! SQL schema for the directory store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per directory entry. Written only by the admin sync workflow;
-- the query service never mutates it.
CREATE TABLE IF NOT EXISTS people (
    person_id          TEXT PRIMARY KEY,
    login_name         TEXT NOT NULL UNIQUE,
    name_search        TEXT NOT NULL DEFAULT '',  -- combined name/keyword haystack
    preferred_name     TEXT,
    preferred_pronouns TEXT,
    department         TEXT NOT NULL DEFAULT '',
    department_code    TEXT NOT NULL DEFAULT '',  -- numeric-shaped string
    job_title          TEXT NOT NULL DEFAULT '',
    working_title      TEXT,
    job_categories     TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    building           TEXT NOT NULL DEFAULT '',
    office             TEXT,
    mail_stop          TEXT NOT NULL DEFAULT '',
    office_phone       TEXT NOT NULL DEFAULT '',
    email              TEXT,
    website            TEXT,
    lab_group_site     TEXT,
    description        TEXT,
    education          TEXT,
    research_statement TEXT,
    other_info         TEXT,
    photo              TEXT,
    vita               TEXT,
    privacy_flag       INTEGER NOT NULL DEFAULT 0,
    updated_at         TEXT NOT NULL              -- ISO 8601 UTC
);

-- First/last name live in a parallel metadata table keyed by person_id,
-- mirroring the upstream per-user metadata store. Joined explicitly on
-- read; a people row without a name_meta row is possible.
CREATE TABLE IF NOT EXISTS name_meta (
    person_id  TEXT PRIMARY KEY REFERENCES people(person_id),
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS people_department_code_idx ON people(department_code);
CREATE INDEX IF NOT EXISTS people_department_idx      ON people(department);

PRAGMA user_version = 1;
";
