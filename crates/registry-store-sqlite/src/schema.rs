//! SQL schema for the registry SQLite store.
//!
//! Executed once at connection startup. Every statement is idempotent, so
//! reopening an existing database is safe.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- ── Reference tables ──────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS countries (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE,
    code  TEXT UNIQUE CHECK (length(code) <= 3)
);

CREATE TABLE IF NOT EXISTS places (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    country_id  INTEGER REFERENCES countries(id)
);

CREATE TABLE IF NOT EXISTS constituencies (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    code  TEXT UNIQUE CHECK (length(code) <= 10)
);

CREATE TABLE IF NOT EXISTS citizen_status (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    code         TEXT NOT NULL UNIQUE CHECK (length(code) <= 10),
    description  TEXT
);

CREATE TABLE IF NOT EXISTS first_names (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    gender  TEXT CHECK (gender IN ('M', 'F'))
);

CREATE TABLE IF NOT EXISTS surnames (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS addresses (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    address          TEXT NOT NULL,
    place_id         INTEGER REFERENCES places(id),
    postcode         TEXT,
    constituency_id  INTEGER REFERENCES constituencies(id)
);

-- ── Civil register ────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS citizens (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    status_id      INTEGER REFERENCES citizen_status(id),
    surname_id     INTEGER REFERENCES surnames(id),
    first_name_id  INTEGER REFERENCES first_names(id),
    gender         TEXT CHECK (gender IN ('M', 'F')),
    died           TEXT              -- ISO date; NULL while alive
);

CREATE TABLE IF NOT EXISTS births (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    citizen_id  INTEGER NOT NULL UNIQUE REFERENCES citizens(id),
    birth_date  TEXT NOT NULL,
    mother_id   INTEGER REFERENCES citizens(id),
    father_id   INTEGER REFERENCES citizens(id)
);

CREATE TABLE IF NOT EXISTS marriages (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    person1_id     INTEGER NOT NULL REFERENCES citizens(id),
    person2_id     INTEGER NOT NULL REFERENCES citizens(id),
    marriage_date  TEXT NOT NULL,
    divorce_date   TEXT
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS citizen_changes (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    citizen_id   INTEGER NOT NULL REFERENCES citizens(id),
    change_date  TEXT NOT NULL,
    details      TEXT              -- JSON, stored verbatim
);

-- ── Electoral roll ────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS voters (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    citizen_id         INTEGER NOT NULL UNIQUE REFERENCES citizens(id),
    address_id         INTEGER NOT NULL REFERENCES addresses(id),
    open_register      INTEGER NOT NULL DEFAULT 0,
    registration_date  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS places_country_idx          ON places(country_id);
CREATE INDEX IF NOT EXISTS addresses_place_idx         ON addresses(place_id);
CREATE INDEX IF NOT EXISTS addresses_constituency_idx  ON addresses(constituency_id);
CREATE INDEX IF NOT EXISTS addresses_postcode_idx      ON addresses(postcode);
CREATE INDEX IF NOT EXISTS citizens_surname_idx        ON citizens(surname_id);
CREATE INDEX IF NOT EXISTS citizens_first_name_idx     ON citizens(first_name_id);
CREATE INDEX IF NOT EXISTS marriages_person1_idx       ON marriages(person1_id);
CREATE INDEX IF NOT EXISTS marriages_person2_idx       ON marriages(person2_id);
CREATE INDEX IF NOT EXISTS citizen_changes_citizen_idx ON citizen_changes(citizen_id);
CREATE INDEX IF NOT EXISTS voters_address_idx          ON voters(address_id);
CREATE INDEX IF NOT EXISTS voters_registration_idx     ON voters(registration_date);

PRAGMA user_version = 1;
";
