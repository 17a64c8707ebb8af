//! Table metadata tying each record type to its SQLite table.
//!
//! Every table has an integer `id` key followed by the columns listed in
//! [`SqlRecord::COLUMNS`]. Queries select `t.id` then those columns in order,
//! so [`SqlRecord::from_row`] reads the key at index 0 and the rest from 1.

use registry_core::{
  citizen::{Birth, Citizen, CitizenChange, Marriage},
  record::{Mutable, Record},
  reference::{
    Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname,
  },
  voter::Voter,
};
use rusqlite::{Row, types::Value};

use crate::{
  Result,
  encode::{
    date, date_column, flag, flag_column, gender, gender_column, int, json, json_column,
    opt_date, opt_date_column, opt_int, opt_text, text,
  },
};

pub trait SqlRecord: Record {
  const TABLE: &'static str;

  /// Non-key columns, in the order `from_row` and `insert_values` use.
  const COLUMNS: &'static [&'static str];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

  fn insert_values(input: &Self::New) -> Result<Vec<Value>>;
}

pub trait SqlMutable: SqlRecord + Mutable {
  /// Columns rewritten by a full update, in `update_values` order.
  const UPDATE_COLUMNS: &'static [&'static str] = Self::COLUMNS;

  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>>;
}

/// `t.id, t.a, t.b, ...` for a `SELECT` over `R::TABLE t`.
pub fn select_list<R: SqlRecord>() -> String {
  std::iter::once("id")
    .chain(R::COLUMNS.iter().copied())
    .map(|c| format!("t.{c}"))
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── Reference tables ────────────────────────────────────────────────────────

impl SqlRecord for Country {
  const TABLE: &'static str = "countries";
  const COLUMNS: &'static [&'static str] = &["name", "code"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)?, code: row.get(2)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![text(&input.name), opt_text(input.code.as_deref())])
  }
}

impl SqlMutable for Country {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Place {
  const TABLE: &'static str = "places";
  const COLUMNS: &'static [&'static str] = &["name", "country_id"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)?, country_id: row.get(2)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![text(&input.name), opt_int(input.country_id)])
  }
}

impl SqlMutable for Place {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Constituency {
  const TABLE: &'static str = "constituencies";
  const COLUMNS: &'static [&'static str] = &["name", "code"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)?, code: row.get(2)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![text(&input.name), opt_text(input.code.as_deref())])
  }
}

impl SqlMutable for Constituency {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for CitizenStatus {
  const TABLE: &'static str = "citizen_status";
  const COLUMNS: &'static [&'static str] = &["code", "description"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, code: row.get(1)?, description: row.get(2)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![text(&input.code), opt_text(input.description.as_deref())])
  }
}

impl SqlMutable for CitizenStatus {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for FirstName {
  const TABLE: &'static str = "first_names";
  const COLUMNS: &'static [&'static str] = &["name", "gender"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)?, gender: gender_column(row, 2)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![text(&input.name), gender(input.gender)])
  }
}

impl SqlMutable for FirstName {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Surname {
  const TABLE: &'static str = "surnames";
  const COLUMNS: &'static [&'static str] = &["name"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)? })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> { Ok(vec![text(&input.name)]) }
}

impl SqlMutable for Surname {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Address {
  const TABLE: &'static str = "addresses";
  const COLUMNS: &'static [&'static str] =
    &["address", "place_id", "postcode", "constituency_id"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      address:         row.get(1)?,
      place_id:        row.get(2)?,
      postcode:        row.get(3)?,
      constituency_id: row.get(4)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![
      text(&input.address),
      opt_int(input.place_id),
      opt_text(input.postcode.as_deref()),
      opt_int(input.constituency_id),
    ])
  }
}

impl SqlMutable for Address {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

// ─── Civil register ──────────────────────────────────────────────────────────

impl SqlRecord for Citizen {
  const TABLE: &'static str = "citizens";
  const COLUMNS: &'static [&'static str] =
    &["status_id", "surname_id", "first_name_id", "gender", "died"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      status_id:     row.get(1)?,
      surname_id:    row.get(2)?,
      first_name_id: row.get(3)?,
      gender:        gender_column(row, 4)?,
      died:          opt_date_column(row, 5)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![
      opt_int(input.status_id),
      opt_int(input.surname_id),
      opt_int(input.first_name_id),
      gender(input.gender),
      opt_date(input.died),
    ])
  }
}

impl SqlMutable for Citizen {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Birth {
  const TABLE: &'static str = "births";
  const COLUMNS: &'static [&'static str] =
    &["citizen_id", "birth_date", "mother_id", "father_id"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      citizen_id: row.get(1)?,
      birth_date: date_column(row, 2)?,
      mother_id:  row.get(3)?,
      father_id:  row.get(4)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![
      int(input.citizen_id),
      date(input.birth_date),
      opt_int(input.mother_id),
      opt_int(input.father_id),
    ])
  }
}

impl SqlMutable for Birth {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

impl SqlRecord for Marriage {
  const TABLE: &'static str = "marriages";
  const COLUMNS: &'static [&'static str] =
    &["person1_id", "person2_id", "marriage_date", "divorce_date"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      person1_id:    row.get(1)?,
      person2_id:    row.get(2)?,
      marriage_date: date_column(row, 3)?,
      divorce_date:  opt_date_column(row, 4)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![
      int(input.person1_id),
      int(input.person2_id),
      date(input.marriage_date),
      opt_date(input.divorce_date),
    ])
  }
}

impl SqlMutable for Marriage {
  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> { Self::insert_values(patch) }
}

// Insert-only: no `SqlMutable` impl.
impl SqlRecord for CitizenChange {
  const TABLE: &'static str = "citizen_changes";
  const COLUMNS: &'static [&'static str] = &["citizen_id", "change_date", "details"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      citizen_id:  row.get(1)?,
      change_date: date_column(row, 2)?,
      details:     json_column(row, 3)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![int(input.citizen_id), date(input.change_date), json(&input.details)?])
  }
}

// ─── Electoral roll ──────────────────────────────────────────────────────────

impl SqlRecord for Voter {
  const TABLE: &'static str = "voters";
  const COLUMNS: &'static [&'static str] =
    &["citizen_id", "address_id", "open_register", "registration_date"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      citizen_id:        row.get(1)?,
      address_id:        row.get(2)?,
      open_register:     flag_column(row, 3)?,
      registration_date: date_column(row, 4)?,
    })
  }

  fn insert_values(input: &Self::New) -> Result<Vec<Value>> {
    Ok(vec![
      int(input.citizen_id),
      int(input.address_id),
      flag(input.open_register),
      date(input.registration_date),
    ])
  }
}

impl SqlMutable for Voter {
  const UPDATE_COLUMNS: &'static [&'static str] =
    &["address_id", "open_register", "registration_date"];

  fn update_values(patch: &Self::Patch) -> Result<Vec<Value>> {
    Ok(vec![int(patch.address_id), flag(patch.open_register), date(patch.registration_date)])
  }
}
