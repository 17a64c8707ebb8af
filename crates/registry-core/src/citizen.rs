//! Citizens and the civil records hanging off them: births, marriages, and
//! the append-only change log.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  record::{Mutable, Record},
  reference::{CitizenStatus, FirstName, Surname},
};

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
  M,
  F,
}

impl Gender {
  /// The single-letter code stored in the `gender` column.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::M => "M",
      Self::F => "F",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "M" => Some(Self::M),
      "F" => Some(Self::F),
      _ => None,
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Citizen ─────────────────────────────────────────────────────────────────

/// A person on the civil register. Name parts and status are references into
/// the dictionary tables; fetch them with
/// [`CitizenService::resolve`](crate::service::CitizenService::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
  pub id:            i32,
  pub status_id:     Option<i32>,
  pub surname_id:    Option<i32>,
  pub first_name_id: Option<i32>,
  pub gender:        Option<Gender>,
  /// Date of death. Unset while the citizen is alive.
  pub died:          Option<NaiveDate>,
}

impl Citizen {
  pub fn is_alive(&self) -> bool { self.died.is_none() }
}

/// Insert and full-update payload for a [`Citizen`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCitizen {
  pub status_id:     Option<i32>,
  pub surname_id:    Option<i32>,
  pub first_name_id: Option<i32>,
  pub gender:        Option<Gender>,
  pub died:          Option<NaiveDate>,
}

impl Record for Citizen {
  type Id = i32;
  type New = NewCitizen;

  const ENTITY: &'static str = "citizen";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Citizen {
  type Patch = NewCitizen;
}

/// A citizen with its status and name references fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenView {
  pub citizen:    Citizen,
  pub status:     Option<CitizenStatus>,
  pub first_name: Option<FirstName>,
  pub surname:    Option<Surname>,
  pub full_name:  String,
  pub alive:      bool,
}

impl CitizenView {
  pub fn new(
    citizen: Citizen,
    status: Option<CitizenStatus>,
    first_name: Option<FirstName>,
    surname: Option<Surname>,
  ) -> Self {
    let full_name = match (&first_name, &surname) {
      (Some(f), Some(s)) => format!("{} {}", f.name, s.name),
      _ => "Unknown".to_owned(),
    };
    let alive = citizen.is_alive();
    Self { citizen, status, first_name, surname, full_name, alive }
  }
}

/// Head counts computed by four count queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenStatistics {
  pub total:    u64,
  pub alive:    u64,
  pub male:     u64,
  pub female:   u64,
  pub deceased: u64,
}

impl CitizenStatistics {
  pub fn new(total: u64, alive: u64, male: u64, female: u64) -> Self {
    Self { total, alive, male, female, deceased: total.saturating_sub(alive) }
  }
}

// ─── Birth ───────────────────────────────────────────────────────────────────

/// A birth record. Each citizen has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birth {
  pub id:         i32,
  pub citizen_id: i32,
  pub birth_date: NaiveDate,
  pub mother_id:  Option<i32>,
  pub father_id:  Option<i32>,
}

impl Birth {
  /// Age in whole calendar years between the birth year and `today`'s year.
  pub fn age_on(&self, today: NaiveDate) -> i32 { today.year() - self.birth_date.year() }

  pub fn is_adult_on(&self, today: NaiveDate) -> bool { self.age_on(today) >= 18 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBirth {
  pub citizen_id: i32,
  pub birth_date: NaiveDate,
  pub mother_id:  Option<i32>,
  pub father_id:  Option<i32>,
}

impl Record for Birth {
  type Id = i32;
  type New = NewBirth;

  const ENTITY: &'static str = "birth";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Birth {
  type Patch = NewBirth;
}

// ─── Marriage ────────────────────────────────────────────────────────────────

/// A marriage between two citizens. Divorce is recorded by setting
/// `divorce_date`; the row is never deleted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marriage {
  pub id:            i32,
  pub person1_id:    i32,
  pub person2_id:    i32,
  pub marriage_date: NaiveDate,
  pub divorce_date:  Option<NaiveDate>,
}

impl Marriage {
  pub fn is_divorced(&self) -> bool { self.divorce_date.is_some() }

  pub fn is_active(&self) -> bool { !self.is_divorced() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMarriage {
  pub person1_id:    i32,
  pub person2_id:    i32,
  pub marriage_date: NaiveDate,
  pub divorce_date:  Option<NaiveDate>,
}

impl Record for Marriage {
  type Id = i32;
  type New = NewMarriage;

  const ENTITY: &'static str = "marriage";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Marriage {
  type Patch = NewMarriage;
}

// ─── CitizenChange ───────────────────────────────────────────────────────────

/// An entry in the citizen change log. Entries are never updated or
/// deleted, so this type does not implement [`Mutable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenChange {
  pub id:          i32,
  pub citizen_id:  i32,
  pub change_date: NaiveDate,
  /// Opaque structured payload, stored and returned verbatim.
  pub details:     serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCitizenChange {
  pub citizen_id:  i32,
  pub change_date: NaiveDate,
  #[serde(default)]
  pub details:     serde_json::Value,
}

impl Record for CitizenChange {
  type Id = i32;
  type New = NewCitizenChange;

  const ENTITY: &'static str = "citizen change";

  fn id(&self) -> i32 { self.id }
}
