//! Reference tables and addresses.
//!
//! These are the leaves of the model: countries, places, constituencies,
//! citizen status codes, and the first-name and surname dictionaries.
//! [`Address`] sits one level up, pointing at a place and a constituency.

use serde::{Deserialize, Serialize};

use crate::{
  citizen::Gender,
  record::{Mutable, Record},
};

// ─── Country ─────────────────────────────────────────────────────────────────

/// A country. `name` and `code` are each unique; `code` is at most three
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub id:   i32,
  pub name: String,
  pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
  pub name: String,
  pub code: Option<String>,
}

impl Record for Country {
  type Id = i32;
  type New = NewCountry;

  const ENTITY: &'static str = "country";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Country {
  type Patch = NewCountry;
}

// ─── Place ───────────────────────────────────────────────────────────────────

/// A named town or locality, optionally tied to a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
  pub id:         i32,
  pub name:       String,
  pub country_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlace {
  pub name:       String,
  pub country_id: Option<i32>,
}

impl Record for Place {
  type Id = i32;
  type New = NewPlace;

  const ENTITY: &'static str = "place";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Place {
  type Patch = NewPlace;
}

// ─── Constituency ────────────────────────────────────────────────────────────

/// An electoral district. `code`, when present, is unique and at most ten
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituency {
  pub id:   i32,
  pub name: String,
  pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConstituency {
  pub name: String,
  pub code: Option<String>,
}

impl Record for Constituency {
  type Id = i32;
  type New = NewConstituency;

  const ENTITY: &'static str = "constituency";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Constituency {
  type Patch = NewConstituency;
}

// ─── CitizenStatus ───────────────────────────────────────────────────────────

/// A civil or life-cycle classification (e.g. active, emigrated), referenced
/// by its unique code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenStatus {
  pub id:          i32,
  pub code:        String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCitizenStatus {
  pub code:        String,
  pub description: Option<String>,
}

impl Record for CitizenStatus {
  type Id = i32;
  type New = NewCitizenStatus;

  const ENTITY: &'static str = "citizen status";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for CitizenStatus {
  type Patch = NewCitizenStatus;
}

// ─── Name dictionaries ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstName {
  pub id:     i32,
  pub name:   String,
  pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFirstName {
  pub name:   String,
  pub gender: Option<Gender>,
}

impl Record for FirstName {
  type Id = i32;
  type New = NewFirstName;

  const ENTITY: &'static str = "first name";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for FirstName {
  type Patch = NewFirstName;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surname {
  pub id:   i32,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurname {
  pub name: String,
}

impl Record for Surname {
  type Id = i32;
  type New = NewSurname;

  const ENTITY: &'static str = "surname";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Surname {
  type Patch = NewSurname;
}

// ─── Address ─────────────────────────────────────────────────────────────────

/// A postal address. Voters are registered against one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub id:              i32,
  /// Free-text street address.
  pub address:         String,
  pub place_id:        Option<i32>,
  pub postcode:        Option<String>,
  pub constituency_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
  pub address:         String,
  pub place_id:        Option<i32>,
  pub postcode:        Option<String>,
  pub constituency_id: Option<i32>,
}

impl Record for Address {
  type Id = i32;
  type New = NewAddress;

  const ENTITY: &'static str = "address";

  fn id(&self) -> i32 { self.id }
}

impl Mutable for Address {
  type Patch = NewAddress;
}
