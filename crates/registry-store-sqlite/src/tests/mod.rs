//! Integration tests for `SqliteStore` against an in-memory database, and for
//! the core services running on top of it.

mod citizen;

use std::sync::Arc;

use chrono::NaiveDate;
use registry_core::{
  citizen::{Citizen, Gender, NewCitizen},
  reference::{
    Address, Constituency, FirstName, NewAddress, NewConstituency, NewFirstName, NewSurname,
    Surname,
  },
  service::Services,
  store::RecordStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn services(store: &SqliteStore) -> Services<SqliteStore> {
  Services::new(Arc::new(store.clone()))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn first_name(s: &SqliteStore, name: &str, gender: Gender) -> FirstName {
  RecordStore::<FirstName>::create(s, NewFirstName { name: name.into(), gender: Some(gender) })
    .await
    .unwrap()
}

async fn surname(s: &SqliteStore, name: &str) -> Surname {
  RecordStore::<Surname>::create(s, NewSurname { name: name.into() })
    .await
    .unwrap()
}

/// A living citizen with both name parts set and gender taken from the first
/// name.
async fn citizen(s: &SqliteStore, first: &FirstName, last: &Surname) -> Citizen {
  RecordStore::<Citizen>::create(s, NewCitizen {
    first_name_id: Some(first.id),
    surname_id: Some(last.id),
    gender: first.gender,
    ..NewCitizen::default()
  })
  .await
  .unwrap()
}

async fn constituency(s: &SqliteStore, name: &str, code: &str) -> Constituency {
  RecordStore::<Constituency>::create(s, NewConstituency {
    name: name.into(),
    code: Some(code.into()),
  })
  .await
  .unwrap()
}

async fn address(
  s: &SqliteStore,
  line: &str,
  postcode: &str,
  constituency_id: Option<i32>,
  place_id: Option<i32>,
) -> Address {
  RecordStore::<Address>::create(s, NewAddress {
    address: line.into(),
    place_id,
    postcode: Some(postcode.into()),
    constituency_id,
  })
  .await
  .unwrap()
}
