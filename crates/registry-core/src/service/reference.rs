//! Lookups over reference tables and addresses.

use std::sync::Arc;

use tracing::debug;

use super::IntoCore as _;
use crate::{
  Result,
  citizen::Gender,
  reference::{Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname},
  store::ReferenceStore,
};

pub struct ReferenceService<S> {
  store: Arc<S>,
}

impl<S> ReferenceService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

impl<S> Clone for ReferenceService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: ReferenceStore> ReferenceService<S> {
  pub async fn country_by_code(&self, code: &str) -> Result<Option<Country>> {
    debug!(code, "country by code");
    self.store.country_by_code(code).await.into_core()
  }

  pub async fn country_by_name(&self, name: &str) -> Result<Option<Country>> {
    debug!(name, "country by name");
    self.store.country_by_name(name).await.into_core()
  }

  pub async fn places_by_name(&self, name: &str) -> Result<Vec<Place>> {
    self.store.places_by_name(name).await.into_core()
  }

  pub async fn places_in_country(&self, country_id: i32) -> Result<Vec<Place>> {
    self.store.places_in_country(country_id).await.into_core()
  }

  pub async fn constituency_by_code(&self, code: &str) -> Result<Option<Constituency>> {
    debug!(code, "constituency by code");
    self.store.constituency_by_code(code).await.into_core()
  }

  pub async fn status_by_code(&self, code: &str) -> Result<Option<CitizenStatus>> {
    debug!(code, "citizen status by code");
    self.store.status_by_code(code).await.into_core()
  }

  pub async fn first_names_by_name(&self, name: &str) -> Result<Vec<FirstName>> {
    self.store.first_names_by_name(name).await.into_core()
  }

  pub async fn first_names_by_gender(&self, gender: Gender) -> Result<Vec<FirstName>> {
    self.store.first_names_by_gender(gender).await.into_core()
  }

  pub async fn surnames_by_name(&self, name: &str) -> Result<Vec<Surname>> {
    self.store.surnames_by_name(name).await.into_core()
  }

  pub async fn addresses_by_postcode(&self, postcode: &str) -> Result<Vec<Address>> {
    self.store.addresses_by_postcode(postcode).await.into_core()
  }

  pub async fn addresses_in_constituency(&self, constituency_id: i32) -> Result<Vec<Address>> {
    self.store.addresses_in_constituency(constituency_id).await.into_core()
  }
}
