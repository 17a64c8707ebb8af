//! [`ReferenceStore`] lookups.

use registry_core::{
  citizen::Gender,
  reference::{Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname},
  store::ReferenceStore,
};

use crate::{
  Result,
  encode::{int, text},
  store::SqliteStore,
};

impl ReferenceStore for SqliteStore {
  async fn country_by_code(&self, code: &str) -> Result<Option<Country>> {
    self.select_one("WHERE t.code = ?1", vec![text(code)]).await
  }

  async fn country_by_name(&self, name: &str) -> Result<Option<Country>> {
    self.select_one("WHERE t.name = ?1", vec![text(name)]).await
  }

  async fn places_by_name(&self, name: &str) -> Result<Vec<Place>> {
    self.select("WHERE t.name = ?1", vec![text(name)]).await
  }

  async fn places_in_country(&self, country_id: i32) -> Result<Vec<Place>> {
    self.select("WHERE t.country_id = ?1", vec![int(country_id)]).await
  }

  async fn constituency_by_code(&self, code: &str) -> Result<Option<Constituency>> {
    self.select_one("WHERE t.code = ?1", vec![text(code)]).await
  }

  async fn status_by_code(&self, code: &str) -> Result<Option<CitizenStatus>> {
    self.select_one("WHERE t.code = ?1", vec![text(code)]).await
  }

  async fn first_names_by_name(&self, name: &str) -> Result<Vec<FirstName>> {
    self.select("WHERE t.name = ?1", vec![text(name)]).await
  }

  async fn first_names_by_gender(&self, gender: Gender) -> Result<Vec<FirstName>> {
    self.select("WHERE t.gender = ?1", vec![text(gender.as_str())]).await
  }

  async fn surnames_by_name(&self, name: &str) -> Result<Vec<Surname>> {
    self.select("WHERE t.name = ?1", vec![text(name)]).await
  }

  async fn addresses_by_postcode(&self, postcode: &str) -> Result<Vec<Address>> {
    self.select("WHERE t.postcode = ?1", vec![text(postcode)]).await
  }

  async fn addresses_in_constituency(&self, constituency_id: i32) -> Result<Vec<Address>> {
    self.select("WHERE t.constituency_id = ?1", vec![int(constituency_id)]).await
  }
}
