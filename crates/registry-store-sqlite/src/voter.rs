//! [`VoterStore`] lookups. Geographic filters walk
//! voter → address → constituency, or voter → address → place → country.

use chrono::NaiveDate;
use registry_core::{
  page::{Page, PageRequest},
  store::VoterStore,
  voter::Voter,
};

use crate::{
  Result,
  encode::{date, flag, int, text},
  record::SqlRecord,
  store::SqliteStore,
};

const JOIN_ADDRESS: &str = "JOIN addresses a ON a.id = t.address_id";

impl VoterStore for SqliteStore {
  async fn voter_by_citizen(&self, citizen_id: i32) -> Result<Option<Voter>> {
    self.select_one("WHERE t.citizen_id = ?1", vec![int(citizen_id)]).await
  }

  async fn voters_at_address(&self, address_id: i32) -> Result<Vec<Voter>> {
    self.select("WHERE t.address_id = ?1", vec![int(address_id)]).await
  }

  async fn voters_in_constituency(&self, constituency_id: i32) -> Result<Vec<Voter>> {
    let clause = format!("{JOIN_ADDRESS} WHERE a.constituency_id = ?1");
    self.select(&clause, vec![int(constituency_id)]).await
  }

  async fn voters_in_constituency_named(&self, name: &str) -> Result<Vec<Voter>> {
    let clause = format!(
      "{JOIN_ADDRESS} JOIN constituencies c ON c.id = a.constituency_id WHERE c.name = ?1"
    );
    self.select(&clause, vec![text(name)]).await
  }

  async fn voters_by_postcode(&self, postcode: &str) -> Result<Vec<Voter>> {
    let clause = format!("{JOIN_ADDRESS} WHERE a.postcode = ?1");
    self.select(&clause, vec![text(postcode)]).await
  }

  async fn voters_by_place_name(&self, place: &str) -> Result<Vec<Voter>> {
    let clause = format!("{JOIN_ADDRESS} JOIN places p ON p.id = a.place_id WHERE p.name = ?1");
    self.select(&clause, vec![text(place)]).await
  }

  async fn voters_by_country_name(&self, country: &str) -> Result<Vec<Voter>> {
    let clause = format!(
      "{JOIN_ADDRESS} JOIN places p ON p.id = a.place_id \
       JOIN countries co ON co.id = p.country_id WHERE co.name = ?1"
    );
    self.select(&clause, vec![text(country)]).await
  }

  async fn voters_by_open_register(&self, open_register: bool) -> Result<Vec<Voter>> {
    self.select("WHERE t.open_register = ?1", vec![flag(open_register)]).await
  }

  async fn open_register_page(&self, request: PageRequest) -> Result<Page<Voter>> {
    self
      .select_page("WHERE t.open_register = 1", Vec::new(), request)
      .await
  }

  async fn voters_registered_on(&self, on: NaiveDate) -> Result<Vec<Voter>> {
    self.select("WHERE t.registration_date = ?1", vec![date(on)]).await
  }

  async fn voters_registered_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Voter>> {
    self
      .select(
        "WHERE t.registration_date BETWEEN ?1 AND ?2",
        vec![date(start), date(end)],
      )
      .await
  }

  async fn set_open_register(&self, id: i64, open_register: bool) -> Result<Voter> {
    self.patch(id, "open_register = ?2", vec![flag(open_register)]).await
  }

  async fn set_voter_address(&self, id: i64, address_id: i32) -> Result<Voter> {
    self.patch(id, "address_id = ?2", vec![int(address_id)]).await
  }

  async fn count_voters(&self) -> Result<u64> { self.count(Voter::TABLE, "", Vec::new()).await }

  async fn count_voters_by_open_register(&self, open_register: bool) -> Result<u64> {
    self
      .count(Voter::TABLE, "WHERE t.open_register = ?1", vec![flag(open_register)])
      .await
  }

  async fn count_voters_in_constituency(&self, constituency_id: i32) -> Result<u64> {
    let clause = format!("{JOIN_ADDRESS} WHERE a.constituency_id = ?1");
    self.count(Voter::TABLE, &clause, vec![int(constituency_id)]).await
  }
}
