//! [`CitizenStore`] and [`CivilRecordStore`] lookups.

use chrono::NaiveDate;
use registry_core::{
  citizen::{Birth, Citizen, CitizenChange, Gender, Marriage},
  page::{Page, PageRequest},
  store::{CitizenStore, CivilRecordStore},
};

use crate::{
  Result,
  encode::{date, escape_like, int, opt_date, text},
  record::SqlRecord,
  store::SqliteStore,
};

const JOIN_SURNAME: &str = "JOIN surnames s ON s.id = t.surname_id";
const JOIN_FIRST_NAME: &str = "JOIN first_names f ON f.id = t.first_name_id";

impl CitizenStore for SqliteStore {
  async fn citizens_by_gender(&self, gender: Gender) -> Result<Vec<Citizen>> {
    self.select("WHERE t.gender = ?1", vec![text(gender.as_str())]).await
  }

  async fn citizens_by_status_code(&self, code: &str) -> Result<Vec<Citizen>> {
    self
      .select(
        "JOIN citizen_status st ON st.id = t.status_id WHERE st.code = ?1",
        vec![text(code)],
      )
      .await
  }

  async fn citizens_by_surname(&self, surname: &str) -> Result<Vec<Citizen>> {
    let clause = format!("{JOIN_SURNAME} WHERE s.name = ?1");
    self.select(&clause, vec![text(surname)]).await
  }

  async fn citizens_by_first_name(&self, first_name: &str) -> Result<Vec<Citizen>> {
    let clause = format!("{JOIN_FIRST_NAME} WHERE f.name = ?1");
    self.select(&clause, vec![text(first_name)]).await
  }

  async fn citizens_by_full_name(&self, first_name: &str, surname: &str) -> Result<Vec<Citizen>> {
    let clause = format!("{JOIN_FIRST_NAME} {JOIN_SURNAME} WHERE f.name = ?1 AND s.name = ?2");
    self.select(&clause, vec![text(first_name), text(surname)]).await
  }

  async fn alive_citizens(&self) -> Result<Vec<Citizen>> {
    self.select("WHERE t.died IS NULL", Vec::new()).await
  }

  async fn alive_citizens_page(&self, request: PageRequest) -> Result<Page<Citizen>> {
    self.select_page("WHERE t.died IS NULL", Vec::new(), request).await
  }

  async fn citizens_died_on(&self, on: NaiveDate) -> Result<Vec<Citizen>> {
    self.select("WHERE t.died = ?1", vec![date(on)]).await
  }

  async fn citizens_died_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Citizen>> {
    self
      .select("WHERE t.died BETWEEN ?1 AND ?2", vec![date(start), date(end)])
      .await
  }

  // Left joins: a citizen missing one name part can still match on the other.
  // `casefold` is the Unicode-aware lower-casing registered on the connection;
  // the built-in `LOWER` only folds ASCII.
  async fn search_citizens_by_name(&self, term: &str) -> Result<Vec<Citizen>> {
    self
      .select(
        "LEFT JOIN first_names f ON f.id = t.first_name_id \
         LEFT JOIN surnames s ON s.id = t.surname_id \
         WHERE casefold(f.name) LIKE '%' || casefold(?1) || '%' ESCAPE '\\' \
            OR casefold(s.name) LIKE '%' || casefold(?1) || '%' ESCAPE '\\'",
        vec![text(&escape_like(term))],
      )
      .await
  }

  async fn set_died(&self, id: i32, died: Option<NaiveDate>) -> Result<Citizen> {
    self.patch(id.into(), "died = ?2", vec![opt_date(died)]).await
  }

  async fn count_citizens(&self) -> Result<u64> {
    self.count(Citizen::TABLE, "", Vec::new()).await
  }

  async fn count_alive_citizens(&self) -> Result<u64> {
    self.count(Citizen::TABLE, "WHERE t.died IS NULL", Vec::new()).await
  }

  async fn count_citizens_by_gender(&self, gender: Gender) -> Result<u64> {
    self
      .count(Citizen::TABLE, "WHERE t.gender = ?1", vec![text(gender.as_str())])
      .await
  }
}

impl CivilRecordStore for SqliteStore {
  async fn birth_of(&self, citizen_id: i32) -> Result<Option<Birth>> {
    self.select_one("WHERE t.citizen_id = ?1", vec![int(citizen_id)]).await
  }

  async fn children_of(&self, parent_id: i32) -> Result<Vec<Birth>> {
    self
      .select("WHERE t.mother_id = ?1 OR t.father_id = ?1", vec![int(parent_id)])
      .await
  }

  async fn marriages_of(&self, citizen_id: i32) -> Result<Vec<Marriage>> {
    self
      .select("WHERE t.person1_id = ?1 OR t.person2_id = ?1", vec![int(citizen_id)])
      .await
  }

  async fn active_marriages(&self) -> Result<Vec<Marriage>> {
    self.select("WHERE t.divorce_date IS NULL", Vec::new()).await
  }

  async fn changes_for(&self, citizen_id: i32) -> Result<Vec<CitizenChange>> {
    self
      .select_ordered(
        "WHERE t.citizen_id = ?1",
        "t.change_date, t.id",
        vec![int(citizen_id)],
      )
      .await
  }
}
