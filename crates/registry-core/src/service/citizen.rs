//! Citizen operations.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::IntoCore as _;
use crate::{
  Error, Result,
  citizen::{Citizen, CitizenStatistics, CitizenView, Gender, NewCitizen},
  page::{Page, PageRequest},
  record::Record,
  reference::{CitizenStatus, FirstName, Surname},
  store::{CitizenStore, MutableRecordStore, RecordStore},
};

pub struct CitizenService<S> {
  store: Arc<S>,
}

impl<S> CitizenService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

impl<S> Clone for CitizenService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S> CitizenService<S>
where
  S: CitizenStore
    + MutableRecordStore<Citizen>
    + RecordStore<CitizenStatus>
    + RecordStore<FirstName>
    + RecordStore<Surname>,
{
  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn find_by_id(&self, id: i32) -> Result<Option<Citizen>> {
    RecordStore::<Citizen>::get(&*self.store, id).await.into_core()
  }

  pub async fn find_all(&self) -> Result<Vec<Citizen>> {
    RecordStore::<Citizen>::list(&*self.store).await.into_core()
  }

  pub async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Citizen>> {
    RecordStore::<Citizen>::page(&*self.store, request).await.into_core()
  }

  pub async fn find_by_gender(&self, gender: Gender) -> Result<Vec<Citizen>> {
    self.store.citizens_by_gender(gender).await.into_core()
  }

  pub async fn find_by_status_code(&self, code: &str) -> Result<Vec<Citizen>> {
    self.store.citizens_by_status_code(code).await.into_core()
  }

  pub async fn find_by_surname(&self, surname: &str) -> Result<Vec<Citizen>> {
    self.store.citizens_by_surname(surname).await.into_core()
  }

  pub async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Citizen>> {
    self.store.citizens_by_first_name(first_name).await.into_core()
  }

  pub async fn find_by_full_name(&self, first_name: &str, surname: &str) -> Result<Vec<Citizen>> {
    self
      .store
      .citizens_by_full_name(first_name, surname)
      .await
      .into_core()
  }

  pub async fn find_alive(&self) -> Result<Vec<Citizen>> {
    self.store.alive_citizens().await.into_core()
  }

  pub async fn find_alive_paged(&self, request: PageRequest) -> Result<Page<Citizen>> {
    self.store.alive_citizens_page(request).await.into_core()
  }

  pub async fn find_by_died(&self, date: NaiveDate) -> Result<Vec<Citizen>> {
    self.store.citizens_died_on(date).await.into_core()
  }

  pub async fn find_by_died_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<Citizen>> {
    self.store.citizens_died_between(start, end).await.into_core()
  }

  pub async fn search_by_name(&self, term: &str) -> Result<Vec<Citizen>> {
    debug!(term, "citizen name search");
    self.store.search_citizens_by_name(term).await.into_core()
  }

  /// Fetch a citizen together with its status and name records.
  pub async fn resolve(&self, id: i32) -> Result<Option<CitizenView>> {
    let Some(citizen) = self.find_by_id(id).await? else {
      return Ok(None);
    };

    let status = match citizen.status_id {
      Some(sid) => RecordStore::<CitizenStatus>::get(&*self.store, sid).await.into_core()?,
      None => None,
    };
    let first_name = match citizen.first_name_id {
      Some(fid) => RecordStore::<FirstName>::get(&*self.store, fid).await.into_core()?,
      None => None,
    };
    let surname = match citizen.surname_id {
      Some(sid) => RecordStore::<Surname>::get(&*self.store, sid).await.into_core()?,
      None => None,
    };

    Ok(Some(CitizenView::new(citizen, status, first_name, surname)))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  pub async fn create_citizen(&self, input: NewCitizen) -> Result<Citizen> {
    let citizen = RecordStore::<Citizen>::create(&*self.store, input)
      .await
      .into_core()?;
    info!(id = citizen.id, "citizen created");
    Ok(citizen)
  }

  /// Replace status, name references, gender and date of death.
  pub async fn update_citizen(&self, id: i32, input: NewCitizen) -> Result<Citizen> {
    let citizen = MutableRecordStore::<Citizen>::update(&*self.store, id, input)
      .await
      .into_core()?;
    info!(id, "citizen updated");
    Ok(citizen)
  }

  pub async fn mark_as_deceased(&self, id: i32, date: NaiveDate) -> Result<Citizen> {
    let citizen = self.store.set_died(id, Some(date)).await.into_core()?;
    info!(id, died = %date, "citizen marked deceased");
    Ok(citizen)
  }

  /// Hard delete. An absent id is a silent no-op.
  pub async fn delete_citizen(&self, id: i32) -> Result<()> {
    let removed = MutableRecordStore::<Citizen>::delete(&*self.store, id)
      .await
      .into_core()?;
    if removed {
      info!(id, "citizen deleted");
    }
    Ok(())
  }

  /// Like [`find_by_id`](Self::find_by_id), but an absent id is
  /// [`Error::NotFound`].
  pub async fn require(&self, id: i32) -> Result<Citizen> {
    self
      .find_by_id(id)
      .await?
      .ok_or_else(|| Error::not_found(Citizen::ENTITY, id))
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  /// Four count queries, evaluated fresh on every call.
  pub async fn statistics(&self) -> Result<CitizenStatistics> {
    let total = self.store.count_citizens().await.into_core()?;
    let alive = self.store.count_alive_citizens().await.into_core()?;
    let male = self.store.count_citizens_by_gender(Gender::M).await.into_core()?;
    let female = self.store.count_citizens_by_gender(Gender::F).await.into_core()?;
    Ok(CitizenStatistics::new(total, alive, male, female))
  }
}
