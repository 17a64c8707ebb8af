//! Electoral-roll operations.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::IntoCore as _;
use crate::{
  Error, Result,
  citizen::Citizen,
  page::{Page, PageRequest},
  record::Record,
  reference::Address,
  store::{MutableRecordStore, RecordStore, VoterStore},
  voter::{NewVoter, Voter, VoterStatistics, VoterUpdate, VoterView},
};

pub struct VoterService<S> {
  store: Arc<S>,
}

impl<S> VoterService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

impl<S> Clone for VoterService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S> VoterService<S>
where
  S: VoterStore
    + MutableRecordStore<Voter>
    + RecordStore<Address>
    + RecordStore<Citizen>,
{
  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn find_by_id(&self, id: i64) -> Result<Option<Voter>> {
    RecordStore::<Voter>::get(&*self.store, id).await.into_core()
  }

  /// Like [`find_by_id`](Self::find_by_id), but an absent id is
  /// [`Error::NotFound`].
  pub async fn require(&self, id: i64) -> Result<Voter> {
    self
      .find_by_id(id)
      .await?
      .ok_or_else(|| Error::not_found(Voter::ENTITY, id))
  }

  /// A citizen has at most one voter registration.
  pub async fn find_by_citizen_id(&self, citizen_id: i32) -> Result<Option<Voter>> {
    self.store.voter_by_citizen(citizen_id).await.into_core()
  }

  pub async fn find_all(&self) -> Result<Vec<Voter>> {
    RecordStore::<Voter>::list(&*self.store).await.into_core()
  }

  pub async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Voter>> {
    RecordStore::<Voter>::page(&*self.store, request).await.into_core()
  }

  pub async fn find_by_address_id(&self, address_id: i32) -> Result<Vec<Voter>> {
    self.store.voters_at_address(address_id).await.into_core()
  }

  pub async fn find_by_constituency_id(&self, constituency_id: i32) -> Result<Vec<Voter>> {
    self.store.voters_in_constituency(constituency_id).await.into_core()
  }

  pub async fn find_by_constituency_name(&self, name: &str) -> Result<Vec<Voter>> {
    self.store.voters_in_constituency_named(name).await.into_core()
  }

  pub async fn find_by_postcode(&self, postcode: &str) -> Result<Vec<Voter>> {
    self.store.voters_by_postcode(postcode).await.into_core()
  }

  pub async fn find_by_place_name(&self, place: &str) -> Result<Vec<Voter>> {
    self.store.voters_by_place_name(place).await.into_core()
  }

  pub async fn find_by_country_name(&self, country: &str) -> Result<Vec<Voter>> {
    self.store.voters_by_country_name(country).await.into_core()
  }

  pub async fn find_on_open_register(&self) -> Result<Vec<Voter>> {
    self.store.voters_by_open_register(true).await.into_core()
  }

  pub async fn find_on_open_register_paged(&self, request: PageRequest) -> Result<Page<Voter>> {
    self.store.open_register_page(request).await.into_core()
  }

  pub async fn find_not_on_open_register(&self) -> Result<Vec<Voter>> {
    self.store.voters_by_open_register(false).await.into_core()
  }

  pub async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<Voter>> {
    self.store.voters_registered_on(date).await.into_core()
  }

  pub async fn find_by_registration_date_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<Voter>> {
    self.store.voters_registered_between(start, end).await.into_core()
  }

  pub async fn count_by_constituency_id(&self, constituency_id: i32) -> Result<u64> {
    self
      .store
      .count_voters_in_constituency(constituency_id)
      .await
      .into_core()
  }

  /// Fetch a voter together with its citizen and address.
  pub async fn resolve(&self, id: i64) -> Result<Option<VoterView>> {
    let Some(voter) = self.find_by_id(id).await? else {
      return Ok(None);
    };
    let citizen = RecordStore::<Citizen>::get(&*self.store, voter.citizen_id)
      .await
      .into_core()?;
    let address = RecordStore::<Address>::get(&*self.store, voter.address_id)
      .await
      .into_core()?;
    Ok(Some(VoterView { voter, citizen, address }))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  pub async fn register_voter(&self, input: NewVoter) -> Result<Voter> {
    let voter = RecordStore::<Voter>::create(&*self.store, input)
      .await
      .into_core()?;
    info!(id = voter.id, citizen_id = voter.citizen_id, "voter registered");
    Ok(voter)
  }

  /// Replace address, open-register flag and registration date.
  pub async fn update_voter(&self, id: i64, input: VoterUpdate) -> Result<Voter> {
    let voter = MutableRecordStore::<Voter>::update(&*self.store, id, input)
      .await
      .into_core()?;
    info!(id, "voter updated");
    Ok(voter)
  }

  pub async fn update_open_register_status(&self, id: i64, on_open_register: bool) -> Result<Voter> {
    let voter = self
      .store
      .set_open_register(id, on_open_register)
      .await
      .into_core()?;
    info!(id, on_open_register, "voter open-register status changed");
    Ok(voter)
  }

  /// Rebind a voter to another address. The voter must exist
  /// ([`Error::NotFound`] otherwise) and so must the address
  /// ([`Error::ConstraintViolation`] otherwise).
  pub async fn update_address(&self, id: i64, address_id: i32) -> Result<Voter> {
    let voter = self.require(id).await?;
    let address = RecordStore::<Address>::get(&*self.store, address_id)
      .await
      .into_core()?
      .ok_or_else(|| {
        Error::ConstraintViolation(format!("address {address_id} does not exist"))
      })?;

    let voter = self
      .store
      .set_voter_address(voter.id, address.id)
      .await
      .into_core()?;
    info!(id, address_id, "voter address changed");
    Ok(voter)
  }

  /// Hard delete. An absent id is a silent no-op.
  pub async fn deregister_voter(&self, id: i64) -> Result<()> {
    let removed = MutableRecordStore::<Voter>::delete(&*self.store, id)
      .await
      .into_core()?;
    if removed {
      info!(id, "voter deregistered");
    } else {
      debug!(id, "deregister of absent voter ignored");
    }
    Ok(())
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  pub async fn statistics(&self) -> Result<VoterStatistics> {
    let total = self.store.count_voters().await.into_core()?;
    let on_open_register = self.store.count_voters_by_open_register(true).await.into_core()?;
    let not_on_open_register = self.store.count_voters_by_open_register(false).await.into_core()?;
    Ok(VoterStatistics { total, on_open_register, not_on_open_register })
  }
}
