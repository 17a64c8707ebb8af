//! Births, marriages and the citizen change log.

use std::sync::Arc;

use tracing::info;

use super::IntoCore as _;
use crate::{
  Result,
  citizen::{Birth, CitizenChange, Marriage, NewCitizenChange},
  store::{CivilRecordStore, RecordStore},
};

pub struct CivilService<S> {
  store: Arc<S>,
}

impl<S> CivilService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

impl<S> Clone for CivilService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: CivilRecordStore + RecordStore<CitizenChange>> CivilService<S> {
  pub async fn birth_of(&self, citizen_id: i32) -> Result<Option<Birth>> {
    self.store.birth_of(citizen_id).await.into_core()
  }

  pub async fn children_of(&self, parent_id: i32) -> Result<Vec<Birth>> {
    self.store.children_of(parent_id).await.into_core()
  }

  pub async fn marriages_of(&self, citizen_id: i32) -> Result<Vec<Marriage>> {
    self.store.marriages_of(citizen_id).await.into_core()
  }

  pub async fn active_marriages(&self) -> Result<Vec<Marriage>> {
    self.store.active_marriages().await.into_core()
  }

  pub async fn changes_for(&self, citizen_id: i32) -> Result<Vec<CitizenChange>> {
    self.store.changes_for(citizen_id).await.into_core()
  }

  /// Append an entry to the change log. There is no counterpart to amend or
  /// remove one.
  pub async fn record_change(&self, input: NewCitizenChange) -> Result<CitizenChange> {
    let change = RecordStore::<CitizenChange>::create(&*self.store, input)
      .await
      .into_core()?;
    info!(id = change.id, citizen_id = change.citizen_id, "citizen change recorded");
    Ok(change)
  }
}
