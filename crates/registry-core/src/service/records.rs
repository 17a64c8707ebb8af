//! Generic CRUD over any record type the store supports.

use std::sync::Arc;

use tracing::{debug, info};

use super::IntoCore as _;
use crate::{
  Error, Result,
  page::{Page, PageRequest},
  record::{Mutable, Record},
  store::{MutableRecordStore, RecordStore},
};

pub struct RecordService<S> {
  store: Arc<S>,
}

impl<S> RecordService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

impl<S> Clone for RecordService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S> RecordService<S> {
  pub async fn get<R>(&self, id: R::Id) -> Result<Option<R>>
  where
    R: Record,
    S: RecordStore<R>,
  {
    debug!(entity = R::ENTITY, %id, "get");
    RecordStore::<R>::get(&*self.store, id).await.into_core()
  }

  /// Like [`get`](Self::get), but an absent key is [`Error::NotFound`].
  pub async fn require<R>(&self, id: R::Id) -> Result<R>
  where
    R: Record,
    S: RecordStore<R>,
  {
    self.get::<R>(id).await?.ok_or_else(|| Error::not_found(R::ENTITY, id))
  }

  pub async fn list<R>(&self) -> Result<Vec<R>>
  where
    R: Record,
    S: RecordStore<R>,
  {
    debug!(entity = R::ENTITY, "list");
    RecordStore::<R>::list(&*self.store).await.into_core()
  }

  pub async fn page<R>(&self, request: PageRequest) -> Result<Page<R>>
  where
    R: Record,
    S: RecordStore<R>,
  {
    debug!(entity = R::ENTITY, page = request.page(), size = request.size(), "page");
    RecordStore::<R>::page(&*self.store, request).await.into_core()
  }

  pub async fn create<R>(&self, input: R::New) -> Result<R>
  where
    R: Record,
    S: RecordStore<R>,
  {
    let record = RecordStore::<R>::create(&*self.store, input).await.into_core()?;
    info!(entity = R::ENTITY, id = %record.id(), "created");
    Ok(record)
  }

  pub async fn update<R>(&self, id: R::Id, patch: R::Patch) -> Result<R>
  where
    R: Mutable,
    S: MutableRecordStore<R>,
  {
    let record = MutableRecordStore::<R>::update(&*self.store, id, patch)
      .await
      .into_core()?;
    info!(entity = R::ENTITY, %id, "updated");
    Ok(record)
  }

  /// Hard delete. Deleting an absent key succeeds without effect.
  pub async fn delete<R>(&self, id: R::Id) -> Result<()>
  where
    R: Mutable,
    S: MutableRecordStore<R>,
  {
    let removed = MutableRecordStore::<R>::delete(&*self.store, id).await.into_core()?;
    if removed {
      info!(entity = R::ENTITY, %id, "deleted");
    } else {
      debug!(entity = R::ENTITY, %id, "delete of absent key ignored");
    }
    Ok(())
  }
}
