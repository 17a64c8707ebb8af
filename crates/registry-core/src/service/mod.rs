//! Stateless services sitting between the API layer and a store.
//!
//! Each service method is one unit of work: a single store call (or a short
//! read-then-write on one entity), with backend errors converted into the
//! core [`Error`] taxonomy. Services hold nothing but a shared store handle.

mod citizen;
mod civil;
mod records;
mod reference;
mod voter;

use std::sync::Arc;

pub use citizen::CitizenService;
pub use civil::CivilService;
pub use records::RecordService;
pub use reference::ReferenceService;
pub use voter::VoterService;

use crate::{Error, Result, store::RegistryStore};

/// Every service over one shared store. Cloning is cheap.
pub struct Services<S> {
  pub records:   RecordService<S>,
  pub reference: ReferenceService<S>,
  pub civil:     CivilService<S>,
  pub citizens:  CitizenService<S>,
  pub voters:    VoterService<S>,
}

impl<S: RegistryStore> Services<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      records:   RecordService::new(store.clone()),
      reference: ReferenceService::new(store.clone()),
      civil:     CivilService::new(store.clone()),
      citizens:  CitizenService::new(store.clone()),
      voters:    VoterService::new(store),
    }
  }
}

impl<S> Clone for Services<S> {
  fn clone(&self) -> Self {
    Self {
      records:   self.records.clone(),
      reference: self.reference.clone(),
      civil:     self.civil.clone(),
      citizens:  self.citizens.clone(),
      voters:    self.voters.clone(),
    }
  }
}

/// Converts a backend result into a core [`Result`].
trait IntoCore<T> {
  fn into_core(self) -> Result<T>;
}

impl<T, E: Into<Error>> IntoCore<T> for std::result::Result<T, E> {
  fn into_core(self) -> Result<T> { self.map_err(Into::into) }
}
