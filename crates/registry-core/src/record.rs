//! The [`Record`] abstraction shared by every stored entity.
//!
//! A record is a row with a store-assigned identity key. Its insert payload
//! ([`Record::New`]) never carries the key. Records that may change after
//! insertion also implement [`Mutable`], whose [`Mutable::Patch`] describes
//! exactly the fields an update replaces.

use std::fmt::{Debug, Display};

use serde::{Serialize, de::DeserializeOwned};

/// A stored entity with a generated identity key.
pub trait Record:
  Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Identity key type. Every key space fits in an `i64`.
  type Id: Copy
    + Debug
    + Display
    + PartialEq
    + Into<i64>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static;

  /// Insert payload: every field except the identity key.
  type New: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;

  /// Human-readable entity name, used in errors and log fields.
  const ENTITY: &'static str;

  fn id(&self) -> Self::Id;
}

/// A record that supports update and delete after insertion.
///
/// Append-only records (e.g. [`crate::citizen::CitizenChange`]) do not
/// implement this trait, so no store can be asked to rewrite them.
pub trait Mutable: Record {
  /// The fields replaced by a full update.
  type Patch: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
}
