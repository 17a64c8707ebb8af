//! SQLite backend for the registry store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod citizen;
mod encode;
mod record;
mod reference;
mod schema;
mod store;
mod voter;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
