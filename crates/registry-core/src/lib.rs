//! Core types and trait definitions for the civil registry and electoral roll.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement the traits in [`store`]; the API layer talks to the
//! [`service`] types, which in turn drive a backend.

pub mod citizen;
pub mod error;
pub mod page;
pub mod record;
pub mod reference;
pub mod service;
pub mod store;
pub mod voter;

pub use error::{Error, Result};
