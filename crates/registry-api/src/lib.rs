//! JSON REST API for the civil registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`registry_core::store::RegistryStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", registry_api::api_router(store.clone()))
//! ```

pub mod citizens;
pub mod civil;
pub mod error;
pub mod extract;
pub mod records;
pub mod reference;
pub mod voters;

use std::sync::Arc;

use axum::{Router, routing::get};
use registry_core::{
  citizen::{Birth, CitizenChange, Marriage},
  reference::{Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname},
  service::Services,
  store::RegistryStore,
};
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Cross-origin requests are allowed from anywhere.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RegistryStore + 'static,
{
  let router = Router::new();

  // Reference tables
  let router = records::mount::<S, Country>(router, "/countries")
    .route("/countries/code/{code}", get(reference::country_by_code::<S>))
    .route("/countries/name/{name}", get(reference::country_by_name::<S>));
  let router = records::mount::<S, Place>(router, "/places")
    .route("/places/name/{name}", get(reference::places_by_name::<S>))
    .route("/places/country/{id}", get(reference::places_in_country::<S>));
  let router = records::mount::<S, Constituency>(router, "/constituencies")
    .route("/constituencies/code/{code}", get(reference::constituency_by_code::<S>));
  let router = records::mount::<S, CitizenStatus>(router, "/citizen-statuses")
    .route("/citizen-statuses/code/{code}", get(reference::status_by_code::<S>));
  let router = records::mount::<S, FirstName>(router, "/first-names")
    .route("/first-names/name/{name}", get(reference::first_names_by_name::<S>))
    .route("/first-names/gender/{gender}", get(reference::first_names_by_gender::<S>));
  let router = records::mount::<S, Surname>(router, "/surnames")
    .route("/surnames/name/{name}", get(reference::surnames_by_name::<S>));
  let router = records::mount::<S, Address>(router, "/addresses")
    .route("/addresses/postcode/{postcode}", get(reference::addresses_by_postcode::<S>))
    .route(
      "/addresses/constituency/{id}",
      get(reference::addresses_in_constituency::<S>),
    );

  // Civil records
  let router = records::mount::<S, Birth>(router, "/births")
    .route("/births/citizen/{id}", get(civil::birth_of::<S>))
    .route("/births/parent/{id}", get(civil::children_of::<S>));
  let router = records::mount::<S, Marriage>(router, "/marriages")
    .route("/marriages/citizen/{id}", get(civil::marriages_of::<S>))
    .route("/marriages/active", get(civil::active_marriages::<S>));

  // Change log: append-only, so no PUT or DELETE.
  let router = router
    .route(
      "/citizen-changes",
      get(records::list::<S, CitizenChange>).post(civil::record_change::<S>),
    )
    .route("/citizen-changes/{id}", get(records::get_one::<S, CitizenChange>))
    .route("/citizen-changes/citizen/{id}", get(civil::changes_for::<S>));

  // Citizens and the electoral roll
  let router = citizens::mount(router);
  let router = voters::mount(router);

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  router.layer(cors).with_state(Services::new(store))
}

#[cfg(test)]
mod tests;
