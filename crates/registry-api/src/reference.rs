//! Lookup handlers for the reference tables and addresses.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries/code/{code}` | 404 if absent |
//! | `GET`  | `/countries/name/{name}` | 404 if absent |
//! | `GET`  | `/places/name/{name}` | |
//! | `GET`  | `/places/country/{id}` | |
//! | `GET`  | `/constituencies/code/{code}` | 404 if absent |
//! | `GET`  | `/citizen-statuses/code/{code}` | 404 if absent |
//! | `GET`  | `/first-names/name/{name}` | |
//! | `GET`  | `/first-names/gender/{gender}` | `M` or `F` |
//! | `GET`  | `/surnames/name/{name}` | |
//! | `GET`  | `/addresses/postcode/{postcode}` | |
//! | `GET`  | `/addresses/constituency/{id}` | |

use axum::extract::State;
use registry_core::{
  citizen::Gender,
  reference::{Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname},
  service::Services,
  store::ReferenceStore,
};

use crate::{
  error::ApiError,
  extract::{Json, Path},
};

pub async fn country_by_code<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(code): Path<String>,
) -> Result<Json<Country>, ApiError> {
  let country = svc
    .reference
    .country_by_code(&code)
    .await?
    .ok_or_else(|| ApiError::not_found("country with code", &code))?;
  Ok(Json(country))
}

pub async fn country_by_name<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Country>, ApiError> {
  let country = svc
    .reference
    .country_by_name(&name)
    .await?
    .ok_or_else(|| ApiError::not_found("country named", &name))?;
  Ok(Json(country))
}

pub async fn places_by_name<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Place>>, ApiError> {
  Ok(Json(svc.reference.places_by_name(&name).await?))
}

pub async fn places_in_country<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(country_id): Path<i32>,
) -> Result<Json<Vec<Place>>, ApiError> {
  Ok(Json(svc.reference.places_in_country(country_id).await?))
}

pub async fn constituency_by_code<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(code): Path<String>,
) -> Result<Json<Constituency>, ApiError> {
  let constituency = svc
    .reference
    .constituency_by_code(&code)
    .await?
    .ok_or_else(|| ApiError::not_found("constituency with code", &code))?;
  Ok(Json(constituency))
}

pub async fn status_by_code<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(code): Path<String>,
) -> Result<Json<CitizenStatus>, ApiError> {
  let status = svc
    .reference
    .status_by_code(&code)
    .await?
    .ok_or_else(|| ApiError::not_found("citizen status with code", &code))?;
  Ok(Json(status))
}

pub async fn first_names_by_name<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<FirstName>>, ApiError> {
  Ok(Json(svc.reference.first_names_by_name(&name).await?))
}

pub async fn first_names_by_gender<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(gender): Path<Gender>,
) -> Result<Json<Vec<FirstName>>, ApiError> {
  Ok(Json(svc.reference.first_names_by_gender(gender).await?))
}

pub async fn surnames_by_name<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Surname>>, ApiError> {
  Ok(Json(svc.reference.surnames_by_name(&name).await?))
}

pub async fn addresses_by_postcode<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(postcode): Path<String>,
) -> Result<Json<Vec<Address>>, ApiError> {
  Ok(Json(svc.reference.addresses_by_postcode(&postcode).await?))
}

pub async fn addresses_in_constituency<S: ReferenceStore>(
  State(svc): State<Services<S>>,
  Path(constituency_id): Path<i32>,
) -> Result<Json<Vec<Address>>, ApiError> {
  Ok(Json(svc.reference.addresses_in_constituency(constituency_id).await?))
}
