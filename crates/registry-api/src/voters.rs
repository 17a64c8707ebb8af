//! Handlers for `/voters` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/voters` | Paged: `?page=0&size=20` |
//! | `GET`    | `/voters/all` | Unpaged |
//! | `GET`    | `/voters/{id}` | 404 if not found |
//! | `GET`    | `/voters/{id}/view` | With citizen and address |
//! | `GET`    | `/voters/citizen/{id}` | 404 if the citizen is not registered |
//! | `GET`    | `/voters/address/{id}` | |
//! | `GET`    | `/voters/constituency/{id}` | Through the voter's address |
//! | `GET`    | `/voters/constituency/{id}/count` | |
//! | `GET`    | `/voters/constituency/name/{name}` | |
//! | `GET`    | `/voters/postcode/{postcode}` | |
//! | `GET`    | `/voters/place/{name}` | |
//! | `GET`    | `/voters/country/{name}` | |
//! | `GET`    | `/voters/open-register` | Unpaged |
//! | `GET`    | `/voters/open-register/paged` | `?page=0&size=20` |
//! | `GET`    | `/voters/closed-register` | |
//! | `GET`    | `/voters/registration-date` | `?date=YYYY-MM-DD` |
//! | `GET`    | `/voters/registration-date/range` | `?start=&end=`, inclusive |
//! | `GET`    | `/voters/statistics` | |
//! | `POST`   | `/voters` | Returns 201 |
//! | `PUT`    | `/voters/{id}` | Body: address, open-register flag, registration date |
//! | `PUT`    | `/voters/{id}/open-register` | `?on_open_register=true\|false` |
//! | `PUT`    | `/voters/{id}/address` | `?address_id=`; 409 if the address is absent |
//! | `DELETE` | `/voters/{id}` | 204 |

use axum::{
  Router,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, put},
};
use registry_core::{
  page::Page,
  service::Services,
  store::RegistryStore,
  voter::{NewVoter, Voter, VoterStatistics, VoterUpdate, VoterView},
};
use serde::Deserialize;

use crate::{
  citizens::{DateParams, RangeParams},
  error::ApiError,
  extract::{Json, Path, Query},
  records::PageParams,
};

pub fn mount<S>(router: Router<Services<S>>) -> Router<Services<S>>
where
  S: RegistryStore + 'static,
{
  router
    .route("/voters", get(list_paged::<S>).post(register::<S>))
    .route("/voters/all", get(list_all::<S>))
    .route("/voters/citizen/{id}", get(by_citizen::<S>))
    .route("/voters/address/{id}", get(by_address::<S>))
    .route("/voters/constituency/{id}", get(by_constituency::<S>))
    .route("/voters/constituency/{id}/count", get(count_in_constituency::<S>))
    .route("/voters/constituency/name/{name}", get(by_constituency_name::<S>))
    .route("/voters/postcode/{postcode}", get(by_postcode::<S>))
    .route("/voters/place/{name}", get(by_place::<S>))
    .route("/voters/country/{name}", get(by_country::<S>))
    .route("/voters/open-register", get(open_register::<S>))
    .route("/voters/open-register/paged", get(open_register_paged::<S>))
    .route("/voters/closed-register", get(closed_register::<S>))
    .route("/voters/registration-date", get(registered_on::<S>))
    .route("/voters/registration-date/range", get(registered_between::<S>))
    .route("/voters/statistics", get(statistics::<S>))
    .route(
      "/voters/{id}",
      get(get_one::<S>).put(update::<S>).delete(deregister::<S>),
    )
    .route("/voters/{id}/view", get(view::<S>))
    .route("/voters/{id}/open-register", put(set_open_register::<S>))
    .route("/voters/{id}/address", put(set_address::<S>))
}

#[derive(Debug, Deserialize)]
pub struct OpenRegisterParams {
  #[serde(alias = "onOpenRegister")]
  pub on_open_register: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddressParams {
  #[serde(alias = "addressId")]
  pub address_id: i32,
}

// ─── Reads ───────────────────────────────────────────────────────────────────

async fn list_paged<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_all_paged(params.request()?).await?))
}

async fn list_all<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_all().await?))
}

async fn get_one<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Voter>, ApiError> {
  Ok(Json(svc.voters.require(id).await?))
}

async fn view<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<VoterView>, ApiError> {
  let view = svc
    .voters
    .resolve(id)
    .await?
    .ok_or_else(|| ApiError::not_found("voter", id))?;
  Ok(Json(view))
}

async fn by_citizen<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(citizen_id): Path<i32>,
) -> Result<Json<Voter>, ApiError> {
  let voter = svc
    .voters
    .find_by_citizen_id(citizen_id)
    .await?
    .ok_or_else(|| ApiError::not_found("voter for citizen", citizen_id))?;
  Ok(Json(voter))
}

async fn by_address<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(address_id): Path<i32>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_address_id(address_id).await?))
}

async fn by_constituency<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(constituency_id): Path<i32>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_constituency_id(constituency_id).await?))
}

async fn count_in_constituency<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(constituency_id): Path<i32>,
) -> Result<Json<u64>, ApiError> {
  Ok(Json(svc.voters.count_by_constituency_id(constituency_id).await?))
}

async fn by_constituency_name<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_constituency_name(&name).await?))
}

async fn by_postcode<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(postcode): Path<String>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_postcode(&postcode).await?))
}

async fn by_place<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_place_name(&name).await?))
}

async fn by_country<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_country_name(&name).await?))
}

async fn open_register<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_on_open_register().await?))
}

async fn open_register_paged<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_on_open_register_paged(params.request()?).await?))
}

async fn closed_register<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_not_on_open_register().await?))
}

async fn registered_on<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<DateParams>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  Ok(Json(svc.voters.find_by_registration_date(params.date).await?))
}

async fn registered_between<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Voter>>, ApiError> {
  let found = svc
    .voters
    .find_by_registration_date_between(params.start, params.end)
    .await?;
  Ok(Json(found))
}

async fn statistics<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<VoterStatistics>, ApiError> {
  Ok(Json(svc.voters.statistics().await?))
}

// ─── Writes ──────────────────────────────────────────────────────────────────

async fn register<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Json(body): Json<NewVoter>,
) -> Result<impl IntoResponse, ApiError> {
  let voter = svc.voters.register_voter(body).await?;
  Ok((StatusCode::CREATED, Json(voter)))
}

async fn update<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
  Json(body): Json<VoterUpdate>,
) -> Result<Json<Voter>, ApiError> {
  Ok(Json(svc.voters.update_voter(id, body).await?))
}

async fn set_open_register<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
  Query(params): Query<OpenRegisterParams>,
) -> Result<Json<Voter>, ApiError> {
  let voter = svc
    .voters
    .update_open_register_status(id, params.on_open_register)
    .await?;
  Ok(Json(voter))
}

async fn set_address<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
  Query(params): Query<AddressParams>,
) -> Result<Json<Voter>, ApiError> {
  Ok(Json(svc.voters.update_address(id, params.address_id).await?))
}

async fn deregister<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  svc.voters.deregister_voter(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
