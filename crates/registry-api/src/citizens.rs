//! Handlers for `/citizens` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/citizens` | Paged: `?page=0&size=20` |
//! | `GET`    | `/citizens/all` | Unpaged |
//! | `GET`    | `/citizens/{id}` | 404 if not found |
//! | `GET`    | `/citizens/{id}/view` | With status and name records |
//! | `GET`    | `/citizens/gender/{gender}` | `M` or `F` |
//! | `GET`    | `/citizens/status/{code}` | |
//! | `GET`    | `/citizens/surname/{surname}` | |
//! | `GET`    | `/citizens/firstname/{first_name}` | |
//! | `GET`    | `/citizens/name` | `?first_name=&surname=` |
//! | `GET`    | `/citizens/alive` | Unpaged |
//! | `GET`    | `/citizens/alive/paged` | `?page=0&size=20` |
//! | `GET`    | `/citizens/search` | `?term=`; case-insensitive substring |
//! | `GET`    | `/citizens/died` | `?date=YYYY-MM-DD` |
//! | `GET`    | `/citizens/died/range` | `?start=&end=`, inclusive |
//! | `GET`    | `/citizens/statistics` | |
//! | `POST`   | `/citizens` | Returns 201 |
//! | `PUT`    | `/citizens/{id}` | Full replacement |
//! | `PUT`    | `/citizens/{id}/deceased` | `?death_date=YYYY-MM-DD` |
//! | `DELETE` | `/citizens/{id}` | 204 |

use axum::{
  Router,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, put},
};
use chrono::NaiveDate;
use registry_core::{
  citizen::{Citizen, CitizenStatistics, CitizenView, Gender, NewCitizen},
  page::Page,
  service::Services,
  store::RegistryStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
  records::PageParams,
};

pub fn mount<S>(router: Router<Services<S>>) -> Router<Services<S>>
where
  S: RegistryStore + 'static,
{
  router
    .route("/citizens", get(list_paged::<S>).post(create::<S>))
    .route("/citizens/all", get(list_all::<S>))
    .route("/citizens/gender/{gender}", get(by_gender::<S>))
    .route("/citizens/status/{code}", get(by_status::<S>))
    .route("/citizens/surname/{surname}", get(by_surname::<S>))
    .route("/citizens/firstname/{first_name}", get(by_first_name::<S>))
    .route("/citizens/name", get(by_full_name::<S>))
    .route("/citizens/alive", get(alive::<S>))
    .route("/citizens/alive/paged", get(alive_paged::<S>))
    .route("/citizens/search", get(search::<S>))
    .route("/citizens/died", get(died_on::<S>))
    .route("/citizens/died/range", get(died_between::<S>))
    .route("/citizens/statistics", get(statistics::<S>))
    .route(
      "/citizens/{id}",
      get(get_one::<S>).put(update::<S>).delete(remove::<S>),
    )
    .route("/citizens/{id}/view", get(view::<S>))
    .route("/citizens/{id}/deceased", put(mark_deceased::<S>))
}

// ─── Query parameters ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FullNameParams {
  #[serde(alias = "firstName")]
  pub first_name: String,
  pub surname:    String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  #[serde(alias = "searchTerm")]
  pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct DateParams {
  #[serde(alias = "registrationDate")]
  pub date: NaiveDate,
}

/// Inclusive date range.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
  #[serde(alias = "startDate")]
  pub start: NaiveDate,
  #[serde(alias = "endDate")]
  pub end:   NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DeceasedParams {
  #[serde(alias = "deathDate")]
  pub death_date: NaiveDate,
}

// ─── Reads ───────────────────────────────────────────────────────────────────

async fn list_paged<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_all_paged(params.request()?).await?))
}

async fn list_all<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_all().await?))
}

async fn get_one<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i32>,
) -> Result<Json<Citizen>, ApiError> {
  Ok(Json(svc.citizens.require(id).await?))
}

async fn view<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i32>,
) -> Result<Json<CitizenView>, ApiError> {
  let view = svc
    .citizens
    .resolve(id)
    .await?
    .ok_or_else(|| ApiError::not_found("citizen", id))?;
  Ok(Json(view))
}

async fn by_gender<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(gender): Path<Gender>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_gender(gender).await?))
}

async fn by_status<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(code): Path<String>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_status_code(&code).await?))
}

async fn by_surname<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(surname): Path<String>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_surname(&surname).await?))
}

async fn by_first_name<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(first_name): Path<String>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_first_name(&first_name).await?))
}

async fn by_full_name<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<FullNameParams>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  let found = svc
    .citizens
    .find_by_full_name(&params.first_name, &params.surname)
    .await?;
  Ok(Json(found))
}

async fn alive<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_alive().await?))
}

async fn alive_paged<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_alive_paged(params.request()?).await?))
}

async fn search<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.search_by_name(&params.term).await?))
}

async fn died_on<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<DateParams>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_died(params.date).await?))
}

async fn died_between<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
  Ok(Json(svc.citizens.find_by_died_between(params.start, params.end).await?))
}

async fn statistics<S: RegistryStore>(
  State(svc): State<Services<S>>,
) -> Result<Json<CitizenStatistics>, ApiError> {
  Ok(Json(svc.citizens.statistics().await?))
}

// ─── Writes ──────────────────────────────────────────────────────────────────

async fn create<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Json(body): Json<NewCitizen>,
) -> Result<impl IntoResponse, ApiError> {
  let citizen = svc.citizens.create_citizen(body).await?;
  Ok((StatusCode::CREATED, Json(citizen)))
}

async fn update<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i32>,
  Json(body): Json<NewCitizen>,
) -> Result<Json<Citizen>, ApiError> {
  Ok(Json(svc.citizens.update_citizen(id, body).await?))
}

async fn mark_deceased<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i32>,
  Query(params): Query<DeceasedParams>,
) -> Result<Json<Citizen>, ApiError> {
  Ok(Json(svc.citizens.mark_as_deceased(id, params.death_date).await?))
}

async fn remove<S: RegistryStore>(
  State(svc): State<Services<S>>,
  Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
  svc.citizens.delete_citizen(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
