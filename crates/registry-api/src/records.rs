//! Generic CRUD handlers, mounted once per record type.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `{base}`         | Every row, in key order |
//! | `GET`    | `{base}/paged`   | `?page=0&size=20` |
//! | `POST`   | `{base}`         | Returns 201 + stored row |
//! | `GET`    | `{base}/{id}`    | 404 if not found |
//! | `PUT`    | `{base}/{id}`    | Full replacement; 404 if not found |
//! | `DELETE` | `{base}/{id}`    | 204, also when already absent |

use axum::{
  Router,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
  routing::get,
};
use registry_core::{
  page::{Page, PageRequest},
  record::{Mutable, Record},
  service::Services,
  store::{MutableRecordStore, RecordStore, RegistryStore},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Paging ──────────────────────────────────────────────────────────────────

/// `?page=&size=`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  pub page: Option<i64>,
  pub size: Option<i64>,
}

impl PageParams {
  pub fn request(&self) -> Result<PageRequest, ApiError> {
    Ok(PageRequest::new(
      self.page.unwrap_or(0),
      self.size.unwrap_or(i64::from(PageRequest::DEFAULT_SIZE)),
    )?)
  }
}

// ─── Mounting ────────────────────────────────────────────────────────────────

/// Add the full CRUD surface for `R` under `base`.
pub fn mount<S, R>(router: Router<Services<S>>, base: &str) -> Router<Services<S>>
where
  S: RegistryStore + MutableRecordStore<R> + 'static,
  R: Mutable,
{
  router
    .route(base, get(list::<S, R>).post(create::<S, R>))
    .route(&format!("{base}/paged"), get(page::<S, R>))
    .route(
      &format!("{base}/{{id}}"),
      get(get_one::<S, R>).put(update::<S, R>).delete(remove::<S, R>),
    )
}

// ─── Handlers ────────────────────────────────────────────────────────────────

pub async fn list<S, R>(State(svc): State<Services<S>>) -> Result<Json<Vec<R>>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  Ok(Json(svc.records.list::<R>().await?))
}

pub async fn page<S, R>(
  State(svc): State<Services<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<R>>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  Ok(Json(svc.records.page::<R>(params.request()?).await?))
}

pub async fn get_one<S, R>(
  State(svc): State<Services<S>>,
  Path(id): Path<R::Id>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let record = svc
    .records
    .get::<R>(id)
    .await?
    .ok_or_else(|| ApiError::not_found(R::ENTITY, id))?;
  Ok(Json(record))
}

pub async fn create<S, R>(
  State(svc): State<Services<S>>,
  Json(body): Json<R::New>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore<R>,
  R: Record,
{
  let record = svc.records.create::<R>(body).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<S, R>(
  State(svc): State<Services<S>>,
  Path(id): Path<R::Id>,
  Json(body): Json<R::Patch>,
) -> Result<Json<R>, ApiError>
where
  S: MutableRecordStore<R>,
  R: Mutable,
{
  Ok(Json(svc.records.update::<R>(id, body).await?))
}

pub async fn remove<S, R>(
  State(svc): State<Services<S>>,
  Path(id): Path<R::Id>,
) -> Result<StatusCode, ApiError>
where
  S: MutableRecordStore<R>,
  R: Mutable,
{
  svc.records.delete::<R>(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
