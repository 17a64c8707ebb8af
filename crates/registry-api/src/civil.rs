//! Lookup handlers for births, marriages and the change log.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/births/citizen/{id}` | 404 if the citizen has no birth record |
//! | `GET`  | `/births/parent/{id}` | Births naming the citizen as mother or father |
//! | `GET`  | `/marriages/citizen/{id}` | Either party |
//! | `GET`  | `/marriages/active` | No divorce date |
//! | `POST` | `/citizen-changes` | Append a change-log entry; returns 201 |
//! | `GET`  | `/citizen-changes/citizen/{id}` | Oldest first |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use registry_core::{
  citizen::{Birth, CitizenChange, Marriage, NewCitizenChange},
  service::Services,
  store::{CivilRecordStore, RecordStore},
};

use crate::{
  error::ApiError,
  extract::{Json, Path},
};

pub async fn birth_of<S>(
  State(svc): State<Services<S>>,
  Path(citizen_id): Path<i32>,
) -> Result<Json<Birth>, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  let birth = svc
    .civil
    .birth_of(citizen_id)
    .await?
    .ok_or_else(|| ApiError::not_found("birth of citizen", citizen_id))?;
  Ok(Json(birth))
}

pub async fn children_of<S>(
  State(svc): State<Services<S>>,
  Path(parent_id): Path<i32>,
) -> Result<Json<Vec<Birth>>, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  Ok(Json(svc.civil.children_of(parent_id).await?))
}

pub async fn marriages_of<S>(
  State(svc): State<Services<S>>,
  Path(citizen_id): Path<i32>,
) -> Result<Json<Vec<Marriage>>, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  Ok(Json(svc.civil.marriages_of(citizen_id).await?))
}

pub async fn active_marriages<S>(
  State(svc): State<Services<S>>,
) -> Result<Json<Vec<Marriage>>, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  Ok(Json(svc.civil.active_marriages().await?))
}

pub async fn changes_for<S>(
  State(svc): State<Services<S>>,
  Path(citizen_id): Path<i32>,
) -> Result<Json<Vec<CitizenChange>>, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  Ok(Json(svc.civil.changes_for(citizen_id).await?))
}

pub async fn record_change<S>(
  State(svc): State<Services<S>>,
  Json(body): Json<NewCitizenChange>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CivilRecordStore + RecordStore<CitizenChange>,
{
  let change = svc.civil.record_change(body).await?;
  Ok((StatusCode::CREATED, Json(change)))
}
