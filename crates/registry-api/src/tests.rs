//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use registry_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

/// Creates John Smith and Jane Jones and returns their citizen ids.
async fn two_citizens(app: &Router) -> (i64, i64) {
  let mut ids = Vec::new();
  for (first, gender, last) in [("John", "M", "Smith"), ("Jane", "F", "Jones")] {
    let (_, f) = send(app, "POST", "/first-names", Some(json!({ "name": first, "gender": gender }))).await;
    let (_, s) = send(app, "POST", "/surnames", Some(json!({ "name": last }))).await;
    let (status, c) = send(
      app,
      "POST",
      "/citizens",
      Some(json!({
        "first_name_id": f["id"],
        "surname_id": s["id"],
        "gender": gender,
        "status_id": null,
        "died": null,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    ids.push(c["id"].as_i64().unwrap());
  }
  (ids[0], ids[1])
}

async fn address(app: &Router, line: &str) -> i64 {
  let (status, a) = send(
    app,
    "POST",
    "/addresses",
    Some(json!({ "address": line, "place_id": null, "postcode": "D01", "constituency_id": null })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  a["id"].as_i64().unwrap()
}

// ─── Generic records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn country_crud_round_trip() {
  let app = app().await;

  let (status, created) =
    send(&app, "POST", "/countries", Some(json!({ "name": "Ireland", "code": "IE" }))).await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_i64().unwrap();

  let (status, fetched) = send(&app, "GET", &format!("/countries/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);

  let (status, by_code) = send(&app, "GET", "/countries/code/IE", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(by_code["name"], "Ireland");

  let (status, updated) = send(
    &app,
    "PUT",
    &format!("/countries/{id}"),
    Some(json!({ "name": "Éire", "code": "IE" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["name"], "Éire");

  let (status, _) = send(&app, "DELETE", &format!("/countries/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "DELETE", &format!("/countries/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = send(&app, "GET", &format!("/countries/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_missing_returns_404() {
  let app = app().await;
  let (status, _) = send(&app, "PUT", "/surnames/7", Some(json!({ "name": "Ghost" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_unique_field_returns_409() {
  let app = app().await;
  let body = json!({ "code": "ACT", "description": "Active" });
  let (status, _) = send(&app, "POST", "/citizen-statuses", Some(body.clone())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, err) = send(&app, "POST", "/citizen-statuses", Some(body)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(err["error"].is_string());
}

#[tokio::test]
async fn paging_defaults_and_validation() {
  let app = app().await;
  for name in ["A", "B", "C"] {
    send(&app, "POST", "/surnames", Some(json!({ "name": name }))).await;
  }

  let (status, page) = send(&app, "GET", "/surnames/paged", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(page["size"], 20);
  assert_eq!(page["total_elements"], 3);

  let (_, page) = send(&app, "GET", "/surnames/paged?page=1&size=2", None).await;
  assert_eq!(page["content"].as_array().unwrap().len(), 1);
  assert_eq!(page["total_pages"], 2);

  let (status, _) = send(&app, "GET", "/surnames/paged?size=0", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, _) = send(&app, "GET", "/surnames/paged?page=-1", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) =
    send(&app, "GET", "/surnames/paged?page=4294967295&size=4294967295", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

// ─── Citizens ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_deceased_removes_from_alive() {
  let app = app().await;
  let (smith, jones) = two_citizens(&app).await;

  let (status, c) = send(
    &app,
    "PUT",
    &format!("/citizens/{smith}/deceased?death_date=2020-01-01"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(c["died"], "2020-01-01");

  let (_, alive) = send(&app, "GET", "/citizens/alive", None).await;
  let ids: Vec<i64> = alive.as_array().unwrap().iter().map(|c| c["id"].as_i64().unwrap()).collect();
  assert_eq!(ids, vec![jones]);

  let (_, stats) = send(&app, "GET", "/citizens/statistics", None).await;
  assert_eq!(stats["total"], 2);
  assert_eq!(stats["deceased"], 1);

  let (status, _) = send(&app, "PUT", "/citizens/999/deceased?death_date=2020-01-01", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_and_view() {
  let app = app().await;
  let (smith, _) = two_citizens(&app).await;

  let (status, found) = send(&app, "GET", "/citizens/search?term=mit", None).await;
  assert_eq!(status, StatusCode::OK);
  let found = found.as_array().unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0]["id"], smith);

  let (status, view) = send(&app, "GET", &format!("/citizens/{smith}/view"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(view["full_name"], "John Smith");

  let (_, by_name) =
    send(&app, "GET", "/citizens/name?first_name=Jane&surname=Jones", None).await;
  assert_eq!(by_name.as_array().unwrap().len(), 1);

  let (_, page) = send(&app, "GET", "/citizens?size=1", None).await;
  assert_eq!(page["total_pages"], 2);
}

#[tokio::test]
async fn unknown_gender_is_rejected() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/citizens/gender/X", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
  let (status, _) = send(&app, "GET", "/citizens/gender/F", None).await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_input_gets_json_error_body() {
  let app = app().await;

  for uri in [
    "/citizens/abc",
    "/citizens/search",
    "/citizens/died?date=yesterday",
    "/voters/registration-date/range?start=2020-01-01",
    "/surnames/paged?page=x",
  ] {
    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert!(body["error"].is_string(), "{uri}: {body}");
  }

  let (status, body) = send(&app, "POST", "/countries", Some(json!({ "code": "IE" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn camel_case_query_names_are_accepted() {
  let app = app().await;
  let (smith, _) = two_citizens(&app).await;

  let (status, found) = send(&app, "GET", "/citizens/search?searchTerm=mit", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(found[0]["id"], smith);

  let (status, _) =
    send(&app, "GET", "/citizens/name?firstName=John&surname=Smith", None).await;
  assert_eq!(status, StatusCode::OK);

  let (status, c) = send(
    &app,
    "PUT",
    &format!("/citizens/{smith}/deceased?deathDate=2021-02-03"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(c["died"], "2021-02-03");

  let (status, _) = send(
    &app,
    "GET",
    "/voters/registration-date/range?startDate=2019-01-01&endDate=2019-12-31",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
}

// ─── Voters ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_register_flow() {
  let app = app().await;
  let (smith, _) = two_citizens(&app).await;
  let home = address(&app, "1 Main St").await;

  let (status, voter) = send(
    &app,
    "POST",
    "/voters",
    Some(json!({
      "citizen_id": smith,
      "address_id": home,
      "open_register": true,
      "registration_date": "2019-05-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = voter["id"].as_i64().unwrap();

  let (_, open) = send(&app, "GET", "/voters/open-register", None).await;
  assert_eq!(open.as_array().unwrap().len(), 1);

  let (status, _) = send(
    &app,
    "PUT",
    &format!("/voters/{id}/open-register?on_open_register=false"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, open) = send(&app, "GET", "/voters/open-register", None).await;
  assert!(open.as_array().unwrap().is_empty());
  let (_, closed) = send(&app, "GET", "/voters/closed-register", None).await;
  assert_eq!(closed[0]["id"], id);

  let (status, by_citizen) = send(&app, "GET", &format!("/voters/citizen/{smith}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(by_citizen["id"], id);
}

#[tokio::test]
async fn update_address_status_codes() {
  let app = app().await;
  let (smith, _) = two_citizens(&app).await;
  let home = address(&app, "1 Main St").await;
  let office = address(&app, "9 Quay").await;

  let (_, voter) = send(
    &app,
    "POST",
    "/voters",
    Some(json!({ "citizen_id": smith, "address_id": home, "registration_date": "2019-05-01" })),
  )
  .await;
  let id = voter["id"].as_i64().unwrap();

  let (status, moved) =
    send(&app, "PUT", &format!("/voters/{id}/address?address_id={office}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(moved["address_id"], office);

  let (status, _) = send(&app, "PUT", &format!("/voters/{id}/address?address_id=999"), None).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, _) = send(&app, "PUT", &format!("/voters/{}/address?address_id={office}", id + 50), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Change log ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn citizen_changes_are_append_only() {
  let app = app().await;
  let (smith, _) = two_citizens(&app).await;

  let details = json!({ "field": "address", "note": "moved" });
  let (status, change) = send(
    &app,
    "POST",
    "/citizen-changes",
    Some(json!({ "citizen_id": smith, "change_date": "2023-04-05", "details": details })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(change["details"], details);
  let id = change["id"].as_i64().unwrap();

  let (_, listed) = send(&app, "GET", &format!("/citizen-changes/citizen/{smith}"), None).await;
  assert_eq!(listed.as_array().unwrap().len(), 1);

  let (status, _) = send(&app, "DELETE", &format!("/citizen-changes/{id}"), None).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ─── CORS ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn any_origin_is_allowed() {
  let app = app().await;
  let req = Request::builder()
    .uri("/countries")
    .header(header::ORIGIN, "https://example.org")
    .body(Body::empty())
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
    "*"
  );
}
