use registry_core::{
  citizen::{Birth, CitizenChange, Marriage, NewBirth, NewCitizenChange, NewMarriage},
  page::PageRequest,
  reference::{CitizenStatus, NewCitizenStatus},
  store::{CitizenStore, CivilRecordStore},
};
use serde_json::json;

use super::*;
use crate::Error;

/// John Smith (M) and Jane Jones (F).
async fn two_citizens(s: &SqliteStore) -> (Citizen, Citizen) {
  let john = first_name(s, "John", Gender::M).await;
  let jane = first_name(s, "Jane", Gender::F).await;
  let smith = surname(s, "Smith").await;
  let jones = surname(s, "Jones").await;
  (citizen(s, &john, &smith).await, citizen(s, &jane, &jones).await)
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn citizen_with_no_references_round_trips() {
  let s = store().await;
  let c = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();
  assert_eq!(c.gender, None);
  assert!(c.is_alive());
  assert_eq!(RecordStore::<Citizen>::get(&s, c.id).await.unwrap(), Some(c));
}

// ─── Name filters ────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_case_insensitive_substring() {
  let s = store().await;
  let (smith, jones) = two_citizens(&s).await;

  let found = s.search_citizens_by_name("mit").await.unwrap();
  assert_eq!(found, vec![smith.clone()]);
  assert!(!found.contains(&jones));

  let found = s.search_citizens_by_name("JO").await.unwrap();
  assert_eq!(found, vec![smith, jones]);
}

#[tokio::test]
async fn search_folds_case_beyond_ascii() {
  let s = store().await;
  let zoe = first_name(&s, "Zoë", Gender::F).await;
  let okland = surname(&s, "Ökland").await;
  let c = citizen(&s, &zoe, &okland).await;

  for term in ["ÖK", "ök", "ZOË", "zoë"] {
    assert_eq!(s.search_citizens_by_name(term).await.unwrap(), vec![c.clone()], "{term}");
  }
  assert!(s.search_citizens_by_name("ok").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
  let s = store().await;
  two_citizens(&s).await;
  assert!(s.search_citizens_by_name("%").await.unwrap().is_empty());
  assert!(s.search_citizens_by_name("J_n").await.unwrap().is_empty());
}

#[tokio::test]
async fn name_filters_join_the_dictionaries() {
  let s = store().await;
  let (smith, jones) = two_citizens(&s).await;

  assert_eq!(s.citizens_by_surname("Smith").await.unwrap(), vec![smith.clone()]);
  assert_eq!(s.citizens_by_first_name("Jane").await.unwrap(), vec![jones.clone()]);
  assert_eq!(s.citizens_by_full_name("John", "Smith").await.unwrap(), vec![smith.clone()]);
  assert!(s.citizens_by_full_name("John", "Jones").await.unwrap().is_empty());
  assert_eq!(s.citizens_by_gender(Gender::F).await.unwrap(), vec![jones]);
}

#[tokio::test]
async fn citizens_by_status_code() {
  let s = store().await;
  let status = RecordStore::<CitizenStatus>::create(&s, NewCitizenStatus {
    code:        "EMIG".into(),
    description: Some("Emigrated".into()),
  })
  .await
  .unwrap();
  let c = RecordStore::<Citizen>::create(&s, NewCitizen {
    status_id: Some(status.id),
    ..NewCitizen::default()
  })
  .await
  .unwrap();
  RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();

  assert_eq!(s.citizens_by_status_code("EMIG").await.unwrap(), vec![c]);
}

// ─── Death ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_as_deceased_sets_died() {
  let s = store().await;
  let svc = services(&s);
  let (smith, _) = two_citizens(&s).await;

  let updated = svc.citizens.mark_as_deceased(smith.id, date(2020, 1, 1)).await.unwrap();
  assert!(!updated.is_alive());

  let fetched = svc.citizens.require(smith.id).await.unwrap();
  assert!(!fetched.is_alive());
  assert_eq!(fetched.died, Some(date(2020, 1, 1)));
}

#[tokio::test]
async fn mark_as_deceased_missing_is_not_found() {
  let s = store().await;
  let err = services(&s)
    .citizens
    .mark_as_deceased(404, date(2020, 1, 1))
    .await
    .unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn alive_filters_exclude_the_dead() {
  let s = store().await;
  let (smith, jones) = two_citizens(&s).await;
  s.set_died(smith.id, Some(date(2021, 6, 1))).await.unwrap();

  let alive = s.alive_citizens().await.unwrap();
  assert_eq!(alive.iter().map(|c| c.id).collect::<Vec<_>>(), vec![jones.id]);
  assert_eq!(s.count_alive_citizens().await.unwrap(), 1);

  let page = s.alive_citizens_page(PageRequest::default()).await.unwrap();
  assert_eq!(page.total_elements, 1);
  assert!(page.content.iter().all(Citizen::is_alive));
}

#[tokio::test]
async fn died_range_is_inclusive() {
  let s = store().await;
  let f = first_name(&s, "Ann", Gender::F).await;
  let l = surname(&s, "Lee").await;
  for died in [date(2020, 1, 1), date(2020, 6, 15), date(2020, 12, 31), date(2021, 1, 1)] {
    let c = citizen(&s, &f, &l).await;
    s.set_died(c.id, Some(died)).await.unwrap();
  }

  let in_2020 = s.citizens_died_between(date(2020, 1, 1), date(2020, 12, 31)).await.unwrap();
  assert_eq!(in_2020.len(), 3);
  assert_eq!(s.citizens_died_on(date(2020, 6, 15)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_died_missing_is_not_found() {
  let s = store().await;
  let err = s.set_died(12, Some(date(2020, 1, 1))).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "citizen", id: 12 }));
}

// ─── Service ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_fetches_name_parts() {
  let s = store().await;
  let (smith, _) = two_citizens(&s).await;

  let view = services(&s).citizens.resolve(smith.id).await.unwrap().unwrap();
  assert_eq!(view.full_name, "John Smith");
  assert!(view.alive);
  assert!(view.status.is_none());
}

#[tokio::test]
async fn statistics_count_by_gender_and_life() {
  let s = store().await;
  let svc = services(&s);
  let (smith, _) = two_citizens(&s).await;
  RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();
  svc.citizens.mark_as_deceased(smith.id, date(2019, 3, 3)).await.unwrap();

  let stats = svc.citizens.statistics().await.unwrap();
  assert_eq!(stats.total, 3);
  assert_eq!(stats.alive, 2);
  assert_eq!(stats.deceased, 1);
  assert_eq!(stats.male, 1);
  assert_eq!(stats.female, 1);
}

#[tokio::test]
async fn delete_citizen_is_idempotent_and_update_missing_fails() {
  let s = store().await;
  let svc = services(&s);
  let c = svc.citizens.create_citizen(NewCitizen::default()).await.unwrap();

  svc.citizens.delete_citizen(c.id).await.unwrap();
  svc.citizens.delete_citizen(c.id).await.unwrap();
  assert!(svc.citizens.find_by_id(c.id).await.unwrap().is_none());

  let err = svc.citizens.update_citizen(c.id, NewCitizen::default()).await.unwrap_err();
  assert!(err.is_not_found());
}

// ─── Births and marriages ────────────────────────────────────────────────────

#[tokio::test]
async fn births_link_children_to_parents() {
  let s = store().await;
  let (father, mother) = two_citizens(&s).await;
  let child = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();

  let birth = RecordStore::<Birth>::create(&s, NewBirth {
    citizen_id: child.id,
    birth_date: date(2010, 5, 5),
    mother_id:  Some(mother.id),
    father_id:  Some(father.id),
  })
  .await
  .unwrap();

  assert_eq!(s.birth_of(child.id).await.unwrap(), Some(birth.clone()));
  assert_eq!(s.children_of(mother.id).await.unwrap(), vec![birth.clone()]);
  assert_eq!(s.children_of(father.id).await.unwrap(), vec![birth]);
  assert!(s.birth_of(mother.id).await.unwrap().is_none());
}

#[tokio::test]
async fn second_birth_for_citizen_is_rejected() {
  let s = store().await;
  let child = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();
  let birth = |d| NewBirth { citizen_id: child.id, birth_date: d, mother_id: None, father_id: None };

  RecordStore::<Birth>::create(&s, birth(date(2010, 5, 5))).await.unwrap();
  let err = RecordStore::<Birth>::create(&s, birth(date(2011, 5, 5))).await.unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");
}

#[tokio::test]
async fn marriages_by_party_and_activity() {
  let s = store().await;
  let (a, b) = two_citizens(&s).await;
  let c = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();

  let first = RecordStore::<Marriage>::create(&s, NewMarriage {
    person1_id:    a.id,
    person2_id:    b.id,
    marriage_date: date(2000, 1, 1),
    divorce_date:  Some(date(2005, 1, 1)),
  })
  .await
  .unwrap();
  let second = RecordStore::<Marriage>::create(&s, NewMarriage {
    person1_id:    c.id,
    person2_id:    a.id,
    marriage_date: date(2007, 1, 1),
    divorce_date:  None,
  })
  .await
  .unwrap();

  assert_eq!(s.marriages_of(a.id).await.unwrap(), vec![first, second.clone()]);
  assert_eq!(s.active_marriages().await.unwrap(), vec![second]);
}

// ─── Change log ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn change_details_are_stored_verbatim() {
  let s = store().await;
  let svc = services(&s);
  let c = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();
  let details = json!({ "field": "surname", "from": "Smith", "to": ["Jones", 2, null] });

  let change = svc
    .civil
    .record_change(NewCitizenChange {
      citizen_id:  c.id,
      change_date: date(2022, 2, 2),
      details:     details.clone(),
    })
    .await
    .unwrap();
  assert_eq!(change.details, details);

  let fetched = RecordStore::<CitizenChange>::get(&s, change.id).await.unwrap().unwrap();
  assert_eq!(fetched.details, details);
}

#[tokio::test]
async fn changes_are_listed_oldest_first() {
  let s = store().await;
  let c = RecordStore::<Citizen>::create(&s, NewCitizen::default()).await.unwrap();
  for (d, n) in [(date(2022, 3, 1), 1), (date(2021, 1, 1), 2), (date(2022, 3, 1), 3)] {
    RecordStore::<CitizenChange>::create(&s, NewCitizenChange {
      citizen_id:  c.id,
      change_date: d,
      details:     json!({ "n": n }),
    })
    .await
    .unwrap();
  }

  let changes = s.changes_for(c.id).await.unwrap();
  let order: Vec<_> = changes.iter().map(|ch| ch.details["n"].as_i64().unwrap()).collect();
  assert_eq!(order, vec![2, 1, 3]);
}
