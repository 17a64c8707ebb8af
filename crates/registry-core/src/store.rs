//! Store traits and the [`RegistryStore`] umbrella bound.
//!
//! The traits are implemented by storage backends (e.g.
//! `registry-store-sqlite`). Services in [`crate::service`] depend on these
//! abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  citizen::{Birth, Citizen, CitizenChange, Gender, Marriage},
  page::{Page, PageRequest},
  record::{Mutable, Record},
  reference::{
    Address, CitizenStatus, Constituency, Country, FirstName, Place, Surname,
  },
  voter::Voter,
};

// ─── Base ────────────────────────────────────────────────────────────────────

/// Shared error type for every trait a backend implements.
///
/// Backends must classify their failures into the core taxonomy when
/// converted: missing keys on update become [`crate::Error::NotFound`] and
/// unique/foreign-key/check failures become
/// [`crate::Error::ConstraintViolation`].
pub trait Store: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;
}

// ─── Generic record operations ───────────────────────────────────────────────

/// Insert and read operations available for every record type.
pub trait RecordStore<R: Record>: Store {
  /// Fetch one row by key. Returns `None` if not found.
  fn get(
    &self,
    id: R::Id,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// All rows in key order.
  fn list(&self) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// One page of rows in key order.
  fn page(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<Page<R>, Self::Error>> + Send + '_;

  /// Insert a row and return it with its generated key.
  fn create(
    &self,
    input: R::New,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;
}

/// Update and delete, only for records that allow them.
pub trait MutableRecordStore<R: Mutable>: RecordStore<R> {
  /// Replace the patchable fields of an existing row and return the stored
  /// result. Fails with a not-found error if `id` is absent.
  fn update(
    &self,
    id: R::Id,
    patch: R::Patch,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Hard-delete by key. Deleting an absent key is not an error; the return
  /// value reports whether a row was removed.
  fn delete(
    &self,
    id: R::Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Reference lookups ───────────────────────────────────────────────────────

/// Lookups over the reference tables and addresses. All string matches are
/// exact and case-sensitive.
pub trait ReferenceStore: Store {
  fn country_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  fn country_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  fn places_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Place>, Self::Error>> + Send + 'a;

  fn places_in_country(
    &self,
    country_id: i32,
  ) -> impl Future<Output = Result<Vec<Place>, Self::Error>> + Send + '_;

  fn constituency_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Constituency>, Self::Error>> + Send + 'a;

  fn status_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<CitizenStatus>, Self::Error>> + Send + 'a;

  fn first_names_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<FirstName>, Self::Error>> + Send + 'a;

  fn first_names_by_gender(
    &self,
    gender: Gender,
  ) -> impl Future<Output = Result<Vec<FirstName>, Self::Error>> + Send + '_;

  fn surnames_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Surname>, Self::Error>> + Send + 'a;

  fn addresses_by_postcode<'a>(
    &'a self,
    postcode: &'a str,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + 'a;

  fn addresses_in_constituency(
    &self,
    constituency_id: i32,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + '_;
}

// ─── Citizens ────────────────────────────────────────────────────────────────

/// Citizen filters. Name filters join through the dictionary tables.
pub trait CitizenStore: Store {
  fn citizens_by_gender(
    &self,
    gender: Gender,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + '_;

  fn citizens_by_status_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + 'a;

  fn citizens_by_surname<'a>(
    &'a self,
    surname: &'a str,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + 'a;

  fn citizens_by_first_name<'a>(
    &'a self,
    first_name: &'a str,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + 'a;

  fn citizens_by_full_name<'a>(
    &'a self,
    first_name: &'a str,
    surname: &'a str,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + 'a;

  /// Citizens whose `died` is unset.
  fn alive_citizens(
    &self,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + '_;

  fn alive_citizens_page(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<Page<Citizen>, Self::Error>> + Send + '_;

  fn citizens_died_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + '_;

  /// Inclusive on both ends.
  fn citizens_died_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match against first name or surname.
  fn search_citizens_by_name<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Citizen>, Self::Error>> + Send + 'a;

  /// Targeted update of the `died` column. Fails with not-found if `id` is
  /// absent.
  fn set_died(
    &self,
    id: i32,
    died: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Citizen, Self::Error>> + Send + '_;

  fn count_citizens(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_alive_citizens(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_citizens_by_gender(
    &self,
    gender: Gender,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

// ─── Civil records ───────────────────────────────────────────────────────────

/// Lookups over births, marriages and the change log.
pub trait CivilRecordStore: Store {
  /// The birth record of `citizen_id`, if any (at most one exists).
  fn birth_of(
    &self,
    citizen_id: i32,
  ) -> impl Future<Output = Result<Option<Birth>, Self::Error>> + Send + '_;

  /// Births naming `parent_id` as mother or father.
  fn children_of(
    &self,
    parent_id: i32,
  ) -> impl Future<Output = Result<Vec<Birth>, Self::Error>> + Send + '_;

  /// Marriages naming `citizen_id` as either party.
  fn marriages_of(
    &self,
    citizen_id: i32,
  ) -> impl Future<Output = Result<Vec<Marriage>, Self::Error>> + Send + '_;

  /// Marriages with no divorce date.
  fn active_marriages(
    &self,
  ) -> impl Future<Output = Result<Vec<Marriage>, Self::Error>> + Send + '_;

  /// Change-log entries for `citizen_id`, oldest first.
  fn changes_for(
    &self,
    citizen_id: i32,
  ) -> impl Future<Output = Result<Vec<CitizenChange>, Self::Error>> + Send + '_;
}

// ─── Voters ──────────────────────────────────────────────────────────────────

/// Electoral-roll filters. Geographic filters join
/// voter → address → constituency | place → country.
pub trait VoterStore: Store {
  fn voter_by_citizen(
    &self,
    citizen_id: i32,
  ) -> impl Future<Output = Result<Option<Voter>, Self::Error>> + Send + '_;

  fn voters_at_address(
    &self,
    address_id: i32,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + '_;

  fn voters_in_constituency(
    &self,
    constituency_id: i32,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + '_;

  fn voters_in_constituency_named<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  fn voters_by_postcode<'a>(
    &'a self,
    postcode: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  fn voters_by_place_name<'a>(
    &'a self,
    place: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  fn voters_by_country_name<'a>(
    &'a self,
    country: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  fn voters_by_open_register(
    &self,
    open_register: bool,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + '_;

  fn open_register_page(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<Page<Voter>, Self::Error>> + Send + '_;

  fn voters_registered_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + '_;

  /// Inclusive on both ends.
  fn voters_registered_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + '_;

  /// Targeted update of the open-register flag. Fails with not-found if `id`
  /// is absent.
  fn set_open_register(
    &self,
    id: i64,
    open_register: bool,
  ) -> impl Future<Output = Result<Voter, Self::Error>> + Send + '_;

  /// Targeted update of the address binding. Fails with not-found if `id` is
  /// absent.
  fn set_voter_address(
    &self,
    id: i64,
    address_id: i32,
  ) -> impl Future<Output = Result<Voter, Self::Error>> + Send + '_;

  fn count_voters(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_voters_by_open_register(
    &self,
    open_register: bool,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_voters_in_constituency(
    &self,
    constituency_id: i32,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

// ─── Umbrella ────────────────────────────────────────────────────────────────

/// Everything a complete registry backend provides. Implemented automatically
/// for any type implementing all the component traits.
pub trait RegistryStore:
  ReferenceStore
  + CitizenStore
  + CivilRecordStore
  + VoterStore
  + MutableRecordStore<Country>
  + MutableRecordStore<Place>
  + MutableRecordStore<Constituency>
  + MutableRecordStore<CitizenStatus>
  + MutableRecordStore<FirstName>
  + MutableRecordStore<Surname>
  + MutableRecordStore<Address>
  + MutableRecordStore<Citizen>
  + MutableRecordStore<Birth>
  + MutableRecordStore<Marriage>
  + MutableRecordStore<Voter>
  + RecordStore<CitizenChange>
{
}

impl<T> RegistryStore for T where
  T: ReferenceStore
    + CitizenStore
    + CivilRecordStore
    + VoterStore
    + MutableRecordStore<Country>
    + MutableRecordStore<Place>
    + MutableRecordStore<Constituency>
    + MutableRecordStore<CitizenStatus>
    + MutableRecordStore<FirstName>
    + MutableRecordStore<Surname>
    + MutableRecordStore<Address>
    + MutableRecordStore<Citizen>
    + MutableRecordStore<Birth>
    + MutableRecordStore<Marriage>
    + MutableRecordStore<Voter>
    + RecordStore<CitizenChange>
{
}
