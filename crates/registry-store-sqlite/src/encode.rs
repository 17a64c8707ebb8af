//! Encoding and decoding helpers between Rust domain types and the values
//! stored in SQLite columns.
//!
//! Calendar dates are stored as ISO `YYYY-MM-DD` text, which sorts and
//! compares correctly as a string. Booleans are `0`/`1` integers. The
//! change-log payload is compact JSON text.

use chrono::NaiveDate;
use registry_core::citizen::Gender;
use rusqlite::{
  Row,
  types::{Type, Value},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Parameters ──────────────────────────────────────────────────────────────

pub fn int(v: impl Into<i64>) -> Value { Value::Integer(v.into()) }

pub fn opt_int(v: Option<i32>) -> Value { v.map_or(Value::Null, int) }

pub fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

pub fn opt_text(s: Option<&str>) -> Value { s.map_or(Value::Null, text) }

pub fn flag(b: bool) -> Value { Value::Integer(i64::from(b)) }

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn date(d: NaiveDate) -> Value { Value::Text(encode_date(d)) }

pub fn opt_date(d: Option<NaiveDate>) -> Value { d.map_or(Value::Null, date) }

pub fn gender(g: Option<Gender>) -> Value { g.map_or(Value::Null, |g| text(g.as_str())) }

pub fn json(v: &serde_json::Value) -> crate::Result<Value> {
  Ok(Value::Text(serde_json::to_string(v)?))
}

// ─── Columns ─────────────────────────────────────────────────────────────────

fn conversion_failure(
  idx: usize,
  e: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
}

fn decode_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| conversion_failure(idx, e))
}

pub fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
  let s: String = row.get(idx)?;
  decode_date(idx, &s)
}

pub fn opt_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
  let s: Option<String> = row.get(idx)?;
  s.map(|s| decode_date(idx, &s)).transpose()
}

pub fn gender_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Gender>> {
  let s: Option<String> = row.get(idx)?;
  s.map(|s| {
    Gender::from_code(&s).ok_or_else(|| conversion_failure(idx, format!("unknown gender: {s:?}")))
  })
  .transpose()
}

pub fn flag_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
  let n: i64 = row.get(idx)?;
  Ok(n != 0)
}

/// A NULL payload decodes as JSON `null`.
pub fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<serde_json::Value> {
  let s: Option<String> = row.get(idx)?;
  match s {
    Some(s) => serde_json::from_str(&s).map_err(|e| conversion_failure(idx, e)),
    None => Ok(serde_json::Value::Null),
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Escape `%`, `_` and the escape character itself so `term` matches
/// literally inside a `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(term: &str) -> String {
  let mut out = String::with_capacity(term.len());
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}
