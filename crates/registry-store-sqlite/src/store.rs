//! [`SqliteStore`]: the SQLite implementation of the registry store traits.
//!
//! Generic record operations live here; the entity-specific lookups are in
//! the sibling `reference`, `citizen` and `voter` modules.

use std::path::Path;

use rusqlite::{functions::FunctionFlags, params_from_iter, types::Value};
use tracing::trace;

use registry_core::{
  page::{Page, PageRequest},
  store::{MutableRecordStore, RecordStore, Store},
};

use crate::{
  Error, Result,
  record::{SqlMutable, SqlRecord, select_list},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A registry store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection handle is shared.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.create_scalar_function(
          "casefold",
          1,
          FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
          |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Query helpers ─────────────────────────────────────────────────────────
  //
  // `clause` is spliced between `FROM <table> t` and `ORDER BY`, so it may
  // carry joins and a `WHERE`. It and `order` must only ever be literals from
  // this crate; values always travel as bound parameters.

  /// All rows of `R` matching `clause`, in key order.
  pub(crate) async fn select<R: SqlRecord>(
    &self,
    clause: &str,
    params: Vec<Value>,
  ) -> Result<Vec<R>> {
    self.select_ordered(clause, "t.id", params).await
  }

  /// All rows of `R` matching `clause`, sorted by the `order` expression.
  pub(crate) async fn select_ordered<R: SqlRecord>(
    &self,
    clause: &str,
    order: &str,
    params: Vec<Value>,
  ) -> Result<Vec<R>> {
    let sql = format!(
      "SELECT {} FROM {} t {clause} ORDER BY {order}",
      select_list::<R>(),
      R::TABLE
    );
    trace!(%sql, "select");

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), R::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// The first row of `R` matching `clause`, if any.
  pub(crate) async fn select_one<R: SqlRecord>(
    &self,
    clause: &str,
    params: Vec<Value>,
  ) -> Result<Option<R>> {
    Ok(self.select(clause, params).await?.into_iter().next())
  }

  /// Number of rows of `table t` matching `clause`.
  pub(crate) async fn count(
    &self,
    table: &str,
    clause: &str,
    params: Vec<Value>,
  ) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {table} t {clause}");

    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, params_from_iter(params), |r| r.get(0))?))
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }

  /// One page of the rows matching `clause`, in key order, together with the
  /// total match count. Both are read inside the same connection call.
  pub(crate) async fn select_page<R: SqlRecord>(
    &self,
    clause: &str,
    params: Vec<Value>,
    request: PageRequest,
  ) -> Result<Page<R>> {
    let count_sql = format!("SELECT COUNT(*) FROM {} t {clause}", R::TABLE);
    let page_sql = format!(
      "SELECT {} FROM {} t {clause} ORDER BY t.id LIMIT {} OFFSET {}",
      select_list::<R>(),
      R::TABLE,
      request.size(),
      request.offset(),
    );

    let (total, content) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row(&count_sql, params_from_iter(params.iter()), |r| r.get(0))?;
        let mut stmt = conn.prepare(&page_sql)?;
        let content = stmt
          .query_map(params_from_iter(params.iter()), R::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((total, content))
      })
      .await?;

    Ok(Page::new(content, request, u64::try_from(total).unwrap_or_default()))
  }

  /// Rewrite the columns named in `assignments` (e.g. `"died = ?2"`) on the
  /// row keyed `id`, which is always bound as `?1`, and return the stored
  /// row. A missing row is [`Error::NotFound`].
  pub(crate) async fn patch<R: SqlRecord>(
    &self,
    id: i64,
    assignments: &str,
    values: Vec<Value>,
  ) -> Result<R> {
    let update_sql = format!("UPDATE {} SET {assignments} WHERE id = ?1", R::TABLE);
    let select_sql = format!("SELECT {} FROM {} t WHERE t.id = ?1", select_list::<R>(), R::TABLE);
    let params: Vec<Value> = std::iter::once(Value::Integer(id)).chain(values).collect();

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(&update_sql, params_from_iter(params))?;
        if changed == 0 {
          return Ok(None);
        }
        let row = tx.query_row(&select_sql, [id], R::from_row)?;
        tx.commit()?;
        Ok(Some(row))
      })
      .await?;

    row.ok_or(Error::NotFound { entity: R::ENTITY, id })
  }
}

impl Store for SqliteStore {
  type Error = Error;
}

// ─── Generic record operations ───────────────────────────────────────────────

impl<R: SqlRecord> RecordStore<R> for SqliteStore {
  async fn get(&self, id: R::Id) -> Result<Option<R>> {
    let id: i64 = id.into();
    self.select_one("WHERE t.id = ?1", vec![Value::Integer(id)]).await
  }

  async fn list(&self) -> Result<Vec<R>> { self.select("", Vec::new()).await }

  async fn page(&self, request: PageRequest) -> Result<Page<R>> {
    self.select_page("", Vec::new(), request).await
  }

  async fn create(&self, input: R::New) -> Result<R> {
    let values = R::insert_values(&input)?;
    let placeholders = (1..=R::COLUMNS.len())
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let insert_sql = format!(
      "INSERT INTO {} ({}) VALUES ({placeholders})",
      R::TABLE,
      R::COLUMNS.join(", ")
    );
    let select_sql = format!("SELECT {} FROM {} t WHERE t.id = ?1", select_list::<R>(), R::TABLE);

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(&insert_sql, params_from_iter(values))?;
        let id = tx.last_insert_rowid();
        let row = tx.query_row(&select_sql, [id], R::from_row)?;
        tx.commit()?;
        Ok(row)
      })
      .await?;
    Ok(row)
  }
}

impl<R: SqlMutable> MutableRecordStore<R> for SqliteStore {
  async fn update(&self, id: R::Id, patch: R::Patch) -> Result<R> {
    let values = R::update_values(&patch)?;
    let assignments = R::UPDATE_COLUMNS
      .iter()
      .enumerate()
      .map(|(i, c)| format!("{c} = ?{}", i + 2))
      .collect::<Vec<_>>()
      .join(", ");
    self.patch(id.into(), &assignments, values).await
  }

  async fn delete(&self, id: R::Id) -> Result<bool> {
    let id: i64 = id.into();
    let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, [id])?))
      .await?;
    Ok(removed > 0)
  }
}
