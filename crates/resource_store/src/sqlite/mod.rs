//! SQLite storage backend.
//!
//! Each entity lives in its own table named after its collection, with an
//! `INTEGER PRIMARY KEY AUTOINCREMENT` id so that ids are never reused.

mod schema;

use std::{marker::PhantomData, str::FromStr, time::Duration};

use async_trait::async_trait;
use entities::Entity;
use sqlx::{
    sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    FromRow, Sqlite, SqlitePool,
};

use crate::{StorageBackend, StoreResult};

/// A query under construction against the SQLite pool.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Column mapping for an entity stored in SQLite.
pub trait SqlTable: Entity {
    /// Row type decoded from `SELECT id, <COLUMNS>`.
    type Row: for<'r> FromRow<'r, SqliteRow> + Into<Self> + Send + Unpin;

    /// Non-id columns, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Binds the creation payload, one value per column.
    fn bind_base<'q>(base: &'q Self::Base, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Binds this record's non-id fields, one value per column.
    fn bind_fields<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// SQLite connection pool with the schema applied.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects to `url` and creates any missing tables.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.create_tables().await?;

        tracing::info!(url, max_connections, "Connected to database");

        Ok(db)
    }

    /// Returns a backend for the table holding `E`.
    pub fn backend<E: SqlTable>(&self) -> SqliteBackend<E> {
        SqliteBackend::new(self.pool.clone())
    }

    async fn create_tables(&self) -> StoreResult<()> {
        sqlx::query(schema::SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

/// Storage backend for one SQLite table.
#[derive(Debug)]
pub struct SqliteBackend<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SqlTable> SqliteBackend<E> {
    /// Creates a backend over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::COLLECTION)
    }
}

/// `$start, $start+1, ...` for `count` parameters.
fn placeholders(start: usize, count: usize) -> Vec<String> {
    (start..start + count).map(|n| format!("${n}")).collect()
}

#[async_trait]
impl<E: SqlTable> StorageBackend<E> for SqliteBackend<E> {
    async fn insert(&self, base: E::Base) -> StoreResult<E> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::COLLECTION,
            E::COLUMNS.join(", "),
            placeholders(1, E::COLUMNS.len()).join(", "),
        );

        let result = E::bind_base(&base, sqlx::query(&sql))
            .execute(&self.pool)
            .await?;

        Ok(E::from_base(result.last_insert_rowid(), base))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<E>> {
        let sql = format!("{} WHERE id = $1", Self::select_sql());
        let row: Option<E::Row> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> StoreResult<Vec<E>> {
        let sql = format!("{} ORDER BY id", Self::select_sql());
        let rows: Vec<E::Row> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn merge_by_id(&self, id: i64, patch: E::Patch) -> StoreResult<Option<E>> {
        // Take the write lock up front so concurrent merges queue on the
        // busy timeout instead of failing on lock upgrade. Rolled back on
        // drop unless committed.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let select = format!("{} WHERE id = $1", Self::select_sql());
        let row: Option<E::Row> = sqlx::query_as(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut record: E = row.into();
        record.apply_patch(patch);

        let assignments: Vec<String> = E::COLUMNS
            .iter()
            .zip(placeholders(1, E::COLUMNS.len()))
            .map(|(column, placeholder)| format!("{column} = {placeholder}"))
            .collect();
        let update = format!(
            "UPDATE {} SET {} WHERE id = ${}",
            E::COLLECTION,
            assignments.join(", "),
            E::COLUMNS.len() + 1,
        );
        record
            .bind_fields(sqlx::query(&update))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(record))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::COLLECTION);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
