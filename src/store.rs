//! Store handle and the PostgreSQL implementation. Also creates the database and entity tables at startup.

use crate::error::{AppError, ConfigError, StoreError};
use crate::sql::{quoted, PgBindValue, Statement};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// Handle to the relational store. Each call runs exactly one statement and waits for it.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run a query and return every row as a JSON object.
    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Value>, StoreError>;

    /// Run a mutating statement and return the affected-row count.
    async fn execute(&self, stmt: &Statement) -> Result<u64, StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct PgStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        PgStore { pool, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res.map_err(StoreError::from),
            Err(_) => Err(StoreError::Unavailable(format!(
                "statement timed out after {} ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

fn bind_all<'q>(
    stmt: &'q Statement,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    let mut query = sqlx::query(&stmt.sql);
    for p in &stmt.params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

#[async_trait]
impl Store for PgStore {
    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "query");
        let rows = self.bounded(bind_all(stmt).fetch_all(&self.pool)).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&self, stmt: &Statement) -> Result<u64, StoreError> {
        tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "execute");
        let result = self.bounded(bind_all(stmt).execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Try the column types the entity tables use, in order. NULL in any of them becomes `Value::Null`.
fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Parties first: candidates reference them.
const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS parties (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS candidates (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(30) NOT NULL,
        last_name VARCHAR(30) NOT NULL,
        industry_connected BOOLEAN NOT NULL,
        party_id INTEGER,
        CONSTRAINT fk_party FOREIGN KEY (party_id) REFERENCES parties(id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voters (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(30) NOT NULL,
        last_name VARCHAR(30) NOT NULL,
        email VARCHAR(50) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Create the entity tables if they do not exist. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Split `database_url` into options for the `postgres` maintenance database and the
/// name of the database it targets. Nothing is connected.
fn maintenance_target(database_url: &str) -> Result<(PgConnectOptions, String), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::Invalid {
        name: "DATABASE_URL",
        value: "(unparseable)".into(),
    })?;
    let target = opts.get_database().unwrap_or_default().to_string();
    Ok((opts.database("postgres"), target))
}

/// Create the target database through the maintenance database when it is missing.
/// Runs before the main pool is built, since that pool cannot connect without it.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (maintenance, target) = maintenance_target(database_url)?;
    if target.is_empty() || target == "postgres" {
        return Ok(());
    }
    let mut conn = maintenance.connect().await?;
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&target)
        .fetch_one(&mut conn)
        .await?;
    if exists {
        tracing::debug!(database = %target, "database present");
    } else {
        tracing::info!(database = %target, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&target)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}
