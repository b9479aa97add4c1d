//! Generic CRUD execution against PostgreSQL.

use super::{HealthCheck, Repository};
use crate::error::AppError;
use crate::model::Entity;
use crate::sql::{
    bind, bind_as, delete, delete_by_column, insert, select_all, select_by_column, select_by_key,
    select_by_key_for_update, update, QueryBuf, SqlValue,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool};

/// PostgreSQL-backed store. Cheap to clone; shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn query_many<E>(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<E>, AppError>
    where
        E: Entity + for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_as::<_, E>(sql);
        for p in params {
            query = bind_as(query, p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn query_one<E>(&self, sql: &str, key: &SqlValue) -> Result<Option<E>, AppError>
    where
        E: Entity + for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(sql = %sql, params = ?key, "query");
        let row = bind_as(sqlx::query_as::<_, E>(sql), key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

async fn execute_returning_one_tx<E>(tx: &mut PgConnection, q: &QueryBuf) -> Result<E, AppError>
where
    E: Entity + for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
    let mut query = sqlx::query_as::<_, E>(&q.sql);
    for p in &q.params {
        query = bind_as(query, p);
    }
    Ok(query.fetch_one(&mut *tx).await?)
}

async fn execute_tx(tx: &mut PgConnection, sql: &str, key: &SqlValue) -> Result<u64, AppError> {
    tracing::debug!(sql = %sql, params = ?key, "query (tx)");
    let done = bind(sqlx::query(sql), key).execute(&mut *tx).await?;
    Ok(done.rows_affected())
}

#[async_trait]
impl<E> Repository<E> for PgStore
where
    E: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn create(&self, row: E) -> Result<E, AppError> {
        row.check()?;
        let q = insert(E::table(), &row.values());
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in &q.params {
            query = bind_as(query, p);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn find(&self, key: &E::Key) -> Result<Option<E>, AppError> {
        let key: SqlValue = key.clone().into();
        self.query_one(&select_by_key(E::table()), &key).await
    }

    async fn list(&self) -> Result<Vec<E>, AppError> {
        self.query_many(&select_all(E::table()), &[]).await
    }

    async fn list_by(&self, column: &'static str, value: SqlValue) -> Result<Vec<E>, AppError> {
        let table = E::table();
        if !table.has_column(column) {
            return Err(AppError::BadRequest(format!("unknown column {} on {}", column, table.name)));
        }
        self.query_many(&select_by_column(table, column), &[value]).await
    }

    async fn update(&self, key: &E::Key, patch: E::Patch) -> Result<Option<E>, AppError> {
        let table = E::table();
        let key: SqlValue = key.clone().into();
        let mut tx = self.pool.begin().await?;

        let sql = select_by_key_for_update(table);
        tracing::debug!(sql = %sql, params = ?key, "query (tx)");
        let current = bind_as(sqlx::query_as::<_, E>(&sql), &key)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(mut row) = current else {
            return Ok(None);
        };
        row.apply(patch);
        row.check()?;

        let q = update(table, key, &row.values());
        let updated = execute_returning_one_tx::<E>(&mut tx, &q).await?;
        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, key: &E::Key) -> Result<u64, AppError> {
        let table = E::table();
        let key: SqlValue = key.clone().into();
        let mut tx = self.pool.begin().await?;
        for (child, column) in table.cascade_children() {
            let removed = execute_tx(&mut tx, &delete_by_column(child, column), &key).await?;
            if removed > 0 {
                tracing::debug!(table = child.name, removed, "cascade delete");
            }
        }
        let deleted = execute_tx(&mut tx, &delete(table), &key).await?;
        tx.commit().await?;
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
