use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase};
use uuid::Uuid;

use super::store::{Collection, Document, DocumentStore, Filter};
use super::utils::sql;

const DOCUMENT_COLUMNS: &str = "id, collection, data, expire_at, created_at, updated_at";

pub async fn init_database(database_url: &str) -> Result<PgPool> {
    if !Postgres::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Postgres::create_database(database_url).await?;
    }

    let pool = PgPool::connect(database_url).await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}

/// Documents kept in a single JSONB table; equality filters use `@>`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(&sql(&format!(
            r#"
            SELECT {DOCUMENT_COLUMNS}
            FROM documents
            WHERE collection = ? AND data @> ?
            ORDER BY created_at, id
            "#
        )))
        .bind(collection)
        .bind(filter.to_json())
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Document> {
        let now = Utc::now();
        let document = sqlx::query_as::<_, Document>(&sql(&format!(
            r#"
            INSERT INTO documents (id, collection, data, expire_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(data)
        .bind(expire_at)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>(&sql(&format!(
            r#"
            UPDATE documents
            SET data = ?, expire_at = ?, updated_at = ?
            WHERE collection = ? AND id = ?
            RETURNING {DOCUMENT_COLUMNS}
            "#
        )))
        .bind(data)
        .bind(expire_at)
        .bind(Utc::now())
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&sql("DELETE FROM documents WHERE collection = ? AND id = ?"))
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, collection: Collection, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(&sql(
            r#"
            DELETE FROM documents
            WHERE collection = ? AND expire_at IS NOT NULL AND expire_at < ?
            "#,
        ))
        .bind(collection)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
