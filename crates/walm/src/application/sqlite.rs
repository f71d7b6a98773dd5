use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;
use tracing::debug;

use super::domain::{Application, ApplicationId};
use super::repository::{ApplicationFilter, ApplicationRepository, RepositoryError};

const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS application (id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL)";

/// Repository over the relational `application` table.
///
/// Schema bootstrap is a single idempotent DDL statement, not a migration
/// chain; rows are otherwise created and destroyed outside the HTTP surface.
pub struct SqliteApplicationRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: String,
    name: String,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: ApplicationId(row.id),
            name: row.name,
        }
    }
}

impl SqliteApplicationRepository {
    /// Wrap an existing pool. Callers are expected to run [`ensure_schema`]
    /// before the first query.
    ///
    /// [`ensure_schema`]: SqliteApplicationRepository::ensure_schema
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the configured URL and make sure the table exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        debug!(%url, "application store ready");
        Ok(repository)
    }

    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn get(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        let row: Option<ApplicationRow> =
            sqlx::query_as("SELECT id, name FROM application WHERE id = ?1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Application::from)
            .ok_or_else(|| RepositoryError::missing(id))
    }

    async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        let mut query = QueryBuilder::new("SELECT id, name FROM application WHERE 1 = 1");
        if let Some(id) = &filter.id {
            query.push(" AND id = ").push_bind(id.clone());
        }
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        query.push(" ORDER BY id");

        let rows: Vec<ApplicationRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Application::from).collect())
    }

    async fn insert(&self, application: &Application) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO application (id, name) VALUES (?1, ?2)")
            .bind(application.id.as_str())
            .bind(&application.name)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(RepositoryError::Conflict)
            }
            Err(err) => Err(err.into()),
        }
    }
}
