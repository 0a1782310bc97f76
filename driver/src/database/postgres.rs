use error_stack::ResultExt;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnBookQuery, DependOnPersonQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnPersonModifier};
use kernel::KernelError;

use crate::error::ConvertError;

pub use self::{book::*, config::*, person::*};

mod book;
mod config;
mod person;
mod schema;

pub type PostgresConnection = PoolConnection<Postgres>;

/// Process-wide handle on the PostgreSQL pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects with the settings found in the environment.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let config = PostgresConfig::from_env()?;
        Self::connect(&config).await
    }

    pub async fn connect(config: &PostgresConfig) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .connect_with(config.connect_options())
            .await
            .convert_error()
            .attach_printable_lazy(|| {
                format!(
                    "Failed to connect to postgres at {}:{}/{}",
                    config.host(),
                    config.port(),
                    config.database()
                )
            })?;
        tracing::info!(
            host = %config.host(),
            port = config.port(),
            database = %config.database(),
            "Connected to postgres"
        );
        Ok(Self { pool })
    }

    /// Creates missing tables, columns and indexes. Existing columns and rows
    /// are left alone; the previous deployment's full unique indexes are
    /// replaced by partial ones.
    ///
    /// Runs in a single transaction under an advisory lock so that instances
    /// starting side by side do not race on the catalog.
    pub async fn ensure_schema(&self) -> error_stack::Result<(), KernelError> {
        let mut tx = self.pool.begin().await.convert_error()?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(schema::LOCK_KEY)
            .execute(&mut *tx)
            .await
            .convert_error()?;
        schema::apply(&mut *tx).await?;
        tx.commit().await.convert_error()?;
        tracing::info!("Schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PostgresConnection;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError> {
        self.pool.acquire().await.convert_error()
    }
}

impl DependOnPersonQuery for PostgresDatabase {
    type PersonQuery = PostgresPersonRepository;
    fn person_query(&self) -> &Self::PersonQuery {
        &PostgresPersonRepository
    }
}

impl DependOnPersonModifier for PostgresDatabase {
    type PersonModifier = PostgresPersonRepository;
    fn person_modifier(&self) -> &Self::PersonModifier {
        &PostgresPersonRepository
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use kernel::KernelError;

    use super::PostgresDatabase;

    pub async fn database() -> error_stack::Result<PostgresDatabase, KernelError> {
        let db = PostgresDatabase::new().await?;
        db.ensure_schema().await?;
        Ok(db)
    }

    pub fn unique_number() -> i64 {
        rand::random::<u32>() as i64
    }
}
