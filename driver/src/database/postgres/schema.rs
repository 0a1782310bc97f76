//! Additive schema for the two entity tables.
//!
//! Tables are created when absent and every column is re-added with
//! `IF NOT EXISTS`, so an older table picks up new columns without losing
//! data. Uniqueness only applies to live rows: a soft-deleted person frees
//! their email, a soft-deleted book frees its call number.
//!
//! Tables left behind by the previous deployment use `serial`/`integer`
//! keys and full unique indexes named `uix_people_email` and
//! `uix_books_call_number`. Those two indexes are replaced by the partial
//! `*_live` ones, and the repositories read integer columns as `BIGINT`.

use error_stack::ResultExt;
use sqlx::PgConnection;

use kernel::KernelError;

use crate::error::ConvertError;

/// Advisory lock held while the schema is applied.
pub(super) const LOCK_KEY: i64 = 0x6b6d_6e6c_6962;

pub(super) const STATEMENTS: &[&str] = &[
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS people (
        id BIGSERIAL PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at TIMESTAMPTZ,
        name TEXT NOT NULL DEFAULT '',
        email VARCHAR(100) NOT NULL DEFAULT ''
    )
    "#,
    "ALTER TABLE people ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE people ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE people ADD COLUMN IF NOT EXISTS deleted_at TIMESTAMPTZ",
    "ALTER TABLE people ADD COLUMN IF NOT EXISTS name TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE people ADD COLUMN IF NOT EXISTS email VARCHAR(100) NOT NULL DEFAULT ''",
    "CREATE INDEX IF NOT EXISTS idx_people_deleted_at ON people (deleted_at)",
    "DROP INDEX IF EXISTS uix_people_email",
    "CREATE UNIQUE INDEX IF NOT EXISTS uix_people_email_live ON people (email) WHERE deleted_at IS NULL",
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at TIMESTAMPTZ,
        title TEXT NOT NULL DEFAULT '',
        author TEXT NOT NULL DEFAULT '',
        call_number BIGINT NOT NULL DEFAULT 0,
        person_id BIGINT
    )
    "#,
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS deleted_at TIMESTAMPTZ",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS title TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS author TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS call_number BIGINT NOT NULL DEFAULT 0",
    "ALTER TABLE books ADD COLUMN IF NOT EXISTS person_id BIGINT",
    "CREATE INDEX IF NOT EXISTS idx_books_deleted_at ON books (deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_books_person_id ON books (person_id)",
    "DROP INDEX IF EXISTS uix_books_call_number",
    "CREATE UNIQUE INDEX IF NOT EXISTS uix_books_call_number_live ON books (call_number) WHERE deleted_at IS NULL",
];

pub(super) async fn apply(con: &mut PgConnection) -> error_stack::Result<(), KernelError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *con)
            .await
            .convert_error()
            .attach_printable_lazy(|| format!("Failed to apply schema: {statement}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{BookQuery, PersonQuery};
    use kernel::interface::update::{BookModifier, PersonModifier};
    use kernel::prelude::entity::{
        BookAuthor, BookDraft, BookTitle, CallNumber, PersonDraft, PersonEmail, PersonName,
    };
    use kernel::KernelError;

    use crate::database::postgres::test_support::{database, unique_number};
    use crate::database::postgres::{PostgresBookRepository, PostgresPersonRepository};
    use crate::error::ConvertError;

    // Layout written by the previous deployment: 32-bit keys, nullable
    // timestamps without defaults, full unique indexes.
    const LEGACY_TABLES: &[&str] = &[
        // language=postgresql
        r#"
        CREATE TABLE people (
            id SERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ,
            updated_at TIMESTAMPTZ,
            deleted_at TIMESTAMPTZ,
            name TEXT,
            email VARCHAR(100)
        )
        "#,
        "CREATE UNIQUE INDEX uix_people_email ON people (email)",
        // language=postgresql
        r#"
        CREATE TABLE books (
            id SERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ,
            updated_at TIMESTAMPTZ,
            deleted_at TIMESTAMPTZ,
            title TEXT,
            author TEXT,
            call_number INTEGER,
            person_id INTEGER
        )
        "#,
        "CREATE UNIQUE INDEX uix_books_call_number ON books (call_number)",
        // language=postgresql
        r#"
        INSERT INTO people (created_at, updated_at, name, email)
        VALUES (now(), now(), 'Asun', 'asun@email.com')
        "#,
        // language=postgresql
        r#"
        INSERT INTO books (created_at, updated_at, title, author, call_number, person_id)
        VALUES (now(), now(), 'Titanic 2077', 'IDK', 123456, 1)
        "#,
    ];

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn upgrades_legacy_tables() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let namespace = format!("legacy_{}", unique_number());
        sqlx::query(&format!("CREATE SCHEMA {namespace}"))
            .execute(&mut *con)
            .await
            .convert_error()?;
        sqlx::query(&format!("SET search_path TO {namespace}"))
            .execute(&mut *con)
            .await
            .convert_error()?;
        for statement in LEGACY_TABLES {
            sqlx::query(statement)
                .execute(&mut *con)
                .await
                .convert_error()?;
        }

        super::apply(&mut con).await?;

        let people = PostgresPersonRepository.find_all(&mut con).await?;
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].email().as_ref(), "asun@email.com");
        let owned = PostgresBookRepository
            .find_by_person_id(&mut con, people[0].id())
            .await?;
        assert_eq!(owned.len(), 1);
        assert_eq!(*owned[0].call_number().as_ref(), 123456);

        PostgresPersonRepository.delete(&mut con, people[0].id()).await?;
        let again = PersonDraft::new(PersonName::new("Asun"), PersonEmail::new("asun@email.com"));
        let again = PostgresPersonRepository.create(&mut con, &again).await?;
        assert_ne!(again.id(), people[0].id());

        PostgresBookRepository.delete(&mut con, owned[0].id()).await?;
        let reissued = BookDraft::new(
            BookTitle::new("KIJK"),
            BookAuthor::new("IDK"),
            CallNumber::new(123456),
            None,
        );
        PostgresBookRepository.create(&mut con, &reissued).await?;

        sqlx::query("RESET search_path")
            .execute(&mut *con)
            .await
            .convert_error()?;
        sqlx::query(&format!("DROP SCHEMA {namespace} CASCADE"))
            .execute(&mut *con)
            .await
            .convert_error()?;
        Ok(())
    }
}
