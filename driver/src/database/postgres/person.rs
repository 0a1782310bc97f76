use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::PersonQuery;
use kernel::interface::update::PersonModifier;
use kernel::prelude::entity::{
    CreatedAt, DeletedAt, Person, PersonDraft, PersonEmail, PersonId, PersonName, UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresPersonRepository;

#[async_trait::async_trait]
impl PersonQuery for PostgresPersonRepository {
    type Connection = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Person>, KernelError> {
        PgPersonInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError> {
        PgPersonInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl PersonModifier for PostgresPersonRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        person: &PersonDraft,
    ) -> error_stack::Result<Person, KernelError> {
        PgPersonInternal::create(con, person).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        person_id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError> {
        PgPersonInternal::delete(con, person_id).await
    }
}

#[derive(sqlx::FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    email: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    deleted_at: Option<OffsetDateTime>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person::new(
            PersonId::new(row.id),
            PersonName::new(row.name),
            PersonEmail::new(row.email),
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
            row.deleted_at.map(DeletedAt::new),
        )
    }
}

pub(in crate::database) struct PgPersonInternal;

impl PgPersonInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Person>, KernelError> {
        let rows = sqlx::query_as::<_, PersonRow>(
            // language=postgresql
            r#"
            SELECT id::BIGINT AS id, name, email, created_at, updated_at, deleted_at
            FROM people
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError> {
        let row = sqlx::query_as::<_, PersonRow>(
            // language=postgresql
            r#"
            SELECT id::BIGINT AS id, name, email, created_at, updated_at, deleted_at
            FROM people
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Person::from))
    }

    async fn create(
        con: &mut PgConnection,
        person: &PersonDraft,
    ) -> error_stack::Result<Person, KernelError> {
        let row = sqlx::query_as::<_, PersonRow>(
            // language=postgresql
            r#"
            INSERT INTO people (name, email, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING id::BIGINT AS id, name, email, created_at, updated_at, deleted_at
            "#,
        )
        .bind(person.name().as_ref())
        .bind(person.email().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Person::from(row))
    }

    async fn delete(
        con: &mut PgConnection,
        person_id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError> {
        let row = sqlx::query_as::<_, PersonRow>(
            // language=postgresql
            r#"
            UPDATE people
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id::BIGINT AS id, name, email, created_at, updated_at, deleted_at
            "#,
        )
        .bind(person_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Person::from))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::PersonQuery;
    use kernel::interface::update::PersonModifier;
    use kernel::prelude::entity::{PersonDraft, PersonEmail, PersonId, PersonName};
    use kernel::KernelError;

    use crate::database::postgres::test_support::{database, unique_number};
    use crate::database::postgres::PostgresPersonRepository;

    fn draft(name: &str) -> PersonDraft {
        PersonDraft::new(
            PersonName::new(name),
            PersonEmail::new(format!("{name}-{}@email.com", unique_number())),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_find_delete() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let draft = draft("asun");
        let created = PostgresPersonRepository.create(&mut con, &draft).await?;
        assert_eq!(created.name(), draft.name());
        assert_eq!(created.email(), draft.email());
        assert!(!created.is_deleted());

        let found = PostgresPersonRepository
            .find_by_id(&mut con, created.id())
            .await?;
        assert_eq!(found, Some(created.clone()));

        let all = PostgresPersonRepository.find_all(&mut con).await?;
        assert!(all.iter().any(|person| person.id() == created.id()));

        let deleted = PostgresPersonRepository
            .delete(&mut con, created.id())
            .await?
            .expect("person should be live before deletion");
        assert!(deleted.is_deleted());

        let found = PostgresPersonRepository
            .find_by_id(&mut con, created.id())
            .await?;
        assert!(found.is_none());
        let all = PostgresPersonRepository.find_all(&mut con).await?;
        assert!(all.iter().all(|person| person.id() != created.id()));

        let again = PostgresPersonRepository
            .delete(&mut con, created.id())
            .await?;
        assert!(again.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicate_email_conflicts() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let draft = draft("twin");
        PostgresPersonRepository.create(&mut con, &draft).await?;
        let error = PostgresPersonRepository
            .create(&mut con, &draft)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn deleted_person_frees_email() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let draft = draft("returning");
        let first = PostgresPersonRepository.create(&mut con, &draft).await?;
        PostgresPersonRepository.delete(&mut con, first.id()).await?;
        let second = PostgresPersonRepository.create(&mut con, &draft).await?;
        assert_ne!(first.id(), second.id());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn overlong_email_is_invalid() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let draft = PersonDraft::new(PersonName::new("long"), PersonEmail::new("a".repeat(101)));
        let error = PostgresPersonRepository
            .create(&mut con, &draft)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Invalid);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn missing_person_is_none() -> error_stack::Result<(), KernelError> {
        let db = database().await?;
        let mut con = db.acquire().await?;

        let found = PostgresPersonRepository
            .find_by_id(&mut con, &PersonId::new(-1))
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
