use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookTitle, CallNumber, CreatedAt, DeletedAt, PersonId,
    UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_person_id(
        &self,
        con: &mut PostgresConnection,
        person_id: &PersonId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_person_id(con, person_id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    call_number: i64,
    person_id: Option<i64>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    deleted_at: Option<OffsetDateTime>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            CallNumber::new(value.call_number),
            value.person_id.map(PersonId::new),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
            value.deleted_at.map(DeletedAt::new),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id::BIGINT AS id, title, author, call_number::BIGINT AS call_number,
                   person_id::BIGINT AS person_id, created_at, updated_at, deleted_at
            FROM books
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id::BIGINT AS id, title, author, call_number::BIGINT AS call_number,
                   person_id::BIGINT AS person_id, created_at, updated_at, deleted_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_by_person_id(
        con: &mut PgConnection,
        person_id: &PersonId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id::BIGINT AS id, title, author, call_number::BIGINT AS call_number,
                   person_id::BIGINT AS person_id, created_at, updated_at, deleted_at
            FROM books
            WHERE person_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(person_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (title, author, call_number, person_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, now(), now())
            RETURNING id::BIGINT AS id, title, author, call_number::BIGINT AS call_number,
                   person_id::BIGINT AS person_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.call_number().as_ref())
        .bind(book.person_id().as_ref().map(|id| *id.as_ref()))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id::BIGINT AS id, title, author, call_number::BIGINT AS call_number,
                   person_id::BIGINT AS person_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }
}
