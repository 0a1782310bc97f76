use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{BookAuthor, BookDraft, BookId, BookTitle, CallNumber, PersonId};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book(
        &self,
        dto: &GetBookDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait HandleBookService: 'static + Sync + Send + DependOnBookModifier {
    /// The owner is stored as given; no check that the person exists.
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let draft = BookDraft::new(
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            CallNumber::new(dto.call_number),
            dto.person_id.map(PersonId::new),
        );
        let book = self.book_modifier().create(&mut connection, &draft).await?;
        let book = BookDto::from(book);
        tracing::debug!(id = book.id, "Created book");

        Ok(book)
    }

    async fn delete_book(
        &self,
        dto: &DeleteBookDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = BookId::new(dto.id);
        let book = self.book_modifier().delete(&mut connection, &id).await?;
        if book.is_some() {
            tracing::debug!(id = dto.id, "Deleted book");
        }

        Ok(book.map(BookDto::from))
    }
}

impl<T> HandleBookService for T where T: DependOnBookModifier {}
