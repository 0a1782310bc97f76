use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookDraft, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: 'static + Send;
    async fn create(
        &self,
        con: &mut Self::Connection,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Connection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
