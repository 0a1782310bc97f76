use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Person, PersonId};
use crate::KernelError;

/// Reads never return soft-deleted people.
#[async_trait::async_trait]
pub trait PersonQuery: 'static + Sync + Send {
    type Connection: 'static + Send;
    async fn find_all(
        &self,
        con: &mut Self::Connection,
    ) -> error_stack::Result<Vec<Person>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Connection,
        id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError>;
}

pub trait DependOnPersonQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PersonQuery: PersonQuery<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn person_query(&self) -> &Self::PersonQuery;
}
