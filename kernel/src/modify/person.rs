use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Person, PersonDraft, PersonId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PersonModifier: 'static + Sync + Send {
    type Connection: 'static + Send;
    /// Stores the draft and returns the record as persisted, id and timestamps included.
    async fn create(
        &self,
        con: &mut Self::Connection,
        person: &PersonDraft,
    ) -> error_stack::Result<Person, KernelError>;
    /// Marks a live person as deleted. `None` when no live person has this id.
    async fn delete(
        &self,
        con: &mut Self::Connection,
        person_id: &PersonId,
    ) -> error_stack::Result<Option<Person>, KernelError>;
}

pub trait DependOnPersonModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type PersonModifier: PersonModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn person_modifier(&self) -> &Self::PersonModifier;
}
