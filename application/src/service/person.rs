use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnPersonQuery, PersonQuery};
use kernel::interface::update::{DependOnPersonModifier, PersonModifier};
use kernel::prelude::entity::{PersonDraft, PersonEmail, PersonId, PersonName};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreatePersonDto, DeletePersonDto, GetPersonDto, PersonDto, PersonWithBooksDto,
};

#[async_trait::async_trait]
pub trait GetPersonService: 'static + Sync + Send + DependOnPersonQuery + DependOnBookQuery {
    async fn get_all_people(&self) -> error_stack::Result<Vec<PersonDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let people = self.person_query().find_all(&mut connection).await?;
        Ok(people.into_iter().map(PersonDto::from).collect())
    }

    async fn get_person(
        &self,
        dto: &GetPersonDto,
    ) -> error_stack::Result<Option<PersonWithBooksDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = PersonId::new(dto.id);
        let Some(person) = self.person_query().find_by_id(&mut connection, &id).await? else {
            return Ok(None);
        };
        let books = self
            .book_query()
            .find_by_person_id(&mut connection, &id)
            .await?;

        Ok(Some(PersonWithBooksDto {
            person: PersonDto::from(person),
            books: books.into_iter().map(BookDto::from).collect(),
        }))
    }
}

impl<T> GetPersonService for T where T: DependOnPersonQuery + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait HandlePersonService: 'static + Sync + Send + DependOnPersonModifier {
    async fn create_person(
        &self,
        dto: CreatePersonDto,
    ) -> error_stack::Result<PersonDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let draft = PersonDraft::new(PersonName::new(dto.name), PersonEmail::new(dto.email));
        let person = self
            .person_modifier()
            .create(&mut connection, &draft)
            .await?;
        let person = PersonDto::from(person);
        tracing::debug!(id = person.id, "Created person");

        Ok(person)
    }

    /// Soft-deletes the person. Books they own are left as they are.
    async fn delete_person(
        &self,
        dto: &DeletePersonDto,
    ) -> error_stack::Result<Option<PersonDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let id = PersonId::new(dto.id);
        let person = self.person_modifier().delete(&mut connection, &id).await?;
        if person.is_some() {
            tracing::debug!(id = dto.id, "Deleted person");
        }

        Ok(person.map(PersonDto::from))
    }
}

impl<T> HandlePersonService for T where T: DependOnPersonModifier {}
