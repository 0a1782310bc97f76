use time::OffsetDateTime;

use kernel::prelude::entity::{DestructPerson, Person};

use crate::transfer::BookDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl From<Person> for PersonDto {
    fn from(value: Person) -> Self {
        let DestructPerson {
            id,
            name,
            email,
            created_at,
            updated_at,
            deleted_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
            deleted_at: deleted_at.map(Into::into),
        }
    }
}

/// A person together with the live books they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonWithBooksDto {
    pub person: PersonDto,
    pub books: Vec<BookDto>,
}

pub struct GetPersonDto {
    pub id: i64,
}

pub struct CreatePersonDto {
    pub name: String,
    pub email: String,
}

pub struct DeletePersonDto {
    pub id: i64,
}
