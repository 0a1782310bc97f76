mod email;
mod id;
mod name;

pub use self::{email::*, id::*, name::*};
use crate::entity::common::{CreatedAt, DeletedAt, UpdatedAt};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Person {
    id: PersonId,
    name: PersonName,
    email: PersonEmail,
    created_at: CreatedAt<Person>,
    updated_at: UpdatedAt<Person>,
    deleted_at: Option<DeletedAt<Person>>,
}

impl Person {
    pub fn new(
        id: PersonId,
        name: PersonName,
        email: PersonEmail,
        created_at: CreatedAt<Person>,
        updated_at: UpdatedAt<Person>,
        deleted_at: Option<DeletedAt<Person>>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct PersonDraft {
    name: PersonName,
    email: PersonEmail,
}

impl PersonDraft {
    pub fn new(name: PersonName, email: PersonEmail) -> Self {
        Self { name, email }
    }
}
