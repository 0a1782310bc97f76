mod author;
mod call_number;
mod id;
mod title;

pub use self::{author::*, call_number::*, id::*, title::*};
use crate::entity::common::{CreatedAt, DeletedAt, UpdatedAt};
use crate::entity::PersonId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    call_number: CallNumber,
    person_id: Option<PersonId>,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
    deleted_at: Option<DeletedAt<Book>>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        call_number: CallNumber,
        person_id: Option<PersonId>,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
        deleted_at: Option<DeletedAt<Book>>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            call_number,
            person_id,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields supplied by a client when registering a book. Identifier and
/// timestamps are assigned by the store.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    call_number: CallNumber,
    person_id: Option<PersonId>,
}

impl BookDraft {
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        call_number: CallNumber,
        person_id: Option<PersonId>,
    ) -> Self {
        Self {
            title,
            author,
            call_number,
            person_id,
        }
    }
}
