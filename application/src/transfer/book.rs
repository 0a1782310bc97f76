use time::OffsetDateTime;

use kernel::prelude::entity::{Book, DestructBook, PersonId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub call_number: i64,
    pub person_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            call_number,
            person_id,
            created_at,
            updated_at,
            deleted_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            call_number: call_number.into(),
            person_id: person_id.map(PersonId::into),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
            deleted_at: deleted_at.map(Into::into),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub call_number: i64,
    pub person_id: Option<i64>,
}

pub struct DeleteBookDto {
    pub id: i64,
}
