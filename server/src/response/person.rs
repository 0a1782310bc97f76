use crate::controller::Exhaust;
use crate::response::BookResponse;
use application::transfer::{PersonDto, PersonWithBooksDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonResponse {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    deleted_at: Option<OffsetDateTime>,
    name: String,
    email: String,
    /// Only filled when the books were actually loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    books: Option<Vec<BookResponse>>,
}

impl PersonResponse {
    fn new(person: PersonDto, books: Option<Vec<BookResponse>>) -> Self {
        Self {
            id: person.id,
            created_at: person.created_at,
            updated_at: person.updated_at,
            deleted_at: person.deleted_at,
            name: person.name,
            email: person.email,
            books,
        }
    }
}

impl IntoResponse for PersonResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreatedPersonResponse(PersonResponse);

impl IntoResponse for CreatedPersonResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct PersonPresenter;

// A person who was just created cannot own anything yet.
impl Exhaust<PersonDto> for PersonPresenter {
    type To = CreatedPersonResponse;
    fn emit(&self, input: PersonDto) -> Self::To {
        CreatedPersonResponse(PersonResponse::new(input, Some(Vec::new())))
    }
}

impl Exhaust<Option<PersonWithBooksDto>> for PersonPresenter {
    type To = Option<PersonResponse>;
    fn emit(&self, input: Option<PersonWithBooksDto>) -> Self::To {
        input.map(|PersonWithBooksDto { person, books }| {
            let books = books.into_iter().map(BookResponse::from).collect();
            PersonResponse::new(person, Some(books))
        })
    }
}

impl Exhaust<Option<PersonDto>> for PersonPresenter {
    type To = Option<PersonResponse>;
    fn emit(&self, input: Option<PersonDto>) -> Self::To {
        input.map(|person| PersonResponse::new(person, None))
    }
}

impl Exhaust<Vec<PersonDto>> for PersonPresenter {
    type To = axum::Json<Vec<PersonResponse>>;
    fn emit(&self, input: Vec<PersonDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(|person| PersonResponse::new(person, None))
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}
