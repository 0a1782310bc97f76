use crate::controller::Exhaust;
use application::transfer::BookDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookResponse {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    deleted_at: Option<OffsetDateTime>,
    title: String,
    author: String,
    call_number: i64,
    #[serde(rename = "PersonID")]
    person_id: Option<i64>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            deleted_at: value.deleted_at,
            title: value.title,
            author: value.author,
            call_number: value.call_number,
            person_id: value.person_id,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = axum::Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        axum::Json::from(result)
    }
}
