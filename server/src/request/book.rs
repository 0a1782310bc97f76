use crate::controller::Intake;
use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBookRequest {
    #[serde(default, alias = "title", alias = "TITLE")]
    title: String,
    #[serde(default, alias = "author", alias = "AUTHOR")]
    author: String,
    #[serde(
        default,
        alias = "callNumber",
        alias = "call_number",
        alias = "callnumber",
        alias = "CALLNUMBER"
    )]
    call_number: i64,
    #[serde(
        default,
        rename = "PersonID",
        alias = "PersonId",
        alias = "personID",
        alias = "personId",
        alias = "person_id",
        alias = "personid",
        alias = "PERSONID"
    )]
    person_id: Option<i64>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            call_number: input.call_number,
            person_id: input.person_id,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}
