use crate::controller::Intake;
use application::transfer::{CreatePersonDto, DeletePersonDto, GetPersonDto};
use serde::Deserialize;

// Absent fields fall back to empty strings; the database decides what is acceptable.
// Keys are matched in PascalCase, lowercase, camelCase or snake_case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePersonRequest {
    #[serde(default, alias = "name", alias = "NAME")]
    name: String,
    #[serde(default, alias = "email", alias = "EMAIL")]
    email: String,
}

#[derive(Debug)]
pub struct GetPersonRequest {
    id: i64,
}

impl GetPersonRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeletePersonRequest {
    id: i64,
}

impl DeletePersonRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct PersonTransformer;

impl Intake<CreatePersonRequest> for PersonTransformer {
    type To = CreatePersonDto;
    fn emit(&self, input: CreatePersonRequest) -> Self::To {
        CreatePersonDto {
            name: input.name,
            email: input.email,
        }
    }
}

impl Intake<GetPersonRequest> for PersonTransformer {
    type To = GetPersonDto;
    fn emit(&self, input: GetPersonRequest) -> Self::To {
        GetPersonDto { id: input.id }
    }
}

impl Intake<DeletePersonRequest> for PersonTransformer {
    type To = DeletePersonDto;
    fn emit(&self, input: DeletePersonRequest) -> Self::To {
        DeletePersonDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use super::{CreatePersonRequest, PersonTransformer};
    use crate::controller::Intake;

    #[test]
    fn reads_pascal_case_body() {
        let req: CreatePersonRequest =
            serde_json::from_str(r#"{"Name":"Asun","Email":"asun@email.com"}"#).unwrap();
        let dto = PersonTransformer.emit(req);
        assert_eq!(dto.name, "Asun");
        assert_eq!(dto.email, "asun@email.com");
    }

    #[test]
    fn missing_fields_are_empty() {
        let req: CreatePersonRequest = serde_json::from_str(r#"{"Name":"Asun"}"#).unwrap();
        let dto = PersonTransformer.emit(req);
        assert_eq!(dto.name, "Asun");
        assert!(dto.email.is_empty());
    }

    #[test]
    fn reads_lowercase_body() {
        let req: CreatePersonRequest =
            serde_json::from_str(r#"{"name":"Asun","email":"asun@email.com"}"#).unwrap();
        let dto = PersonTransformer.emit(req);
        assert_eq!(dto.name, "Asun");
        assert_eq!(dto.email, "asun@email.com");
    }
}
