use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{CreatePersonRequest, DeletePersonRequest, GetPersonRequest, PersonTransformer};
use crate::response::{PersonPresenter, PersonResponse};
use application::service::{GetPersonService, HandlePersonService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

pub trait PersonRouter {
    fn route_person(self) -> Self;
}

impl PersonRouter for Router<AppModule> {
    fn route_person(self) -> Self {
        self.route(
            "/people",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), PersonPresenter)
                    .bypass(|| module.pgpool().get_all_people())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/person/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(PersonTransformer, PersonPresenter)
                        .intake(GetPersonRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_person(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(PersonResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/create/person",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreatePersonRequest>| async move {
                    Controller::new(PersonTransformer, PersonPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().create_person(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/delete/person/:id",
            delete(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(PersonTransformer, PersonPresenter)
                        .intake(DeletePersonRequest::new(id))
                        .handle(|dto| async move { module.pgpool().delete_person(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(PersonResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
