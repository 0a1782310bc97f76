use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest};
use crate::response::{BookPresenter, BookResponse};
use application::service::{GetBookService, HandleBookService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.pgpool().get_all_books())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/book/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_book(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/create/book",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().create_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/delete/book/:id",
            delete(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.pgpool().delete_book(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use kernel::KernelError;
    use serde_json::json;

    use crate::route::test_support::{app, delete, get, post_json, send};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn owned_books_survive_owner_deletion() -> error_stack::Result<(), KernelError> {
        let app = app().await?;
        let email = format!("owner-{}@email.com", rand::random::<u32>());

        let (_, owner) = send(
            &app,
            post_json("/create/person", json!({ "Name": "Owner", "Email": email })),
        )
        .await;
        let owner_id = owner["ID"].as_i64().expect("generated id");

        let call_number = rand::random::<u32>() as i64;
        let (status, book) = send(
            &app,
            post_json(
                "/create/book",
                json!({
                    "Title": "Titanic 2077",
                    "Author": "IDK",
                    "CallNumber": call_number,
                    "PersonID": owner_id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let book_id = book["ID"].as_i64().expect("generated id");

        let (_, detail) = send(&app, get(&format!("/person/{owner_id}"))).await;
        assert_eq!(detail["Books"], json!([book.clone()]));

        let (status, _) = send(&app, delete(&format!("/delete/person/{owner_id}"))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, found) = send(&app, get(&format!("/book/{book_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, book);

        let (status, _) = send(
            &app,
            post_json(
                "/create/book",
                json!({ "Title": "KIJK", "Author": "PPP", "CallNumber": call_number }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn deleted_book_leaves_listing() -> error_stack::Result<(), KernelError> {
        let app = app().await?;

        let (_, book) = send(
            &app,
            post_json(
                "/create/book",
                json!({ "Title": "ww3", "Author": "ME", "CallNumber": rand::random::<u32>() as i64 }),
            ),
        )
        .await;
        let book_id = book["ID"].as_i64().expect("generated id");

        let (status, deleted) = send(&app, delete(&format!("/delete/book/{book_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(deleted["DeletedAt"].is_string());

        let (status, books) = send(&app, get("/books")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(books
            .as_array()
            .unwrap()
            .iter()
            .all(|book| book["ID"] != book_id));
        Ok(())
    }
}
