use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::Invalid => StatusCode::BAD_REQUEST,
            KernelError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorResponse {
            error: context.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    fn status_of(error: KernelError) -> StatusCode {
        ErrorStatus::from(Report::new(error)).into_response().status()
    }

    #[test]
    fn maps_contexts_to_status() {
        assert_eq!(status_of(KernelError::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_of(KernelError::Invalid), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(KernelError::Timeout),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(KernelError::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn conflict_body_names_the_error() {
        let response = ErrorStatus::from(Report::new(KernelError::Conflict)).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["Error"], "Conflicts with an existing record");
    }
}
