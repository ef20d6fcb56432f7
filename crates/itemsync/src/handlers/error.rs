use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use itemsync_core::operation::ResolverError;
use serde::Serialize;

/// Error body returned to callers, in the resolver error format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_type: &'static str,
    pub message: String,
}

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match self.0.downcast_ref::<ResolverError>() {
            Some(error) => (
                StatusCode::from_u16(error.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                error.error_type(),
            ),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        let body = ErrorBody {
            error_type,
            message: self.0.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use itemsync_core::storage::StorageError;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_argument_is_bad_request() {
        let error = AppError::from(ResolverError::InvalidArgument(
            "id must not be empty".to_string(),
        ));

        let (status, body) = render(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorType"], "InvalidArgument");
        assert_eq!(body["message"], "Invalid argument: id must not be empty");
    }

    #[tokio::test]
    async fn test_storage_unavailable_is_service_unavailable() {
        let error = AppError::from(ResolverError::Storage(StorageError::Unavailable(
            "throttled".to_string(),
        )));

        let (status, body) = render(error).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["errorType"], "StorageUnavailable");
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let error = AppError(anyhow::anyhow!("boom"));

        let (status, body) = render(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errorType"], "InternalError");
        assert_eq!(body["message"], "boom");
    }
}
