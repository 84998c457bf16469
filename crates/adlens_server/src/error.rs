use adlens_core::AnalyzeError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors returned by the adlens API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Sessão não encontrada: {0}")]
    SessionNotFound(String),

    #[error("Nenhum arquivo enviado")]
    MissingFile,

    #[error("Nenhum arquivo selecionado")]
    EmptyFileName,

    #[error("Nome de arquivo inválido: {0}")]
    InvalidFileName(String),

    #[error("Tipo de arquivo não permitido: {0}")]
    UnsupportedFileType(String),

    #[error("Requisição multipart inválida: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Erro: {0}")]
    Analysis(#[from] AnalyzeError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Mutex lock error")]
    LockError,

    #[error("Internal server error")]
    InternalError,
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ApiError::LockError
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Analysis task failed: {err}");
        ApiError::InternalError
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::SessionNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::MissingFile | ApiError::EmptyFileName | ApiError::InvalidFileName(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::UnsupportedFileType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }

            ApiError::Multipart(err) => (err.status(), self.to_string()),

            // The upload form clears its product list on failure
            ApiError::Analysis(_) => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "products": [],
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            ApiError::Storage(_) => {
                tracing::error!("Storage error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error".to_string(),
                )
            }

            ApiError::LockError | ApiError::InternalError => {
                tracing::error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
