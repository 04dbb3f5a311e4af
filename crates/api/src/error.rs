use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gamespot_core::error::CoreError;
use gamespot_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses; this is the only place errors become status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gamespot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure. `context` is the generic message shown to the client;
    /// the source is only logged.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        source: StoreError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach a client-facing failure message to a store result.
pub trait StoreResultExt<T> {
    fn with_context(self, context: &'static str) -> AppResult<T>;
}

impl<T, E> StoreResultExt<T> for Result<T, E>
where
    E: Into<StoreError>,
{
    fn with_context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|err| AppError::Store {
            context,
            source: err.into(),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store { context, source } => {
                let code = match source {
                    StoreError::UnknownTag { kind, name } => {
                        tracing::error!(context = %context, %kind, %name, "Unknown tag name");
                        "UNKNOWN_TAG"
                    }
                    StoreError::Database(err) => {
                        tracing::error!(context = %context, error = %err, "Store error");
                        "INTERNAL_ERROR"
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, context.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use gamespot_core::tags::TagKind;

    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Core(CoreError::Validation("Price must be a number.".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: 7,
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_tag_is_a_generic_server_error() {
        let result: Result<(), StoreError> = Err(StoreError::UnknownTag {
            kind: TagKind::Genre,
            name: "Nope".into(),
        });
        let err = result.with_context("Failed to create game.").unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn sqlx_errors_convert_through_context() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let err = result.with_context("Failed to load games.").unwrap_err();
        assert!(matches!(
            err,
            AppError::Store {
                context: "Failed to load games.",
                source: StoreError::Database(_),
            }
        ));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
