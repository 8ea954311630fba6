use api_types::ErrorBody;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{Owner, ServerState, router, run_with_listener};

pub mod auth;
mod expenses;
mod financial;
mod server;
mod transactions;

/// Everything a handler can fail with.
///
/// Engine failures carry the message of the operation that failed, e.g.
/// `"Error creating expense"`.
#[derive(Debug)]
pub enum ServerError {
    Engine {
        message: &'static str,
        source: EngineError,
    },
    /// Unknown or foreign record; holds the resource label.
    NotFound(&'static str),
    Unauthorized(&'static str),
    MethodNotAllowed,
    RouteNotFound,
    Body {
        status: StatusCode,
        error: String,
    },
}

/// Attach an operation message to an engine result.
pub(crate) trait Context<T> {
    fn context(self, message: &'static str) -> Result<T, ServerError>;
}

impl<T> Context<T> for Result<T, EngineError> {
    fn context(self, message: &'static str) -> Result<T, ServerError> {
        self.map_err(|source| ServerError::Engine { message, source })
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(message: &'static str, err: EngineError) -> ErrorBody {
    match err {
        // The not-found text is the whole message, e.g. "Expense not found".
        EngineError::KeyNotFound(_) => ErrorBody {
            message: err.to_string(),
            error: None,
        },
        EngineError::Database(db_err) => {
            tracing::error!("{message}: {db_err}");
            ErrorBody {
                message: message.to_string(),
                error: Some(db_err.to_string()),
            }
        }
        other => ErrorBody {
            message: message.to_string(),
            error: Some(other.to_string()),
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine { message, source } => (
                status_for_engine_error(&source),
                body_for_engine_error(message, source),
            ),
            ServerError::NotFound(label) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: format!("{label} not found"),
                    error: None,
                },
            ),
            ServerError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message: message.to_string(),
                    error: None,
                },
            ),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    message: "Method not allowed".to_string(),
                    error: None,
                },
            ),
            ServerError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: "Route not found".to_string(),
                    error: None,
                },
            ),
            ServerError::Body { status, error } => (
                status,
                ErrorBody {
                    message: "Invalid request body".to_string(),
                    error: Some(error),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body {
            status: rejection.status(),
            error: rejection.body_text(),
        }
    }
}

/// `Json` extractor whose rejection is rendered as an [`ErrorBody`].
pub(crate) struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Parse a path id. A malformed id cannot match any record.
pub(crate) fn parse_id(raw: &str, label: &'static str) -> Result<uuid::Uuid, ServerError> {
    uuid::Uuid::parse_str(raw).map_err(|_| ServerError::NotFound(label))
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    fn db_error() -> EngineError {
        EngineError::Database(DbErr::Custom("disk I/O error".to_string()))
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::Engine {
            message: "Error deleting expense",
            source: EngineError::KeyNotFound("Expense".to_string()),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::Engine {
            message: "Error creating expense",
            source: EngineError::InvalidField("amount is required".to_string()),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_database_maps_to_500_with_raw_text() {
        let body = body_for_engine_error("Error fetching expenses", db_error());
        assert_eq!(body.message, "Error fetching expenses");
        assert_eq!(
            body.error.as_deref(),
            Some("Custom Error: disk I/O error")
        );

        let res = ServerError::Engine {
            message: "Error fetching expenses",
            source: db_error(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_body_has_no_error_field() {
        let body = body_for_engine_error(
            "Error deleting transaction",
            EngineError::KeyNotFound("Transaction".to_string()),
        );
        assert_eq!(body.message, "Transaction not found");
        assert!(body.error.is_none());
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized("Token is not valid").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn method_not_allowed_maps_to_405() {
        let res = ServerError::MethodNotAllowed.into_response();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(
            parse_id("not-a-uuid", "Expense"),
            Err(ServerError::NotFound("Expense"))
        ));
    }
}
