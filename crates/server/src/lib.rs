use api_types::{ApiError, ApiResponse, ErrorBody};
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use engine::{EngineError, ErrorKind};
use serde::{Serialize, de::DeserializeOwned};

pub use server::{app, run, run_with_listener};

mod accounts;
mod drivers;
mod merchants;
mod orders;
mod qr;
mod server;
mod transactions;
mod users;
mod views;

pub enum ServerError {
    Engine(EngineError),
    /// Malformed request body or parameter.
    BadRequest(String),
    Unauthorized,
}

/// Handler result: a status code and the success envelope.
pub(crate) type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServerError>;

pub(crate) fn ok<T: Serialize>(message: &str, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::ok(message, data))))
}

pub(crate) fn created<T: Serialize>(message: &str, data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message, data))))
}

/// JSON body extractor whose rejection is rendered as the error envelope.
pub(crate) struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Body(value)),
            Err(rejection) => Err(ServerError::from(rejection)),
        }
    }
}

/// Path extractor whose rejection is rendered as the error envelope.
pub(crate) struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => Err(ServerError::from(rejection)),
        }
    }
}

fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: &EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, kind, message) = match self {
            ServerError::Engine(err) => (
                status_for_kind(err.kind()),
                err.code(),
                err.kind(),
                message_for_engine_error(&err),
            ),
            ServerError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                ErrorKind::Validation,
                message,
            ),
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                ErrorKind::Unauthorized,
                "missing or invalid credentials".to_string(),
            ),
        };

        let body = ApiError {
            success: false,
            message: message.clone(),
            error: ErrorBody {
                code: code.to_string(),
                message,
                kind: kind.as_str().to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use engine::AccountSide;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res =
            ServerError::from(EngineError::AccountNotFound(AccountSide::Sender)).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = ServerError::from(EngineError::QrNotFound).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflicts_map_to_409() {
        for err in [
            EngineError::ExistingKey("x".to_string()),
            EngineError::QrAlreadyUsed,
            EngineError::DriverUnavailable,
        ] {
            assert_eq!(ServerError::from(err).into_response().status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn engine_validation_maps_to_400() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InsufficientBalance,
            EngineError::SameAccount,
            EngineError::QrExpired,
            EngineError::InvalidTransition("x".to_string()),
        ] {
            assert_eq!(
                ServerError::from(err).into_response().status(),
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[test]
    fn database_error_is_hidden() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk I/O error".to_string()));
        assert_eq!(message_for_engine_error(&err), "internal server error");
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let res = ServerError::BadRequest("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
