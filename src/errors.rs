use actix_web::{http::header, http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "unauthorized: {}", _0)]
    Unauthorized(String),
    #[display(fmt = "note {} was not found", _0)]
    NotFound(i32),
    #[display(fmt = "invalid request: {}", _0)]
    UserError(String),
    DieselError,
    R2D2Error,
    BlockingError,
    #[display(fmt = "environment variable {} is missing or invalid", _0)]
    EnvironmentError(String),
}

impl From<r2d2::Error> for ServerError {
    fn from(e: r2d2::Error) -> ServerError {
        log::error!("connection pool: {e}");
        ServerError::R2D2Error
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(e: diesel::result::Error) -> ServerError {
        log::error!("diesel: {e}");
        ServerError::DieselError
    }
}

impl From<actix_web::error::BlockingError> for ServerError {
    fn from(e: actix_web::error::BlockingError) -> ServerError {
        log::error!("blocking pool: {e}");
        ServerError::BlockingError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::UserError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // the reason stays in the logs, callers only learn that the token was refused
            ServerError::Unauthorized(_) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({ "detail": "Could not validate credentials" })),
            ServerError::NotFound(_) => {
                HttpResponse::NotFound().json(json!({ "detail": "Note not found" }))
            }
            ServerError::UserError(msg) => {
                HttpResponse::BadRequest().json(json!({ "detail": msg }))
            }
            ServerError::DieselError => HttpResponse::InternalServerError()
                .json(json!({ "detail": "Library Error: Diesel Error." })),
            ServerError::R2D2Error => HttpResponse::InternalServerError()
                .json(json!({ "detail": "Server Error: Pooling Error." })),
            ServerError::BlockingError => HttpResponse::InternalServerError()
                .json(json!({ "detail": "Server Error: Worker Pool Unavailable." })),
            ServerError::EnvironmentError(_) => HttpResponse::InternalServerError().json(
                json!({ "detail": "Server Error: Use of an uninitialized environment variable." }),
            ),
        }
    }
}
