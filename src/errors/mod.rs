use actix_web::{HttpResponse, ResponseError};
use log::error;
use std::fmt;

use crate::views;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    InvalidIdentifier(String),
    NotFound(String),
    Conflict(String),
    DatabaseError(String),
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidIdentifier(msg) => write!(f, "Invalid Identifier: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidIdentifier(msg) => HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(views::error_page("400 Bad Request", msg)),
            AppError::NotFound(msg) => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(views::error_page("404 Not Found", msg)),
            AppError::Conflict(msg) => HttpResponse::Conflict()
                .content_type("text/html; charset=utf-8")
                .body(views::error_page("409 Conflict", msg)),
            AppError::DatabaseError(msg) | AppError::InternalServerError(msg) => {
                error!("store failure: {}", msg);
                HttpResponse::InternalServerError()
                    .content_type("text/html; charset=utf-8")
                    .body(views::error_page("500 Internal Server Error", "something went wrong"))
            }
        }
    }
}

// Every sqlx failure crossing the gateway boundary becomes a typed
// AppError; handlers never see a raw driver error.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Conflict("a record with this CPF already exists".to_string())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}
