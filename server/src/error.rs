//! Error handling.

use std::error::Error as StdError;

use anyhow::Error as AnyError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use displaydoc::Display;
use serde::Serialize;

use crate::templates;
use advisory::error::AdvisoryError;

pub type ServerResult<T> = Result<T, ServerError>;

/// An error.
#[derive(Debug, Display)]
pub enum ServerError {
    // Generic responses
    /// The URL you requested was not found.
    NotFound,

    /// The server encountered an internal error or misconfiguration.
    InternalServerError,

    // Specialized responses
    /// User "{username}" already exists.
    UserAlreadyExists { username: String },

    /// Advice on "{topic}" already exists.
    AdviceAlreadyExists { topic: String },

    /// The advice is already linked to this country.
    CountryAdviceAlreadyExists,

    /// The user has already voted on this country.
    VoteAlreadyExists,

    /// Database error: {0}
    DatabaseError(AnyError),

    /// Template error: {0}
    TemplateError(AnyError),

    /// Session error: {0}
    SessionError(super::access::Error),

    /// General request error: {0}
    RequestError(AnyError),

    /// Error from the common components.
    AdvisoryError(AdvisoryError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl ServerError {
    pub fn database_error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::DatabaseError(AnyError::new(error))
    }

    pub fn template_error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::TemplateError(AnyError::new(error))
    }

    pub fn request_error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::RequestError(AnyError::new(error))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InternalServerError => "InternalServerError",

            Self::UserAlreadyExists { .. } => "UserAlreadyExists",
            Self::AdviceAlreadyExists { .. } => "AdviceAlreadyExists",
            Self::CountryAdviceAlreadyExists => "CountryAdviceAlreadyExists",
            Self::VoteAlreadyExists => "VoteAlreadyExists",
            Self::AdvisoryError(e) => e.name(),
            Self::DatabaseError(_) => "DatabaseError",
            Self::TemplateError(_) => "TemplateError",
            Self::SessionError(_) => "SessionError",
            Self::RequestError(_) => "RequestError",
        }
    }

    /// Returns a version of this error for clients.
    fn into_clients(self) -> Self {
        match self {
            Self::DatabaseError(_) => Self::InternalServerError,
            Self::TemplateError(_) => Self::InternalServerError,
            Self::SessionError(_) => Self::InternalServerError,

            _ => self,
        }
    }

    pub fn http_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::UserAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::AdviceAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::CountryAdviceAlreadyExists => StatusCode::CONFLICT,
            Self::VoteAlreadyExists => StatusCode::CONFLICT,
            Self::RequestError(_) => StatusCode::BAD_REQUEST,
            Self::AdvisoryError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl StdError for ServerError {}

impl From<AdvisoryError> for ServerError {
    fn from(error: AdvisoryError) -> Self {
        Self::AdvisoryError(error)
    }
}

impl From<super::access::Error> for ServerError {
    fn from(error: super::access::Error) -> Self {
        Self::SessionError(error)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::DatabaseError(_) | Self::TemplateError(_) | Self::SessionError(_)
        ) {
            tracing::error!("{:?}", self);
        }

        let sanitized = self.into_clients();

        let status_code = sanitized.http_status_code();
        let error_response = ErrorResponse {
            code: status_code.as_u16(),
            message: sanitized.to_string(),
            error: sanitized.name().to_string(),
        };

        match templates::render("error", &error_response) {
            Ok(page) => (status_code, Html(page)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status_code, error_response.message).into_response()
            }
        }
    }
}
