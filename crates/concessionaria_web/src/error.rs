//! Request-level errors and their HTTP mapping.
//!
//! # Invariants
//! - `NotFound` maps to 404 with the entity's plain-text message.
//! - Validation and reference failures map to 4xx with a readable reason.
//! - Storage failures map to a generic 500; detail goes to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use concessionaria_core::{DbError, RepoError};
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug)]
pub enum WebError {
    /// Required form field missing or malformed.
    Validation(String),
    Repo(RepoError),
    /// Blocking storage task panicked or was cancelled.
    Task(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repo(RepoError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Repo(RepoError::Reference { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repo(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Repo(RepoError::NotFound { entity, .. }) => {
                entity.not_found_message().to_string()
            }
            Self::Repo(RepoError::Reference { entity, id }) => {
                format!("Referência inválida: {} {id} não existe", entity.label())
            }
            Self::Repo(_) | Self::Task(_) => "Erro interno do servidor".to_string(),
        }
    }
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid request: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Task(message) => write!(f, "storage task failed: {message}"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Validation(_) | Self::Task(_) => None,
        }
    }
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for WebError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=web status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        } else {
            warn!(
                "event=http_error module=web status=rejected http_status={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, self.public_message()).into_response()
    }
}
