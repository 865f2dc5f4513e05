//! Per-entity request handlers.

pub(crate) mod manufacturers;
pub(crate) mod vehicle_models;
pub(crate) mod vehicles;

use crate::error::WebError;
use axum::extract::rejection::FormRejection;
use axum::Form;

/// Unwraps a form extraction, turning rejections into `Validation`.
pub(crate) fn accept_form<T>(form: Result<Form<T>, FormRejection>) -> Result<T, WebError> {
    form.map(|Form(value)| value)
        .map_err(|rejection| WebError::Validation(rejection.body_text()))
}
