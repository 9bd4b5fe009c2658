//! JSON extractor that runs `validator` checks before the handler runs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Deserializes a request body as JSON and validates the result.
///
/// Both failure modes map to [`AppError::Validation`]: a body that does not
/// parse surfaces the deserializer's own text, a body that parses but fails
/// a field check surfaces the messages declared on the request type.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        payload
            .validate()
            .map_err(|errors| AppError::validation(flatten_errors(&errors)))?;

        Ok(Self(payload))
    }
}

/// Collapse field errors into one comma-separated message, sorted so the
/// output is stable when several fields fail at once.
fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.sort();
    messages.join(", ")
}
