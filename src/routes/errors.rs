use std::collections::BTreeMap;

use actix_web::{
    http::{
        header::{self, HeaderMap, HeaderValue},
        Method, StatusCode,
    },
    HttpRequest, HttpResponse, ResponseError, Route,
};
use serde_json::Value;
use thiserror::Error;

use crate::util::{envelope, write_json, DecodeError};

/// Every failure a handler can report to a client. Rendered as
/// `{"error": ...}` through [`write_json`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] DecodeError),
    #[error("the requested resource could not be found")]
    NotFound,
    #[error("the {method} method is not supported for this resource")]
    MethodNotAllowed {
        method: Method,
        allowed: &'static str,
    },
    #[error("failed validation")]
    FailedValidation(BTreeMap<String, String>),
    #[error("the server encountered a problem and could not process your request")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub fn internal(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ApiError::Internal(err.into())
    }

    fn message(&self) -> Value {
        match self {
            ApiError::FailedValidation(errors) => Value::Object(
                errors
                    .iter()
                    .map(|(field, message)| (field.clone(), Value::from(message.as_str())))
                    .collect(),
            ),
            other => Value::String(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Internal(source) => tracing::error!(error = %source, "request failed"),
            ApiError::BadRequest(err) => tracing::debug!(error = %err, "rejected request body"),
            _ => {}
        }

        let mut headers = HeaderMap::new();
        if let ApiError::MethodNotAllowed { allowed, .. } = self {
            headers.insert(header::ALLOW, HeaderValue::from_static(*allowed));
        }

        let rendered = envelope("error", self.message())
            .and_then(|body| write_json(self.status_code(), &body, Some(&headers)));
        match rendered {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "failed to render error response");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// Fallback route for a resource, answering 405 with the methods it serves.
pub fn method_not_allowed(allowed: &'static str) -> Route {
    actix_web::web::to(move |req: HttpRequest| async move {
        Err::<HttpResponse, _>(ApiError::MethodNotAllowed {
            method: req.method().clone(),
            allowed,
        })
    })
}
