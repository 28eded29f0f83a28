use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::data::{validate_movie, Movie, Runtime};
use crate::routes::ApiError;
use crate::util::{envelope, null_as_default, read_json, write_json};
use crate::validator::Validator;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct CreateMovieInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Option<Vec<String>>,
}

impl From<&CreateMovieInput> for Movie {
    fn from(input: &CreateMovieInput) -> Self {
        Movie {
            title: input.title.clone(),
            year: input.year,
            runtime: input.runtime,
            genres: input.genres.clone(),
            ..Default::default()
        }
    }
}

/// Validates a new movie. Nothing is stored yet: an accepted body is echoed
/// back as `{"input": ...}`.
pub async fn create_movie(payload: web::Payload) -> Result<HttpResponse, ApiError> {
    let input: CreateMovieInput = read_json(payload).await?;
    let movie = Movie::from(&input);

    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        tracing::info!(errors = ?v.errors(), "movie failed validation");
        return Err(ApiError::FailedValidation(v.into_errors()));
    }

    tracing::info!(?input, "movie accepted");
    let body = envelope("input", &input).map_err(ApiError::internal)?;
    write_json(StatusCode::OK, &body, None).map_err(ApiError::internal)
}
