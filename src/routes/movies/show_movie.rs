use actix_web::{http::StatusCode, web::Path, HttpResponse};
use chrono::Utc;

use crate::data::{Movie, Runtime};
use crate::routes::ApiError;
use crate::util::{envelope, read_id_param, write_json};

pub async fn show_movie(id: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = read_id_param(&id).map_err(|_| ApiError::NotFound)?;

    // Placeholder record until movies are read from the database.
    let movie = Movie {
        id,
        created_at: Utc::now(),
        title: "Casablanca".to_string(),
        year: 1942,
        runtime: Runtime(102),
        genres: Some(vec![
            "drama".to_string(),
            "romance".to_string(),
            "war".to_string(),
        ]),
        version: 1,
    };

    let body = envelope("movie", &movie).map_err(ApiError::internal)?;
    write_json(StatusCode::OK, &body, None).map_err(ApiError::internal)
}
