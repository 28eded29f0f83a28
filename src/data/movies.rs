use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::Runtime;
use crate::validator::{unique, Validator};

pub const MAX_TITLE_BYTES: usize = 500;
pub const EARLIEST_YEAR: i32 = 1888;
pub const MAX_GENRES: usize = 3;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub year: i32,
    #[serde(skip_serializing_if = "Runtime::is_zero")]
    pub runtime: Runtime,
    pub genres: Option<Vec<String>>,
    pub version: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_movie_for_year(v, movie, Utc::now().year());
}

/// Same as [`validate_movie`] with an explicit "current" calendar year.
pub fn validate_movie_for_year(v: &mut Validator, movie: &Movie, current_year: i32) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(movie.year >= EARLIEST_YEAR, "year", "must be greater than 1888");
    v.check(movie.year <= current_year, "year", "must not be in the future");

    v.check(!movie.runtime.is_zero(), "runtime", "must be provided");
    v.check(movie.runtime.minutes() > 0, "runtime", "must be a positive integer");

    let genres = movie.genres.as_deref().unwrap_or_default();
    v.check(movie.genres.is_some(), "genres", "must be provided");
    v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(
        genres.len() <= MAX_GENRES,
        "genres",
        "must not contain more than 3 genres",
    );
    v.check(unique(genres), "genres", "must not contain duplicate values");
}
