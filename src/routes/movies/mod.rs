mod create_movie;
mod show_movie;

pub use create_movie::*;
pub use show_movie::*;

use actix_web::{web, Scope};

use super::method_not_allowed;

pub fn movie_source() -> Scope {
    web::scope("/v1/movies")
        .service(
            web::resource("")
                .route(web::post().to(create_movie))
                .default_service(method_not_allowed("POST")),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(show_movie))
                .default_service(method_not_allowed("GET")),
        )
}
