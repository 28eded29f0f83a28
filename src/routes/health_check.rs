use actix_web::{http::header::ContentType, web::Data, HttpResponse};

use crate::configuration::ApplicationSettings;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health_check(settings: Data<ApplicationSettings>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!(
            "Status: Available\nenvironment: {}\nversion: {}\n",
            settings.environment, VERSION
        ))
}
