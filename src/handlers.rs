use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::ServerError;

pub mod note;

pub async fn index() -> impl actix_web::Responder {
    HttpResponse::Ok().json(json!({ "message": "Hello World" }))
}

/// Route table shared by the server and the handler tests. Paths are
/// registered without trailing slashes; `NormalizePath` trims incoming ones.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _: &HttpRequest| {
        ServerError::UserError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _: &HttpRequest| {
        ServerError::UserError(err.to_string()).into()
    }))
    .route("/", web::get().to(index))
    .route("/notes-count", web::get().to(note::query::count))
    .service(
        web::scope("/notes")
            .route("", web::post().to(note::post::new))
            .route("", web::get().to(note::query::list))
            .route("/{id}", web::get().to(note::query::get))
            .route("/{id}", web::put().to(note::mutate::update))
            .route("/{id}", web::delete().to(note::mutate::del)),
    );
}
