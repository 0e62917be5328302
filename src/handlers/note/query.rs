use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    auth::Identity,
    errors::ServerError,
    models::note::Pagination,
    store::Session,
};

pub async fn list(
    _: Identity,
    session: Session,
    page: web::Query<Pagination>,
) -> Result<HttpResponse, ServerError> {
    let (skip, limit) = page.into_inner().resolve()?;
    let notes = session.run(move |repo| repo.list(skip, limit)).await?;

    Ok(HttpResponse::Ok().json(notes))
}

pub async fn get(
    _: Identity,
    session: Session,
    note_id: web::Path<i32>,
) -> Result<HttpResponse, ServerError> {
    let note_id = note_id.into_inner();

    match session.run(move |repo| repo.get(note_id)).await? {
        Some(note) => Ok(HttpResponse::Ok().json(note)),
        None => Err(ServerError::NotFound(note_id)),
    }
}

pub async fn count(_: Identity, session: Session) -> Result<HttpResponse, ServerError> {
    let count = session.run(|repo| repo.count()).await?;

    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}
