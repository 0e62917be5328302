use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    auth::Identity, errors::ServerError, models::note::NoteContent, store::Session,
};

pub async fn update(
    identity: Identity,
    session: Session,
    note_id: web::Path<i32>,
    input: web::Json<NoteContent>,
) -> Result<HttpResponse, ServerError> {
    let note_id = note_id.into_inner();
    let text = input.into_inner().validate()?;

    match session.run(move |repo| repo.update(note_id, &text)).await? {
        Some(note) => {
            log::info!("note {} updated by {}", note.id, identity.subject);
            Ok(HttpResponse::Ok().json(note))
        }
        None => Err(ServerError::NotFound(note_id)),
    }
}

pub async fn del(
    identity: Identity,
    session: Session,
    note_id: web::Path<i32>,
) -> Result<HttpResponse, ServerError> {
    let note_id = note_id.into_inner();

    if session.run(move |repo| repo.delete(note_id)).await? {
        log::info!("note {} deleted by {}", note_id, identity.subject);
        Ok(HttpResponse::Ok().json(json!({ "message": "Note deleted successfully" })))
    } else {
        Err(ServerError::NotFound(note_id))
    }
}
