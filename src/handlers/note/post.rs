use actix_web::{web, HttpResponse};

use crate::{
    auth::Identity, errors::ServerError, models::note::NoteContent, store::Session,
};

pub async fn new(
    identity: Identity,
    session: Session,
    input: web::Json<NoteContent>,
) -> Result<HttpResponse, ServerError> {
    let text = input.into_inner().validate()?;
    let note = session.run(move |repo| repo.create(&text)).await?;
    log::info!("note {} created by {}", note.id, identity.subject);

    Ok(HttpResponse::Created().json(note))
}
