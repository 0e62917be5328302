use diesel::{pg::PgConnection, prelude::*};

use crate::{
    models::note::{InsertNote, Note},
    schema::notes::dsl::{content, id, notes},
};

pub fn create(conn: &mut PgConnection, text: &str) -> QueryResult<Note> {
    diesel::insert_into(notes)
        .values(&InsertNote { content: text })
        .get_result::<Note>(conn)
}

pub fn list(conn: &mut PgConnection, skip: i64, limit: i64) -> QueryResult<Vec<Note>> {
    notes
        .order(id.desc())
        .offset(skip)
        .limit(limit)
        .load::<Note>(conn)
}

pub fn get(conn: &mut PgConnection, note_id: i32) -> QueryResult<Option<Note>> {
    notes.find(note_id).first::<Note>(conn).optional()
}

pub fn update(conn: &mut PgConnection, note_id: i32, text: &str) -> QueryResult<Option<Note>> {
    diesel::update(notes.find(note_id))
        .set(content.eq(text))
        .get_result::<Note>(conn)
        .optional()
}

pub fn delete(conn: &mut PgConnection, note_id: i32) -> QueryResult<bool> {
    let removed = diesel::delete(notes.find(note_id)).execute(conn)?;
    Ok(removed > 0)
}

pub fn count(conn: &mut PgConnection) -> QueryResult<i64> {
    notes.count().get_result::<i64>(conn)
}
