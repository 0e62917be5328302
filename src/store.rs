use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, PooledConnection},
};

use crate::{errors::ServerError, models::note::Note};

#[cfg(test)]
pub mod memory;
pub mod pg;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Note persistence as seen by a single request. Every mutating call is its own
/// statement and is committed before it returns.
pub trait NoteRepository: Send {
    fn create(&mut self, content: &str) -> Result<Note, ServerError>;
    /// Newest first.
    fn list(&mut self, skip: i64, limit: i64) -> Result<Vec<Note>, ServerError>;
    fn get(&mut self, id: i32) -> Result<Option<Note>, ServerError>;
    fn update(&mut self, id: i32, content: &str) -> Result<Option<Note>, ServerError>;
    fn delete(&mut self, id: i32) -> Result<bool, ServerError>;
    fn count(&mut self) -> Result<i64, ServerError>;
}

/// Hands out one repository handle per request.
pub trait SessionSource: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn NoteRepository>, ServerError>;
}

pub struct PgSession(PooledConnection<ConnectionManager<PgConnection>>);

impl SessionSource for Pool {
    fn acquire(&self) -> Result<Box<dyn NoteRepository>, ServerError> {
        Ok(Box::new(PgSession(self.get()?)))
    }
}

impl NoteRepository for PgSession {
    fn create(&mut self, content: &str) -> Result<Note, ServerError> {
        Ok(pg::create(&mut self.0, content)?)
    }

    fn list(&mut self, skip: i64, limit: i64) -> Result<Vec<Note>, ServerError> {
        Ok(pg::list(&mut self.0, skip, limit)?)
    }

    fn get(&mut self, id: i32) -> Result<Option<Note>, ServerError> {
        Ok(pg::get(&mut self.0, id)?)
    }

    fn update(&mut self, id: i32, content: &str) -> Result<Option<Note>, ServerError> {
        Ok(pg::update(&mut self.0, id, content)?)
    }

    fn delete(&mut self, id: i32) -> Result<bool, ServerError> {
        Ok(pg::delete(&mut self.0, id)?)
    }

    fn count(&mut self) -> Result<i64, ServerError> {
        Ok(pg::count(&mut self.0)?)
    }
}

/// Access to the store for the current request. Nothing is checked out of the
/// pool until [`Session::run`] is called, so handlers validate their input
/// first. The connection is released as soon as the operation returns.
pub struct Session(web::Data<dyn SessionSource>);

impl Session {
    pub async fn run<F, R>(self, op: F) -> Result<R, ServerError>
    where
        F: FnOnce(&mut dyn NoteRepository) -> Result<R, ServerError> + Send + 'static,
        R: Send + 'static,
    {
        let source = self.0;
        // pool checkout may wait for a free connection
        web::block(move || {
            let mut repo = source.acquire()?;
            op(repo.as_mut())
        })
        .await?
    }
}

impl FromRequest for Session {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let source = req.app_data::<web::Data<dyn SessionSource>>().cloned();

        ready(source.map(Session).ok_or_else(|| {
            log::error!("no session source registered on the app");
            ServerError::R2D2Error
        }))
    }
}
