use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use chrono::Utc;

use super::{NoteRepository, SessionSource};
use crate::{errors::ServerError, models::note::Note};

#[derive(Default)]
struct State {
    notes: Vec<Note>,
    last_id: i32,
}

/// Stand-in for the postgres pool in handler tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    acquired: Arc<AtomicUsize>,
    down: bool,
}

impl MemoryStore {
    /// A store whose every checkout fails, like an exhausted or unreachable pool.
    pub fn unavailable() -> Self {
        MemoryStore {
            down: true,
            ..Default::default()
        }
    }

    /// How many sessions have been handed out so far.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Notes currently held.
    pub fn stored(&self) -> usize {
        self.state.lock().unwrap().notes.len()
    }
}

impl SessionSource for MemoryStore {
    fn acquire(&self) -> Result<Box<dyn NoteRepository>, ServerError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        if self.down {
            return Err(ServerError::R2D2Error);
        }
        Ok(Box::new(self.clone()))
    }
}

impl NoteRepository for MemoryStore {
    fn create(&mut self, content: &str) -> Result<Note, ServerError> {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let note = Note {
            id: state.last_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    fn list(&mut self, skip: i64, limit: i64) -> Result<Vec<Note>, ServerError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .notes
            .iter()
            .rev()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn get(&mut self, id: i32) -> Result<Option<Note>, ServerError> {
        let state = self.state.lock().unwrap();
        Ok(state.notes.iter().find(|n| n.id == id).cloned())
    }

    fn update(&mut self, id: i32, content: &str) -> Result<Option<Note>, ServerError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.notes.iter_mut().find(|n| n.id == id).map(|note| {
            note.content = content.to_string();
            note.clone()
        }))
    }

    fn delete(&mut self, id: i32) -> Result<bool, ServerError> {
        let mut state = self.state.lock().unwrap();
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        Ok(state.notes.len() < before)
    }

    fn count(&mut self) -> Result<i64, ServerError> {
        Ok(self.state.lock().unwrap().notes.len() as i64)
    }
}
