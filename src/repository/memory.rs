use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::{dto::NoteInput, error::StorageError, models::Note};

use super::NoteStore;

/// `NoteStore` kept in a `Vec`, for exercising the service without a database.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, input: NoteInput) -> Result<Note, StorageError> {
        let mut notes = self.notes.lock().unwrap();
        let id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;

        // Spread timestamps so newest-first ordering is observable.
        let note = Note {
            id,
            title: input.title,
            content: input.content,
            created_at: Utc::now() + Duration::milliseconds(id),
        };
        notes.push(note.clone());

        Ok(note)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StorageError> {
        let mut notes = self.snapshot();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn update_note(&self, id: i64, input: NoteInput) -> Result<u64, StorageError> {
        let mut notes = self.notes.lock().unwrap();
        let mut affected = 0;

        for note in notes.iter_mut().filter(|n| n.id == id) {
            note.title.clone_from(&input.title);
            note.content.clone_from(&input.content);
            affected += 1;
        }

        Ok(affected)
    }

    async fn delete_note(&self, id: i64) -> Result<u64, StorageError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| n.id != id);

        Ok((before - notes.len()) as u64)
    }
}

/// `NoteStore` whose connection is gone: every call fails.
pub struct BrokenStore;

#[async_trait]
impl NoteStore for BrokenStore {
    async fn create_note(&self, _input: NoteInput) -> Result<Note, StorageError> {
        Err(StorageError::ConnectionClosed)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StorageError> {
        Err(StorageError::ConnectionClosed)
    }

    async fn update_note(&self, _id: i64, _input: NoteInput) -> Result<u64, StorageError> {
        Err(StorageError::ConnectionClosed)
    }

    async fn delete_note(&self, _id: i64) -> Result<u64, StorageError> {
        Err(StorageError::ConnectionClosed)
    }
}
