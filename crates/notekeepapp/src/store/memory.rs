use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::{NewNote, Note, NotePatch};

/// In-memory store for testing service and API logic without I/O.
///
/// Uses a `Mutex` for interior mutability so the `NoteStore` trait can take
/// `&self` everywhere; the critical sections are tiny and never await.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write failure simulation for testing error propagation.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("lock poisoned") = fail;
    }

    /// Insert a fully-formed record, bypassing id assignment. Lets tests
    /// control timestamps and flags directly.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn seed(&self, note: Note) {
        self.notes.lock().expect("lock poisoned").push(note);
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock().expect("lock poisoned") {
            return Err(NoteError::Store("simulated write error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.notes.lock().expect("lock poisoned").clone())
    }

    async fn insert(&self, new: NewNote) -> Result<Note> {
        self.check_writable()?;
        let note = new.into_note(Uuid::new_v4());
        self.notes.lock().expect("lock poisoned").push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note> {
        self.check_writable()?;
        let mut notes = self.notes.lock().expect("lock poisoned");
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;
        patch.apply(note);
        Ok(note.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        self.check_writable()?;
        self.notes.lock().expect("lock poisoned").retain(|n| n.id != id);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::model::{NewNote, Note};

    /// Build a note created `age_secs` seconds ago, with explicit flags.
    /// Explicit timestamps keep ordering tests deterministic.
    pub fn note_aged(title: &str, age_secs: i64) -> Note {
        let mut note = NewNote::new(title, "").into_note(Uuid::new_v4());
        let at = Utc::now() - Duration::seconds(age_secs);
        note.created_at = at;
        note.updated_at = at;
        note
    }

    pub fn pinned(mut note: Note) -> Note {
        note.is_pinned = true;
        note
    }

    pub fn archived(mut note: Note) -> Note {
        note.is_archived = true;
        note
    }

    pub fn trashed(mut note: Note) -> Note {
        note.is_deleted = true;
        note
    }
}
