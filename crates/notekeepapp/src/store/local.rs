//! Local blob store: the whole collection as one JSON array in one file.
//!
//! This mirrors a browser's local storage model: a single named key holding
//! a serialized list, read in full at open and rewritten in full on every
//! mutation. Writes go to a temp file in the same directory and are renamed
//! into place, so a crash mid-write never leaves a truncated blob.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::{NewNote, Note, NotePatch};

pub struct LocalStore {
    path: PathBuf,
    notes: Mutex<Vec<Note>>,
}

impl LocalStore {
    /// Open the blob at `path`, creating parent directories as needed.
    /// A missing file is an empty collection, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let notes = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            notes: Mutex::new(notes),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, notes: &[Note]) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(notes)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Note>>> {
        self.notes
            .lock()
            .map_err(|_| NoteError::Store("note cache lock poisoned".to_string()))
    }
}

#[async_trait]
impl NoteStore for LocalStore {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, new: NewNote) -> Result<Note> {
        let note = new.into_note(Uuid::new_v4());
        let mut notes = self.lock()?;
        notes.push(note.clone());
        self.persist(&notes)?;
        Ok(note)
    }

    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note> {
        let mut notes = self.lock()?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;
        patch.apply(note);
        let updated = note.clone();
        self.persist(&notes)?;
        Ok(updated)
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let mut notes = self.lock()?;
        notes.retain(|n| n.id != id);
        self.persist(&notes)?;
        Ok(())
    }
}
