//! # Storage Layer
//!
//! This module defines the persistence boundary for notes. The [`NoteStore`]
//! trait is the only thing the service layer knows about storage; which
//! backend sits behind it is explicit startup configuration, never a source
//! edit.
//!
//! ## Contract
//!
//! A store is durable keyed storage of [`Note`] records with four
//! operations: full-collection read, insert, partial update by id, and
//! physical delete by id. Id assignment belongs to the backend (a document
//! database mints its own ids; the local blob store mints UUIDs), so
//! `insert` takes a [`NewNote`] and returns the stored record.
//!
//! Soft-delete, restore, and archive are *not* store operations. They are
//! partial updates issued by the service layer; the store only ever sees
//! flag merges.
//!
//! ## Implementations
//!
//! - [`local::LocalStore`]: one JSON array blob in a single file, loaded at
//!   open and rewritten atomically on every mutation. No migrations, no
//!   schema version field.
//! - [`remote::RemoteStore`]: a network-backed document collection reached
//!   over HTTP, speaking the notekeep wire contract with a bounded timeout.
//! - [`memory::MemoryStore`]: for testing logic without filesystem or
//!   network I/O.
//!
//! The store is the sole writer of its medium; concurrent external
//! modification is out of scope. Operations are atomic per record, with no
//! cross-record transaction: two racing updates on one id resolve as
//! last-write-wins.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{NewNote, Note, NotePatch};

pub mod local;
pub mod memory;
pub mod remote;

/// Abstract interface for note persistence.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Read the full collection, in no particular order.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Persist a new note. The backend assigns the id and stamps both
    /// timestamps. Returns the stored record.
    async fn insert(&self, new: NewNote) -> Result<Note>;

    /// Merge a partial update onto the record with this id and bump its
    /// `updated_at`. Fails with `NotFound` if the id is absent.
    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note>;

    /// Physically remove the record. Idempotent: removing an absent id is a
    /// no-op, not an error.
    async fn remove(&self, id: Uuid) -> Result<()>;
}
