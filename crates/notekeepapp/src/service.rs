//! # Note Service
//!
//! The service layer owns the note lifecycle: which notes each view shows,
//! how they are ordered, and which flag flips each operation performs. It is
//! a thin facade over a [`NoteStore`], generic over the backend so the same
//! logic runs against the local blob, a remote server, or the in-memory
//! test store.
//!
//! ## Filtering and Ordering
//!
//! - **Active**: not deleted, not archived. Pinned notes first (stable
//!   within each group), then newest-created first within each pin group.
//! - **Archived**: archived and not deleted, newest-created first.
//! - **Trashed**: deleted (archived or not), newest-created first.
//!
//! The service never retries a failed store call and performs no optimistic
//! bookkeeping: callers re-fetch their view after a mutation resolves.

use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::model::{Lifecycle, NewNote, Note, NotePatch};
use crate::store::NoteStore;

pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Notes on the active board: pinned first, then newest first.
    pub async fn list_active(&self) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|n| n.lifecycle() == Lifecycle::Active)
            .collect();
        // Stable sort: pinned group first, created_at descending inside
        // each group.
        notes.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(notes)
    }

    pub async fn list_archived(&self) -> Result<Vec<Note>> {
        self.list_in(Lifecycle::Archived).await
    }

    pub async fn list_trashed(&self) -> Result<Vec<Note>> {
        self.list_in(Lifecycle::Trashed).await
    }

    /// The raw collection, unfiltered and unsorted. Backs the store parity
    /// route and id prefix resolution in clients.
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        self.store.list().await
    }

    async fn list_in(&self, state: Lifecycle) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|n| n.lifecycle() == state)
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    pub async fn create(&self, new: NewNote) -> Result<Note> {
        self.store.insert(new).await
    }

    pub async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note> {
        self.store.update(id, patch).await
    }

    /// Move a note to the trash. The archived flag is untouched, so a
    /// restored note returns to whichever view it came from.
    pub async fn soft_delete(&self, id: Uuid) -> Result<Note> {
        self.store.update(id, NotePatch::trash()).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<Note> {
        self.store.update(id, NotePatch::restore()).await
    }

    /// Flip the archived flag.
    pub async fn toggle_archive(&self, id: Uuid) -> Result<Note> {
        let current = self
            .store
            .list()
            .await?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;
        self.store
            .update(id, NotePatch::archived(!current.is_archived))
            .await
    }

    /// Remove the record for good. Idempotent: purging an id that is
    /// already gone succeeds.
    pub async fn permanent_delete(&self, id: Uuid) -> Result<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;
    use crate::store::memory::fixtures::{archived, note_aged, pinned, trashed};
    use crate::store::memory::MemoryStore;

    fn service_with(notes: Vec<Note>) -> NoteService<MemoryStore> {
        let store = MemoryStore::new();
        for note in notes {
            store.seed(note);
        }
        NoteService::new(store)
    }

    #[tokio::test]
    async fn active_excludes_archived_and_trashed() {
        let service = service_with(vec![
            note_aged("active", 30),
            archived(note_aged("archived", 20)),
            trashed(note_aged("trashed", 10)),
        ]);

        let active = service.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "active");
    }

    #[tokio::test]
    async fn active_orders_pinned_first_then_newest() {
        // A pinned and newest, C pinned but older, B unpinned and newer
        // than both: expect [A, C, B].
        let service = service_with(vec![
            pinned(note_aged("A", 10)),
            note_aged("B", 30),
            pinned(note_aged("C", 20)),
        ]);

        let titles: Vec<String> = service
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["A", "C", "B"]);
    }

    #[tokio::test]
    async fn unpinned_group_is_newest_first() {
        let service = service_with(vec![
            note_aged("oldest", 300),
            note_aged("newest", 100),
            note_aged("middle", 200),
        ]);

        let titles: Vec<String> = service
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn archived_view_excludes_trashed_archives() {
        let service = service_with(vec![
            archived(note_aged("kept", 20)),
            trashed(archived(note_aged("binned", 10))),
        ]);

        let archived_notes = service.list_archived().await.unwrap();
        assert_eq!(archived_notes.len(), 1);
        assert_eq!(archived_notes[0].title, "kept");

        // The archived-then-trashed note shows up in the trash instead.
        let trash = service.list_trashed().await.unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].title, "binned");
    }

    #[tokio::test]
    async fn create_then_list_shows_defaults() {
        let service = service_with(vec![]);
        service.create(NewNote::new("t", "c")).await.unwrap();

        let active = service.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        let note = &active[0];
        assert!(!note.is_pinned);
        assert!(!note.is_archived);
        assert!(!note.is_deleted);
        assert_eq!(note.color, Color::White);
    }

    #[tokio::test]
    async fn trash_then_restore_returns_to_archive_view() {
        let service = service_with(vec![archived(note_aged("filed", 10))]);
        let id = service.list_archived().await.unwrap()[0].id;

        service.soft_delete(id).await.unwrap();
        assert!(service.list_archived().await.unwrap().is_empty());
        assert_eq!(service.list_trashed().await.unwrap().len(), 1);

        service.restore(id).await.unwrap();
        assert!(service.list_trashed().await.unwrap().is_empty());
        assert!(service.list_active().await.unwrap().is_empty());
        assert_eq!(service.list_archived().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn toggle_archive_flips_both_ways() {
        let service = service_with(vec![note_aged("n", 10)]);
        let id = service.list_active().await.unwrap()[0].id;

        let archived_note = service.toggle_archive(id).await.unwrap();
        assert!(archived_note.is_archived);
        assert!(service.list_active().await.unwrap().is_empty());

        let back = service.toggle_archive(id).await.unwrap();
        assert!(!back.is_archived);
        assert_eq!(service.list_active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn permanent_delete_is_idempotent_and_total() {
        let service = service_with(vec![trashed(note_aged("gone", 10))]);
        let id = service.list_trashed().await.unwrap()[0].id;

        service.permanent_delete(id).await.unwrap();
        service.permanent_delete(id).await.unwrap();

        assert!(service.list_active().await.unwrap().is_empty());
        assert!(service.list_archived().await.unwrap().is_empty());
        assert!(service.list_trashed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn color_update_touches_nothing_else() {
        let service = service_with(vec![note_aged("n", 10)]);
        let before = service.list_active().await.unwrap()[0].clone();

        let after = service
            .update(
                before.id,
                NotePatch {
                    color: Some(Color::Yellow),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(after.color, Color::Yellow);
        assert_eq!(after.title, before.title);
        assert_eq!(after.content, before.content);
        assert_eq!(after.is_pinned, before.is_pinned);
        assert_eq!(after.is_archived, before.is_archived);
        assert_eq!(after.is_deleted, before.is_deleted);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn unknown_id_fails_with_not_found() {
        let service = service_with(vec![]);
        let id = Uuid::new_v4();

        for result in [
            service.update(id, NotePatch::pinned(true)).await,
            service.soft_delete(id).await,
            service.restore(id).await,
            service.toggle_archive(id).await,
        ] {
            match result {
                Err(NoteError::NotFound(err_id)) => assert_eq!(err_id, id),
                other => panic!("expected NotFound, got {:?}", other.map(|n| n.title)),
            }
        }
    }

    #[tokio::test]
    async fn store_failure_propagates_unchanged() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let service = NoteService::new(store);

        let result = service.create(NewNote::new("t", "c")).await;
        assert!(matches!(result, Err(NoteError::Store(_))));
    }

    #[tokio::test]
    async fn every_note_is_in_exactly_one_view() {
        let service = service_with(vec![
            note_aged("a", 10),
            pinned(note_aged("b", 20)),
            archived(note_aged("c", 30)),
            trashed(note_aged("d", 40)),
            trashed(archived(note_aged("e", 50))),
            trashed(pinned(note_aged("f", 60))),
        ]);

        let active = service.list_active().await.unwrap().len();
        let archived_count = service.list_archived().await.unwrap().len();
        let trashed_count = service.list_trashed().await.unwrap().len();
        let total = service.list_all().await.unwrap().len();

        assert_eq!(active + archived_count + trashed_count, total);
        assert_eq!(total, 6);
    }
}
