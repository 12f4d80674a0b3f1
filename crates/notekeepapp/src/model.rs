//! # Domain Model: Notes, Patches, and the Lifecycle View
//!
//! This module defines the single persisted entity, [`Note`], along with the
//! payload types the rest of the system exchanges:
//!
//! - [`NewNote`]: a create payload. Every field is defaulted, so an empty
//!   JSON object is a valid (if useless) note.
//! - [`NotePatch`]: a partial update. Only the fields present in the patch
//!   are merged onto the stored record; `updated_at` is bumped on merge.
//! - [`Lifecycle`]: the derived three-state view of a note.
//!
//! ## Lifecycle Precedence
//!
//! A note carries two independent flags, `is_archived` and `is_deleted`.
//! For filtering purposes exactly one lifecycle state applies:
//!
//! ```text
//! is_deleted = true                      → Trashed   (wins over archived)
//! is_archived = true, is_deleted = false → Archived
//! otherwise                              → Active
//! ```
//!
//! The flags themselves stay independent: trashing an archived note leaves
//! `is_archived` set, so restoring it puts it back in the archive view, not
//! the active board. Transitions are flag flips, not a guarded machine.
//!
//! ## Wire Shape
//!
//! Notes serialize to camelCase JSON (`isPinned`, `createdAt`, ...), which is
//! the shape the REST layer and the remote store exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NoteError;

/// The fixed color palette. Unknown tokens are rejected during
/// deserialization, which is how payload validation happens at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Pink,
    Brown,
    Gray,
}

impl Color {
    pub const ALL: [Color; 11] = [
        Color::White,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Teal,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Brown,
        Color::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Teal => "teal",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Gray => "gray",
        }
    }
}

impl std::str::FromStr for Color {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let tokens: Vec<&str> = Color::ALL.iter().map(|c| c.as_str()).collect();
                NoteError::Validation(format!(
                    "unknown color '{}' (expected one of: {})",
                    s,
                    tokens.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived lifecycle state. Exactly one applies to any flag combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Archived,
    Trashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub color: Color,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// The derived lifecycle state. `is_deleted` takes precedence over
    /// `is_archived` when both are set.
    pub fn lifecycle(&self) -> Lifecycle {
        if self.is_deleted {
            Lifecycle::Trashed
        } else if self.is_archived {
            Lifecycle::Archived
        } else {
            Lifecycle::Active
        }
    }
}

/// Create payload. The store assigns the id and stamps both timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub is_pinned: bool,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Materialize the payload into a full record under the given id.
    pub fn into_note(self, id: Uuid) -> Note {
        let now = Utc::now();
        Note {
            id,
            title: self.title,
            content: self.content,
            color: self.color,
            is_pinned: self.is_pinned,
            is_archived: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields leave the stored record untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl NotePatch {
    /// Patch that moves a note to the trash. The archived flag is untouched.
    pub fn trash() -> Self {
        Self {
            is_deleted: Some(true),
            ..Default::default()
        }
    }

    /// Patch that takes a note out of the trash. The archived flag is
    /// untouched, so an archived-then-trashed note returns to the archive.
    pub fn restore() -> Self {
        Self {
            is_deleted: Some(false),
            ..Default::default()
        }
    }

    pub fn archived(flag: bool) -> Self {
        Self {
            is_archived: Some(flag),
            ..Default::default()
        }
    }

    pub fn pinned(flag: bool) -> Self {
        Self {
            is_pinned: Some(flag),
            ..Default::default()
        }
    }

    /// Merge the present fields onto `note` and bump `updated_at`.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(color) = self.color {
            note.color = color;
        }
        if let Some(pinned) = self.is_pinned {
            note.is_pinned = pinned;
        }
        if let Some(archived) = self.is_archived {
            note.is_archived = archived;
        }
        if let Some(deleted) = self.is_deleted {
            note.is_deleted = deleted;
        }
        note.updated_at = Utc::now();
    }
}
