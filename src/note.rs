//! Core data structures for the littlegarden application.
//!
//! A note is a "flower" planted on a calendar day: red for something that went
//! well, blue for something to improve.
use std::{fmt, str::FromStr};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::GardenError;

/// Category of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteType {
    /// Good job, stored as `"red"`
    #[serde(rename = "red")]
    Positive,
    /// Room for improvement, stored as `"blue"`
    #[serde(rename = "blue")]
    NeedsWork,
}

impl NoteType {
    /// Raw tag used in the persisted slot
    pub fn tag(&self) -> &'static str {
        match self {
            NoteType::Positive => "red",
            NoteType::NeedsWork => "blue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoteType::Positive => "positive",
            NoteType::NeedsWork => "needs work",
        }
    }
}

impl FromStr for NoteType {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "red" | "good" => Ok(NoteType::Positive),
            "needs-work" | "needswork" | "blue" | "improve" => Ok(NoteType::NeedsWork),
            _ => Err(GardenError::InvalidNoteType {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a single note planted on a day.
///
/// Notes are immutable once created; the only way to change a day is to
/// delete a note and add another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    id: String,
    /// Flower colour
    #[serde(rename = "type")]
    note_type: NoteType,
    /// Free-form text
    content: String,
    /// When the note was created, stored as epoch milliseconds
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a fresh UUID and the current time
    pub fn new(note_type: NoteType, content: String) -> Self {
        // Millisecond precision, same as the slot
        Self::with_timestamp(note_type, content, Utc::now().trunc_subsecs(3))
    }

    pub fn with_timestamp(note_type: NoteType, content: String, created_at: DateTime<Utc>) -> Self {
        Note {
            id: Uuid::new_v4().to_string(),
            note_type,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
