//! The in-memory record store.
//!
//! Every operation here returns a new store and leaves `self` untouched, so a
//! caller can compare before/after values to decide whether to persist.
//! Reading and writing the slot lives in [`crate::RecordStorage`].

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{DateKey, Note, NoteType};

/// Notes keyed by day, in insertion order within each day.
///
/// A day without notes is never stored as an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    days: BTreeMap<DateKey, Vec<Note>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note with a fresh id and the current time.
    ///
    /// Blank content (after trimming) is ignored: the returned store equals
    /// `self` and no note is created.
    pub fn add(&self, date_key: &DateKey, note_type: NoteType, content: &str) -> (Self, Option<Note>) {
        if content.trim().is_empty() {
            debug!("Ignoring blank {} note for {}", note_type, date_key);
            return (self.clone(), None);
        }

        let note = Note::new(note_type, content.to_string());
        (self.insert(date_key, note.clone()), Some(note))
    }

    /// Appends an already-built note to the end of a day.
    pub fn insert(&self, date_key: &DateKey, note: Note) -> Self {
        trace!("Appending note {} to {}", note.id(), date_key);
        let mut days = self.days.clone();
        days.entry(date_key.clone()).or_default().push(note);
        Self { days }
    }

    /// Removes the note with `id` from a day. Unknown days or ids leave the
    /// store unchanged.
    pub fn delete(&self, date_key: &DateKey, id: &str) -> Self {
        let Some(existing) = self.days.get(date_key) else {
            return self.clone();
        };
        if !existing.iter().any(|note| note.id() == id) {
            debug!("No note {} on {}, nothing to delete", id, date_key);
            return self.clone();
        }

        let mut days = self.days.clone();
        let remaining: Vec<Note> = existing.iter().filter(|n| n.id() != id).cloned().collect();
        if remaining.is_empty() {
            days.remove(date_key);
        } else {
            days.insert(date_key.clone(), remaining);
        }
        Self { days }
    }

    /// Notes for a day, empty when the day has none.
    pub fn records_for(&self, date_key: &DateKey) -> &[Note] {
        self.days.get(date_key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, date_key: &DateKey, id: &str) -> Option<&Note> {
        self.records_for(date_key).iter().find(|note| note.id() == id)
    }

    /// Days that have at least one note, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (&DateKey, &[Note])> {
        self.days.iter().map(|(key, notes)| (key, notes.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn note_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Drops days holding empty sequences, as found in older slots.
    pub(crate) fn normalized(mut self) -> Self {
        self.days.retain(|_, notes| !notes.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn add_appends_in_order_without_touching_input() {
        let empty = RecordStore::new();
        let day = key("2024-02-15");

        let (one, first) = empty.add(&day, NoteType::Positive, "Shared well");
        let (two, second) = one.add(&day, NoteType::NeedsWork, "Rushed lunch");

        assert!(empty.is_empty());
        assert_eq!(one.records_for(&day).len(), 1);
        let ids: Vec<&str> = two.records_for(&day).iter().map(Note::id).collect();
        assert_eq!(ids, [first.unwrap().id(), second.unwrap().id()]);
    }

    #[test]
    fn blank_content_is_a_no_op() {
        let (store, _) = RecordStore::new().add(&key("2024-02-15"), NoteType::Positive, "kept");
        let (after, note) = store.add(&key("2024-02-15"), NoteType::Positive, "  \n\t ");
        assert!(note.is_none());
        assert_eq!(after, store);
    }

    #[test]
    fn content_is_stored_as_given() {
        let (store, note) = RecordStore::new().add(&key("2024-02-15"), NoteType::Positive, "  padded ");
        assert_eq!(note.unwrap().content(), "  padded ");
        assert_eq!(store.note_count(), 1);
    }

    #[test]
    fn delete_undoes_add() {
        let day = key("2024-02-15");
        let (base, _) = RecordStore::new().add(&day, NoteType::Positive, "first");
        let (grown, note) = base.add(&day, NoteType::NeedsWork, "second");

        let shrunk = grown.delete(&day, note.unwrap().id());
        assert_eq!(shrunk, base);
    }

    #[test]
    fn deleting_last_note_removes_the_day() {
        let day = key("2024-02-15");
        let (store, note) = RecordStore::new().add(&day, NoteType::Positive, "only");
        let after = store.delete(&day, note.unwrap().id());
        assert_eq!(after, RecordStore::new());
        assert!(after.records_for(&day).is_empty());
    }

    #[test]
    fn delete_unknown_is_idempotent() {
        let day = key("2024-02-15");
        let (store, _) = RecordStore::new().add(&day, NoteType::Positive, "only");
        assert_eq!(store.delete(&day, "missing"), store);
        assert_eq!(store.delete(&key("2024-02-16"), "missing"), store);
    }

    #[test]
    fn absent_and_empty_days_read_the_same() {
        let store: RecordStore = serde_json::from_str(r#"{"2024-01-01": []}"#).unwrap();
        assert!(store.records_for(&key("2024-01-01")).is_empty());
        assert!(store.records_for(&key("2024-01-02")).is_empty());
        assert!(store.normalized().is_empty());
    }
}
