//! Owned session state.
//!
//! A [`Session`] loads the record store once, applies every mutation as a
//! store-to-store transformation, and persists after each change. A failed
//! save is reported to the caller and never rolls back the in-memory store.

use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::{
    build_grid, counts_for, first_of_month, is_supported, month_name, shift_months,
    CalendarCell, DateKey, DayCounts, GardenError, Note, NoteType, RecordStorage, RecordStore,
    Result, MAX_YEAR, MIN_YEAR,
};

/// Outcome of persisting a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// The change is kept in memory but may not survive the session
    Unsaved { reason: String },
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// A note that was added, and whether it reached the slot
#[derive(Debug, Clone)]
pub struct Planted {
    pub note: Note,
    pub save: SaveStatus,
}

pub struct Session {
    storage: RecordStorage,
    records: RecordStore,
    /// Day 1 of the month being displayed
    displayed_month: NaiveDate,
}

impl Session {
    /// Loads the store and starts on the current local month.
    pub fn open(storage: RecordStorage) -> Self {
        let records = storage.load();
        Self {
            storage,
            records,
            displayed_month: first_of_month(Local::now().date_naive()),
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn records_for(&self, date_key: &DateKey) -> &[Note] {
        self.records.records_for(date_key)
    }

    pub fn counts_for(&self, date_key: &DateKey) -> DayCounts {
        counts_for(&self.records, date_key)
    }

    /// Adds a note and persists. Returns `None` for blank content, in which
    /// case nothing is written.
    pub fn add_note(&mut self, date_key: &DateKey, note_type: NoteType, content: &str) -> Option<Planted> {
        let (records, note) = self.records.add(date_key, note_type, content);
        let note = note?;
        info!("Planted {} note {} on {}", note_type, note.id(), date_key);

        let save = self.replace(records);
        Some(Planted { note, save })
    }

    /// Deletes a note and persists. Returns `None` when no note matched.
    pub fn delete_note(&mut self, date_key: &DateKey, id: &str) -> Option<SaveStatus> {
        let records = self.records.delete(date_key, id);
        if records == self.records {
            return None;
        }
        info!("Removed note {} from {}", id, date_key);
        Some(self.replace(records))
    }

    fn replace(&mut self, records: RecordStore) -> SaveStatus {
        self.records = records;
        match self.storage.persist(&self.records) {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!("Changes may not be saved: {}", e);
                SaveStatus::Unsaved {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn show_month(&mut self, date: NaiveDate) -> Result<()> {
        if !is_supported(date) {
            return Err(out_of_range());
        }
        self.displayed_month = first_of_month(date);
        Ok(())
    }

    /// Moves the displayed month by `offset` months. The displayed month is
    /// unchanged when the target is out of range.
    pub fn show_offset(&mut self, offset: i32) -> Result<()> {
        self.displayed_month = shift_months(self.displayed_month, offset).ok_or_else(out_of_range)?;
        Ok(())
    }

    pub fn show_previous_month(&mut self) -> Result<()> {
        self.show_offset(-1)
    }

    pub fn show_next_month(&mut self) -> Result<()> {
        self.show_offset(1)
    }

    pub fn month_title(&self) -> String {
        month_name(self.displayed_month)
    }

    /// The 42-cell grid for the displayed month
    pub fn grid(&self) -> Vec<CalendarCell> {
        build_grid(self.displayed_month)
    }
}

fn out_of_range() -> GardenError {
    GardenError::MonthOutOfRange {
        min_year: MIN_YEAR,
        max_year: MAX_YEAR,
    }
}
