//! Per-day flower counts.

use serde::Serialize;

use crate::{CalendarCell, DateKey, NoteType, RecordStore};

/// How many notes of each type a day holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayCounts {
    pub positive: usize,
    pub needs_work: usize,
}

impl DayCounts {
    pub fn total(&self) -> usize {
        self.positive + self.needs_work
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Counts the notes of each type stored for `date_key`. Missing days count as zero.
pub fn counts_for(store: &RecordStore, date_key: &DateKey) -> DayCounts {
    store
        .records_for(date_key)
        .iter()
        .fold(DayCounts::default(), |mut counts, note| {
            match note.note_type() {
                NoteType::Positive => counts.positive += 1,
                NoteType::NeedsWork => counts.needs_work += 1,
            }
            counts
        })
}

/// One [`DayCounts`] per cell, in cell order.
pub fn counts_for_grid(store: &RecordStore, cells: &[CalendarCell]) -> Vec<DayCounts> {
    cells
        .iter()
        .map(|cell| counts_for(store, &cell.date_key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_grid_with_today;
    use chrono::NaiveDate;

    #[test]
    fn counts_each_type() {
        let day = DateKey::parse("2024-02-15").unwrap();
        let mut store = RecordStore::new();
        for (note_type, text) in [
            (NoteType::Positive, "a"),
            (NoteType::NeedsWork, "b"),
            (NoteType::Positive, "c"),
            (NoteType::NeedsWork, "d"),
            (NoteType::Positive, "e"),
        ] {
            store = store.add(&day, note_type, text).0;
        }

        let counts = counts_for(&store, &day);
        assert_eq!((counts.positive, counts.needs_work), (3, 2));
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn single_positive_note() {
        let day = DateKey::parse("2024-02-15").unwrap();
        let (store, _) = RecordStore::new().add(&day, NoteType::Positive, "Shared well");
        assert_eq!(
            counts_for(&store, &day),
            DayCounts {
                positive: 1,
                needs_work: 0
            }
        );
    }

    #[test]
    fn missing_day_is_zero() {
        let counts = counts_for(&RecordStore::new(), &DateKey::parse("2024-02-15").unwrap());
        assert!(counts.is_empty());
    }

    #[test]
    fn grid_counts_follow_cells() {
        let day = DateKey::parse("2024-03-02").unwrap();
        let (store, _) = RecordStore::new().add(&day, NoteType::NeedsWork, "late");
        let d = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let grid = build_grid_with_today(d, d);

        let counts = counts_for_grid(&store, &grid);
        assert_eq!(counts.len(), grid.len());
        let idx = grid.iter().position(|c| c.date_key == day).unwrap();
        assert_eq!(counts[idx].needs_work, 1);
        assert_eq!(counts.iter().map(DayCounts::total).sum::<usize>(), 1);
    }
}
