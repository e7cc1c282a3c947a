//! Ordered biopsy record store.
//!
//! The store only holds records. List order is the canonical report order, so records are
//! appended on creation and never re-sorted. Derivation happens before a record reaches
//! [`BiopsyStore::replace`].

use crate::{Biopsy, BiopsyId, BiopsyLocation};

#[derive(Clone, Debug, Default)]
pub struct BiopsyStore {
    records: Vec<Biopsy>,
    active: Option<BiopsyId>,
}

impl BiopsyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with the defaults of `location`, appends it and makes it active.
    pub fn add(&mut self, location: BiopsyLocation) -> BiopsyId {
        let biopsy = Biopsy::new(location, self.records.len() + 1);
        let id = biopsy.id;
        tracing::debug!(biopsy = %id, location = %location, "added biopsy");
        self.records.push(biopsy);
        self.active = Some(id);
        id
    }

    /// Replaces the record with the same id. Unknown ids are ignored.
    pub fn replace(&mut self, biopsy: Biopsy) -> bool {
        match self.records.iter_mut().find(|b| b.id == biopsy.id) {
            Some(slot) => {
                *slot = biopsy;
                true
            }
            None => {
                tracing::debug!(biopsy = %biopsy.id, "ignored update of unknown biopsy");
                false
            }
        }
    }

    /// Removes the record with `id`. Other records keep their `sequence`.
    pub fn remove(&mut self, id: BiopsyId) -> bool {
        let before = self.records.len();
        self.records.retain(|b| b.id != id);
        let removed = self.records.len() != before;
        if removed {
            tracing::debug!(biopsy = %id, "removed biopsy");
            if self.active == Some(id) {
                self.active = None;
            }
        } else {
            tracing::debug!(biopsy = %id, "ignored removal of unknown biopsy");
        }
        removed
    }

    pub fn get(&self, id: BiopsyId) -> Option<&Biopsy> {
        self.records.iter().find(|b| b.id == id)
    }

    pub fn records(&self) -> &[Biopsy] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn active(&self) -> Option<BiopsyId> {
        self.active
    }

    /// Makes `id` the active record if it exists.
    pub fn set_active(&mut self, id: BiopsyId) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// 1-based display number of a record (its list position).
    pub fn display_index(&self, id: BiopsyId) -> Option<usize> {
        self.records.iter().position(|b| b.id == id).map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_and_activates() {
        let mut store = BiopsyStore::new();
        let first = store.add(BiopsyLocation::Stomach);
        let second = store.add(BiopsyLocation::Colon);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, first);
        assert_eq!(store.records()[1].id, second);
        assert_eq!(store.records()[1].sequence, 2);
        assert_eq!(store.active(), Some(second));
    }

    #[test]
    fn replace_unknown_id_is_a_noop() {
        let mut store = BiopsyStore::new();
        store.add(BiopsyLocation::Ileum);
        let stranger = Biopsy::new(BiopsyLocation::Ileum, 9);

        assert!(!store.replace(stranger));
        assert_eq!(store.len(), 1);
        assert_ne!(store.records()[0].sequence, 9);
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut store = BiopsyStore::new();
        let id = store.add(BiopsyLocation::Colon);
        store.add(BiopsyLocation::Colon);

        let mut edited = store.get(id).cloned().expect("record");
        edited.diagnosis = "Hiperplastik polip".into();
        assert!(store.replace(edited));
        assert_eq!(store.records()[0].diagnosis, "Hiperplastik polip");
    }

    #[test]
    fn remove_shifts_display_numbers_but_not_sequence() {
        let mut store = BiopsyStore::new();
        let a = store.add(BiopsyLocation::Stomach);
        let b = store.add(BiopsyLocation::Stomach);
        let c = store.add(BiopsyLocation::Stomach);

        assert!(store.remove(b));
        assert!(!store.remove(b));
        assert_eq!(store.display_index(a), Some(1));
        assert_eq!(store.display_index(c), Some(2));
        assert_eq!(store.get(c).map(|r| r.sequence), Some(3));
    }

    #[test]
    fn removing_active_record_clears_focus() {
        let mut store = BiopsyStore::new();
        let a = store.add(BiopsyLocation::Stomach);
        let b = store.add(BiopsyLocation::Stomach);
        assert!(store.set_active(a));
        store.remove(a);
        assert_eq!(store.active(), None);
        assert!(store.set_active(b));
        assert!(!store.set_active(a));
    }
}
