//! In-memory result collection
//!
//! Holds the authoritative ordered list of records. Every operation is
//! idempotent: re-applying the same insert, replace or remove leaves the
//! collection as it was after the first application.

use shared::{ChangeEvent, ResultId, ResultRecord};

/// What a store operation did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// Appended a record with a new id
    Inserted,
    /// Overwrote the record already holding the id
    Replaced,
    /// Removed the record holding the id
    Removed,
    /// No record matched; the collection is untouched
    Ignored,
}

impl StoreChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, StoreChange::Ignored)
    }
}

/// Ordered collection of results, unique by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    records: Vec<ResultRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection, e.g. after a full fetch.
    /// Duplicate ids in the input collapse onto the first position with the
    /// last value, matching `insert`.
    pub fn initialize(&mut self, records: Vec<ResultRecord>) {
        self.records.clear();
        for record in records {
            self.insert(record);
        }
    }

    /// Append a record. A record whose id is already present replaces the
    /// existing one in place, so a duplicate delivery never yields two
    /// records with one id.
    pub fn insert(&mut self, record: ResultRecord) -> StoreChange {
        match self.position(&record.id) {
            Some(index) => {
                self.records[index] = record;
                StoreChange::Replaced
            }
            None => {
                self.records.push(record);
                StoreChange::Inserted
            }
        }
    }

    /// Replace the record holding `id` wholesale. The stored record keeps
    /// `id` even if `record` carries another one. Unknown ids are a no-op.
    pub fn replace_by_id(&mut self, id: &ResultId, mut record: ResultRecord) -> StoreChange {
        match self.position(id) {
            Some(index) => {
                record.id = id.clone();
                self.records[index] = record;
                StoreChange::Replaced
            }
            None => StoreChange::Ignored,
        }
    }

    /// Remove the record holding `id`; unknown ids are a no-op
    pub fn remove_by_id(&mut self, id: &ResultId) -> StoreChange {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                StoreChange::Removed
            }
            None => StoreChange::Ignored,
        }
    }

    /// Apply a change event with its store semantics
    pub fn apply(&mut self, event: ChangeEvent) -> StoreChange {
        match event {
            ChangeEvent::New { result } => self.insert(result),
            ChangeEvent::Update { result } => {
                let id = result.id.clone();
                self.replace_by_id(&id, result)
            }
            ChangeEvent::Delete { id } => self.remove_by_id(&id),
        }
    }

    pub fn get(&self, id: &ResultId) -> Option<&ResultRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &ResultId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, Points};

    fn record(id: &str, points: f64) -> ResultRecord {
        ResultRecord {
            id: ResultId::from(id),
            student_name: format!("student-{id}"),
            team_name: Some("alpha".to_string()),
            program_name: "Essay".to_string(),
            category: Category::Single,
            points: Points::Number(points),
            prize: "First".to_string(),
        }
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut store = ResultStore::new();
        assert_eq!(store.insert(record("a", 1.0)), StoreChange::Inserted);
        assert_eq!(store.insert(record("b", 2.0)), StoreChange::Inserted);

        let ids: Vec<_> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_insert_keeps_latest_value() {
        let mut store = ResultStore::new();
        store.insert(record("a", 1.0));
        store.insert(record("b", 2.0));

        assert_eq!(store.insert(record("a", 9.0)), StoreChange::Replaced);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id.as_str(), "a");
        assert_eq!(store.get(&ResultId::from("a")).unwrap().score(), 9.0);
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let mut store = ResultStore::new();
        store.initialize(vec![record("a", 1.0), record("b", 2.0)]);
        let before = store.clone();

        let change = store.replace_by_id(&ResultId::from("zzz"), record("zzz", 5.0));

        assert_eq!(change, StoreChange::Ignored);
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = ResultStore::new();
        store.initialize(vec![record("a", 1.0)]);
        let before = store.clone();

        assert_eq!(store.remove_by_id(&ResultId::from("zzz")), StoreChange::Ignored);
        assert_eq!(store, before);
    }

    #[test]
    fn test_replace_is_full_replacement_and_keeps_target_id() {
        let mut store = ResultStore::new();
        store.initialize(vec![record("a", 1.0)]);

        let mut replacement = record("other", 4.0);
        replacement.team_name = None;
        assert_eq!(store.replace_by_id(&ResultId::from("a"), replacement), StoreChange::Replaced);

        let stored = &store.records()[0];
        assert_eq!(stored.id.as_str(), "a");
        assert_eq!(stored.team_name, None);
        assert_eq!(stored.score(), 4.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = ResultStore::new();
        store.initialize(vec![record("a", 1.0), record("b", 2.0)]);

        assert_eq!(store.remove_by_id(&ResultId::from("a")), StoreChange::Removed);
        assert_eq!(store.remove_by_id(&ResultId::from("a")), StoreChange::Ignored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_initialize_replaces_and_collapses_duplicates() {
        let mut store = ResultStore::new();
        store.insert(record("old", 1.0));

        store.initialize(vec![record("a", 1.0), record("b", 2.0), record("a", 3.0)]);

        assert_eq!(store.len(), 2);
        assert!(store.get(&ResultId::from("old")).is_none());
        assert_eq!(store.get(&ResultId::from("a")).unwrap().score(), 3.0);
    }

    #[test]
    fn test_apply_change_events() {
        let mut store = ResultStore::new();

        assert_eq!(store.apply(ChangeEvent::New { result: record("a", 1.0) }), StoreChange::Inserted);
        assert_eq!(
            store.apply(ChangeEvent::Update { result: record("a", 2.0) }),
            StoreChange::Replaced
        );
        assert_eq!(
            store.apply(ChangeEvent::Update { result: record("ghost", 2.0) }),
            StoreChange::Ignored
        );
        assert_eq!(
            store.apply(ChangeEvent::Delete { id: ResultId::from("a") }),
            StoreChange::Removed
        );
        assert!(store.is_empty());
    }
}
