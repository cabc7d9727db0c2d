//! The in-memory event collection and its persisted copy.

use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::constants::EVENTS_STORAGE_KEY;
use crate::date_math::is_same_day;
use crate::error::DayGridResult;
use crate::event::{Event, EventPatch, NewEvent};
use crate::storage::{KeyValueStore, Storage};

/// Sole owner of event records.
///
/// Every mutation that changes the collection writes the whole list back
/// under `EVENTS_STORAGE_KEY`. Lookups are linear scans in insertion order.
pub struct EventIndex<S> {
    events: Vec<Event>,
    storage: Storage<S>,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> EventIndex<S> {
    /// Read the persisted collection once. Records that no longer parse, or
    /// that break the title and time-order rules, are skipped with a warning
    /// rather than discarding the whole list.
    pub fn load(storage: Storage<S>, clock: Arc<dyn Clock>) -> Self {
        let stored: Vec<serde_json::Value> = storage.load(EVENTS_STORAGE_KEY, Vec::new());

        let events: Vec<Event> = stored
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Event>(value) {
                Ok(event) => match event.validate() {
                    Ok(()) => Some(event),
                    Err(e) => {
                        warn!(id = %event.id, "Skipping invalid stored event: {e}");
                        None
                    }
                },
                Err(e) => {
                    warn!("Skipping unreadable stored event: {e}");
                    None
                }
            })
            .collect();

        debug!(count = events.len(), "Loaded events");

        EventIndex {
            events,
            storage,
            clock,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Insert a new event with a fresh id and `created_at == updated_at == now`.
    pub fn add(&mut self, new: NewEvent) -> DayGridResult<&Event> {
        new.validate()?;

        let event = Event::from_new(new, self.fresh_id(), self.clock.now());
        debug!(id = %event.id, date = %event.date, "Adding event");

        let index = self.events.len();
        self.events.push(event);
        self.persist();

        Ok(&self.events[index])
    }

    /// Merge `patch` into the event with `id`.
    ///
    /// Returns `Ok(false)` when no such event exists. A merge that would leave
    /// the event invalid is rejected and nothing changes. Any accepted update
    /// is persisted, even if no field value differs.
    pub fn update(&mut self, id: &str, patch: EventPatch) -> DayGridResult<bool> {
        let Some(position) = self.events.iter().position(|e| e.id == id) else {
            debug!(id = %id, "Ignoring update for unknown event");
            return Ok(false);
        };

        let merged = self.events[position].apply(&patch, self.clock.now());
        merged.validate()?;

        debug!(id = %id, "Updating event");
        self.events[position] = merged;
        self.persist();
        Ok(true)
    }

    /// Delete the event with `id`. Persists only if something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);

        if self.events.len() == before {
            return false;
        }

        debug!(id = %id, "Removed event");
        self.persist();
        true
    }

    /// Drop every event and delete the persisted entry itself.
    pub fn clear(&mut self) {
        debug!(count = self.events.len(), "Clearing all events");
        self.events.clear();
        self.storage.remove(EVENTS_STORAGE_KEY);
    }

    /// Events on the same calendar day as `date`, in insertion order.
    pub fn for_date<D: Datelike>(&self, date: &D) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| is_same_day(&e.date, date))
            .collect()
    }

    pub fn count_for_date<D: Datelike>(&self, date: &D) -> usize {
        self.events
            .iter()
            .filter(|e| is_same_day(&e.date, date))
            .count()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        self.storage.save(EVENTS_STORAGE_KEY, &self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::event::ValidationError;
    use crate::storage::MemoryStore;
    use crate::DayGridError;
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn index() -> (EventIndex<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::on(date(2024, 12, 1)));
        (EventIndex::load(Storage::new(store.clone()), clock), store)
    }

    #[test]
    fn test_add_assigns_id_and_timestamps() {
        let (mut index, store) = index();

        let event = index.add(NewEvent::new("Meeting", date(2024, 12, 25))).unwrap();
        assert!(!event.id.is_empty());
        assert_eq!(event.created_at, event.updated_at);

        let stored = store.raw(EVENTS_STORAGE_KEY).unwrap();
        assert!(stored.contains("\"Meeting\""));
    }

    #[test]
    fn test_add_rejects_invalid_event() {
        let (mut index, store) = index();

        let result = index.add(NewEvent::new("", date(2024, 12, 25)));
        assert!(matches!(
            result,
            Err(DayGridError::Validation(ValidationError::MissingTitle))
        ));
        assert!(index.is_empty());
        assert!(!store.contains_key(EVENTS_STORAGE_KEY));
    }

    #[test]
    fn test_ids_are_unique() {
        let (mut index, _) = index();
        let a = index.add(NewEvent::new("A", date(2024, 12, 25))).unwrap().id.clone();
        let b = index.add(NewEvent::new("B", date(2024, 12, 25))).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut index, store) = index();
        index.add(NewEvent::new("Meeting", date(2024, 12, 25))).unwrap();
        let before = index.events().to_vec();
        let stored_before = store.raw(EVENTS_STORAGE_KEY);

        let patch = EventPatch {
            title: Some("Changed".to_string()),
            ..Default::default()
        };
        assert!(!index.update("missing", patch).unwrap());

        assert_eq!(index.events(), before.as_slice());
        assert_eq!(store.raw(EVENTS_STORAGE_KEY), stored_before);
    }

    #[test]
    fn test_update_rejects_backwards_times() {
        let (mut index, _) = index();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let id = index
            .add(NewEvent::new("Standup", date(2024, 12, 2)).with_times(Some(ten), None))
            .unwrap()
            .id
            .clone();

        let patch = EventPatch {
            end_time: Some(Some(nine)),
            ..Default::default()
        };
        assert!(index.update(&id, patch).is_err());
        assert_eq!(index.get(&id).unwrap().end_time, None);
    }

    #[test]
    fn test_remove_only_persists_when_something_was_removed() {
        let (mut index, store) = index();
        let id = index
            .add(NewEvent::new("Meeting", date(2024, 12, 25)))
            .unwrap()
            .id
            .clone();

        store.remove_item(EVENTS_STORAGE_KEY).unwrap();
        assert!(!index.remove("missing"));
        assert!(!store.contains_key(EVENTS_STORAGE_KEY));

        assert!(index.remove(&id));
        assert_eq!(store.raw(EVENTS_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_load_skips_records_that_fail_validation() {
        let store = MemoryStore::new();
        store
            .set_item(
                EVENTS_STORAGE_KEY,
                r##"[
                    {"id":"ok","title":"Standup","date":"2024-12-02","startTime":"09:00","endTime":"09:15",
                     "color":"#000","createdAt":"2024-12-01T00:00:00Z","updatedAt":"2024-12-01T00:00:00Z"},
                    {"id":"backwards","title":"Review","date":"2024-12-02","startTime":"11:00","endTime":"10:00",
                     "color":"#000","createdAt":"2024-12-01T00:00:00Z","updatedAt":"2024-12-01T00:00:00Z"},
                    {"id":"untitled","title":"  ","date":"2024-12-02",
                     "color":"#000","createdAt":"2024-12-01T00:00:00Z","updatedAt":"2024-12-01T00:00:00Z"}
                ]"##,
            )
            .unwrap();

        let clock = Arc::new(FixedClock::on(date(2024, 12, 1)));
        let index = EventIndex::load(Storage::new(store), clock);

        assert_eq!(index.len(), 1);
        assert!(index.get("ok").is_some());
        assert!(index.get("backwards").is_none());
        assert!(index.get("untitled").is_none());
    }

    #[test]
    fn test_clear_removes_persisted_entry() {
        let (mut index, store) = index();
        index.add(NewEvent::new("Meeting", date(2024, 12, 25))).unwrap();

        index.clear();
        assert!(index.is_empty());
        assert!(!store.contains_key(EVENTS_STORAGE_KEY));
    }
}
