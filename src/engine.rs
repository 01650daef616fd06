//! Scheduling engine: the only place review records are created or retired.
//!
//! Two transitions exist. Scheduling a topic inserts a cycle-1 record due
//! after a chosen delay in hours. Completing a review computes the next
//! interval from the performance score, deletes the old record and inserts
//! its successor — in that order, serialized, so a racing read never sees
//! both. The in-between state where the delete landed but the insert failed
//! is reported as [`ScheduleError::BrokenLineage`] with the successor
//! attached, never dropped silently.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::error::ScheduleError;
use crate::models::{ReviewRecord, Score, interval};
use crate::store::ReviewStore;

pub struct SchedulingEngine<S: ReviewStore> {
    store: S,
    next_id: i64,
    clock: fn() -> DateTime<Utc>,
}

impl<S: ReviewStore> SchedulingEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Utc::now)
    }

    /// Engine with a replaceable time source, for tests.
    pub fn with_clock(store: S, clock: fn() -> DateTime<Utc>) -> Self {
        // Ids are epoch-millisecond seeded and handed out monotonically,
        // like the timestamp ids of the original web app
        let next_id = clock().timestamp_millis();
        Self {
            store,
            next_id,
            clock,
        }
    }

    fn fresh_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Schedules the first review of a topic, due `delay_hours` from now.
    pub fn schedule_initial(
        &mut self,
        topic: &str,
        delay_hours: i64,
    ) -> Result<ReviewRecord, ScheduleError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ScheduleError::EmptyTopic);
        }

        let due_date = (self.clock)() + Duration::hours(delay_hours);
        let record = ReviewRecord::initial(self.fresh_id(), topic.to_string(), due_date);

        self.store.insert(record.clone())?;
        info!("scheduled '{}' for {}", record.topic, record.due_date);
        Ok(record)
    }

    /// Completes a review and schedules its successor.
    ///
    /// The score is validated before anything mutates, and the record is
    /// re-fetched from the store rather than trusted from a UI cache.
    pub fn complete_review(
        &mut self,
        id: i64,
        correct: u32,
        total: u32,
    ) -> Result<ReviewRecord, ScheduleError> {
        let score = Score::new(correct, total)?;

        let record = self
            .store
            .find_by_id(id)?
            .ok_or(ScheduleError::NotFound(id))?;

        let next_days = interval::next_interval(record.cycle, record.last_interval, score);
        let due_date = (self.clock)() + Duration::days(next_days as i64);
        let successor = record.successor(self.fresh_id(), next_days, due_date);

        // Delete must be confirmed before the insert goes out, otherwise a
        // racing list() could observe old and new at once
        self.store.delete_by_id(id)?;
        if let Err(source) = self.store.insert(successor.clone()) {
            warn!(
                "lineage for '{}' broke: old record {} deleted, successor not stored",
                successor.topic, id
            );
            return Err(ScheduleError::BrokenLineage {
                record: Box::new(successor),
                source,
            });
        }

        info!(
            "completed '{}' at {:.0}%: next review in {} days (cycle {})",
            successor.topic,
            score.percent(),
            next_days,
            successor.cycle
        );
        Ok(successor)
    }

    /// Removes a review outright. Safe to call twice.
    pub fn delete_review(&mut self, id: i64) -> Result<(), ScheduleError> {
        self.store.delete_by_id(id)?;
        Ok(())
    }

    /// Re-inserts a record from a backup. Ids keep their imported values;
    /// the id source jumps past them so future records never collide.
    pub fn restore(&mut self, record: ReviewRecord) -> Result<(), ScheduleError> {
        if record.topic.trim().is_empty() {
            return Err(ScheduleError::EmptyTopic);
        }
        if record.id >= self.next_id {
            self.next_id = record.id + 1;
        }
        self.store.insert(record)?;
        Ok(())
    }

    /// All live reviews, ascending by due date.
    pub fn reviews(&self) -> Result<Vec<ReviewRecord>, ScheduleError> {
        Ok(self.store.list()?)
    }

    pub fn contains(&self, id: i64) -> Result<bool, ScheduleError> {
        Ok(self.store.find_by_id(id)?.is_some())
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn engine() -> SchedulingEngine<MemoryStore> {
        SchedulingEngine::with_clock(MemoryStore::new(), noon)
    }

    #[test]
    fn test_schedule_initial() {
        let mut engine = engine();
        let record = engine.schedule_initial("Cardiology", 24).unwrap();

        assert_eq!(record.cycle, 1);
        assert_eq!(record.last_interval, 0);
        assert_eq!(record.due_date, noon() + Duration::hours(24));

        let listed = engine.reviews().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[test]
    fn test_empty_topic_rejected_without_mutation() {
        let mut engine = engine();
        assert!(matches!(
            engine.schedule_initial("   ", 24),
            Err(ScheduleError::EmptyTopic)
        ));
        assert!(engine.reviews().unwrap().is_empty());
    }

    #[test]
    fn test_completion_replaces_the_record() {
        let mut engine = engine();
        let first = engine.schedule_initial("Cardiology", 24).unwrap();
        let second = engine.complete_review(first.id, 32, 40).unwrap();

        assert_eq!(second.cycle, 2);
        assert_eq!(second.last_interval, 28); // 80% on cycle 1
        assert_eq!(second.due_date, noon() + Duration::days(28));
        assert_ne!(second.id, first.id);

        // Exactly one live record per lineage: old id gone, successor in
        let listed = engine.reviews().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
        assert!(!engine.contains(first.id).unwrap());
    }

    #[test]
    fn test_cardiology_lineage_scenario() {
        let mut engine = engine();
        let r1 = engine.schedule_initial("Cardiology", 24).unwrap();

        // 80% on cycle 1 -> table gives 28 days
        let r2 = engine.complete_review(r1.id, 32, 40).unwrap();
        assert_eq!((r2.cycle, r2.last_interval), (2, 28));

        // 37.5% on cycle 2 -> 28 * 1.0 = 28
        let r3 = engine.complete_review(r2.id, 15, 40).unwrap();
        assert_eq!((r3.cycle, r3.last_interval), (3, 28));

        // 12.5% on cycle 3 -> ceil(28 * 0.5) = 14
        let r4 = engine.complete_review(r3.id, 5, 40).unwrap();
        assert_eq!((r4.cycle, r4.last_interval), (4, 14));
        assert_eq!(r4.due_date, noon() + Duration::days(14));
        assert_eq!(r4.topic, "Cardiology");
    }

    #[test]
    fn test_invalid_score_leaves_store_untouched() {
        let mut engine = engine();
        let record = engine.schedule_initial("Cardiology", 24).unwrap();

        assert!(matches!(
            engine.complete_review(record.id, 0, 0),
            Err(ScheduleError::InvalidScore(_))
        ));
        assert!(matches!(
            engine.complete_review(record.id, 41, 40),
            Err(ScheduleError::InvalidScore(_))
        ));

        let listed = engine.reviews().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
        assert_eq!(listed[0].cycle, 1);
    }

    #[test]
    fn test_completing_missing_id_is_not_found() {
        let mut engine = engine();
        assert!(matches!(
            engine.complete_review(12345, 10, 40),
            Err(ScheduleError::NotFound(12345))
        ));
    }

    #[test]
    fn test_delete_review_is_idempotent() {
        let mut engine = engine();
        let record = engine.schedule_initial("Cardiology", 24).unwrap();

        engine.delete_review(record.id).unwrap();
        engine.delete_review(record.id).unwrap();
        assert!(engine.reviews().unwrap().is_empty());
    }

    #[test]
    fn test_listing_stays_sorted_across_lineages() {
        let mut engine = engine();
        let far = engine.schedule_initial("Pharmacology", 72).unwrap();
        let near = engine.schedule_initial("Cardiology", 1).unwrap();

        let topics: Vec<String> = engine
            .reviews()
            .unwrap()
            .into_iter()
            .map(|r| r.topic)
            .collect();
        assert_eq!(topics, vec!["Cardiology", "Pharmacology"]);

        // Completing the near one pushes it 28 days out, behind the far one
        engine.complete_review(near.id, 40, 40).unwrap();
        let topics: Vec<String> = engine
            .reviews()
            .unwrap()
            .into_iter()
            .map(|r| r.topic)
            .collect();
        assert_eq!(topics, vec!["Pharmacology", "Cardiology"]);
        assert!(engine.contains(far.id).unwrap());
    }

    #[test]
    fn test_restore_bumps_id_source() {
        let mut engine = engine();
        let imported = ReviewRecord::initial(i64::MAX - 10, "Imported".to_string(), noon());
        engine.restore(imported).unwrap();

        let fresh = engine.schedule_initial("New topic", 24).unwrap();
        assert!(fresh.id > i64::MAX - 10);
    }

    /// Store whose inserts start failing on demand, to exercise the
    /// delete-succeeded/insert-failed window.
    struct FlakyStore {
        inner: MemoryStore,
        fail_inserts: bool,
    }

    impl ReviewStore for FlakyStore {
        fn insert(&mut self, record: ReviewRecord) -> Result<(), StoreError> {
            if self.fail_inserts {
                return Err(StoreError::Corrupt("simulated write failure".into()));
            }
            self.inner.insert(record)
        }

        fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
            self.inner.delete_by_id(id)
        }

        fn list(&self) -> Result<Vec<ReviewRecord>, StoreError> {
            self.inner.list()
        }

        fn find_by_id(&self, id: i64) -> Result<Option<ReviewRecord>, StoreError> {
            self.inner.find_by_id(id)
        }
    }

    #[test]
    fn test_broken_lineage_is_reported_with_the_lost_record() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            fail_inserts: false,
        };
        let mut engine = SchedulingEngine::with_clock(store, noon);
        let record = engine.schedule_initial("Cardiology", 24).unwrap();

        engine.store.fail_inserts = true;
        let err = engine.complete_review(record.id, 32, 40).unwrap_err();

        match err {
            ScheduleError::BrokenLineage { record: lost, .. } => {
                assert_eq!(lost.topic, "Cardiology");
                assert_eq!(lost.cycle, 2);
            }
            other => panic!("expected BrokenLineage, got {other:?}"),
        }
        // The dangerous state really happened: zero live records remain
        assert!(engine.reviews().unwrap().is_empty());
    }
}
