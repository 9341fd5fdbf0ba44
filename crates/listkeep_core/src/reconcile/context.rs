//! Edit timestamps and collision-free id allocation.
//!
//! # Invariants
//! - Issued ids are strictly increasing for one generator.
//! - An issued id is always greater than every id already in its scope.

use super::{ReconcileError, ReconcileResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// Allocates timestamp-shaped integer ids that never repeat.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_issued: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `max(now_millis, scope_max + 1, last_issued + 1)`.
    ///
    /// # Errors
    /// `IdSpaceExhausted` when either bound is already `i64::MAX`; nothing
    /// is recorded as issued.
    pub fn next_id(&mut self, now_millis: i64, scope_max: Option<i64>) -> ReconcileResult<i64> {
        let mut id = now_millis;
        for bound in [scope_max, self.last_issued].into_iter().flatten() {
            let above = bound
                .checked_add(1)
                .ok_or(ReconcileError::IdSpaceExhausted)?;
            id = id.max(above);
        }
        self.last_issued = Some(id);
        Ok(id)
    }

    pub fn last_issued(&self) -> Option<i64> {
        self.last_issued
    }
}

/// Clock reading and id source for one reconciler call.
pub struct EditContext<'ids> {
    now: DateTime<Utc>,
    ids: &'ids mut IdGenerator,
}

impl<'ids> EditContext<'ids> {
    pub fn new(now: DateTime<Utc>, ids: &'ids mut IdGenerator) -> Self {
        Self { now, ids }
    }

    /// Uses the current wall-clock time.
    pub fn now(ids: &'ids mut IdGenerator) -> Self {
        Self::new(Utc::now(), ids)
    }

    /// `lastEdited` value for lists touched in this call.
    pub fn last_edited(&self) -> String {
        format_timestamp(self.now)
    }

    pub fn next_id(&mut self, scope_max: Option<i64>) -> ReconcileResult<i64> {
        self.ids.next_id(self.now.timestamp_millis(), scope_max)
    }
}

/// Formats as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, IdGenerator};
    use crate::reconcile::ReconcileError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn same_millisecond_ids_do_not_collide() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id(1_000, None).unwrap();
        let second = ids.next_id(1_000, None).unwrap();
        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
    }

    #[test]
    fn ids_stay_above_existing_scope() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(5, Some(40)), Ok(41));
        assert_eq!(ids.next_id(100, Some(3)), Ok(100));
        assert_eq!(ids.last_issued(), Some(100));
    }

    #[test]
    fn full_id_space_is_reported_not_reused() {
        let mut ids = IdGenerator::new();
        assert_eq!(
            ids.next_id(1_000, Some(i64::MAX)),
            Err(ReconcileError::IdSpaceExhausted)
        );
        assert_eq!(ids.last_issued(), None);

        assert_eq!(ids.next_id(i64::MAX, None), Ok(i64::MAX));
        assert_eq!(
            ids.next_id(1_000, None),
            Err(ReconcileError::IdSpaceExhausted)
        );
        assert_eq!(ids.last_issued(), Some(i64::MAX));
    }

    #[test]
    fn timestamp_matches_iso_shape() {
        let at = Utc.with_ymd_and_hms(2025, 1, 4, 10, 34, 23).unwrap();
        assert_eq!(format_timestamp(at), "2025-01-04T10:34:23.000Z");
    }
}
