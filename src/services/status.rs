//! Event status projection
//!
//! Derives an event's display status from its publish flag and date. The
//! status is never persisted, so it can never go stale; every read path
//! (listings, detail views, admin views) calls this one function.
//!
//! Calendar-day comparison is pinned to UTC. Mixing the server's local day
//! with the viewer's local day yields different labels for the same event
//! on different pages, so a single timezone is used everywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Event;

/// Display status of an event, computed at read time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Unpublished, regardless of date
    Draft,
    /// Scheduled for the current UTC calendar day
    Ongoing,
    /// Strictly in the past
    Past,
    /// In the future
    Upcoming,
}

/// Project an event's status from its publish flag and date
pub fn project(event: &Event, now: DateTime<Utc>) -> EventStatus {
    project_parts(event.is_published, event.date, now)
}

/// Projection over the raw parts, for callers without a full event row
pub fn project_parts(
    is_published: bool,
    date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EventStatus {
    if !is_published {
        return EventStatus::Draft;
    }

    if date.date_naive() == now.date_naive() {
        return EventStatus::Ongoing;
    }

    if date < now {
        EventStatus::Past
    } else {
        EventStatus::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_unpublished_is_always_draft() {
        let now = at(2026, 6, 15, 12);
        for date in [at(2026, 6, 15, 18), at(2020, 1, 1, 0), at(2030, 1, 1, 0)] {
            assert_eq!(project_parts(false, date, now), EventStatus::Draft);
        }
    }

    #[test]
    fn test_same_utc_day_is_ongoing() {
        let now = at(2026, 6, 15, 12);
        // Earlier the same day still counts as ongoing, not past
        assert_eq!(project_parts(true, at(2026, 6, 15, 8), now), EventStatus::Ongoing);
        assert_eq!(project_parts(true, at(2026, 6, 15, 23), now), EventStatus::Ongoing);
    }

    #[test]
    fn test_past_and_upcoming() {
        let now = at(2026, 6, 15, 12);
        assert_eq!(project_parts(true, at(2026, 6, 14, 23), now), EventStatus::Past);
        assert_eq!(project_parts(true, at(2026, 6, 16, 0), now), EventStatus::Upcoming);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let now = at(2026, 6, 15, 12);
        let date = at(2026, 6, 20, 19);
        assert_eq!(
            project_parts(true, date, now),
            project_parts(true, date, now)
        );
    }
}
