//! Event participant model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub is_checked_in: bool,
    pub rsvp_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl EventParticipant {
    /// Parsed status; a stored value outside the known set is a data bug
    pub fn participant_status(&self) -> Option<ParticipantStatus> {
        ParticipantStatus::parse(&self.status)
    }

    /// A record still occupying a going or waitlist slot
    pub fn is_active(&self) -> bool {
        self.cancelled_at.is_none() && self.status != ParticipantStatus::Cancelled.as_str()
    }
}

/// Participant record joined with the minimal public user fields
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ParticipantWithUser {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub is_checked_in: bool,
    pub rsvp_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image: Option<String>,
}

/// A user's relationship to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Going,
    Waitlisted,
    Cancelled,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Going => "going",
            ParticipantStatus::Waitlisted => "waitlisted",
            ParticipantStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "going" => Some(ParticipantStatus::Going),
            "waitlisted" => Some(ParticipantStatus::Waitlisted),
            "cancelled" => Some(ParticipantStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    fn record(status: &str, cancelled: bool) -> EventParticipant {
        EventParticipant {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: status.to_string(),
            is_checked_in: false,
            rsvp_at: Utc::now(),
            cancelled_at: cancelled.then(Utc::now),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ParticipantStatus::Going,
            ParticipantStatus::Waitlisted,
            ParticipantStatus::Cancelled,
        ] {
            assert_eq!(ParticipantStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ParticipantStatus::parse("maybe"), None);
    }

    #[test]
    fn test_participant_status_rejects_unknown_values() {
        assert_eq!(
            record("going", false).participant_status(),
            Some(ParticipantStatus::Going)
        );
        assert_eq!(record("maybe", false).participant_status(), None);
    }

    #[test]
    fn test_is_active_tracks_cancellation() {
        assert!(record("going", false).is_active());
        assert!(record("waitlisted", false).is_active());
        assert!(!record("cancelled", true).is_active());
    }
}
