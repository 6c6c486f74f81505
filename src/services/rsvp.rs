//! RSVP service implementation
//!
//! Owns the participation state machine: none -> going | waitlisted ->
//! cancelled, with cancelled records revived by a later RSVP. Every mutation
//! runs inside a transaction that first locks the event row, so the
//! going-count read and the participant write behave as one atomic unit and
//! the capacity invariant holds under concurrent requests.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::DatabaseService;
use crate::models::participant::{EventParticipant, ParticipantStatus, ParticipantWithUser};
use crate::services::capacity::{self, Decision};
use crate::utils::errors::{GatherHubError, Result};
use crate::utils::logging;

/// User-facing notice returned alongside a waitlisted RSVP
pub const WAITLIST_MESSAGE: &str =
    "Event is at capacity. You have been added to the waitlist.";

/// Result of a successful RSVP
#[derive(Debug, Clone)]
pub struct RsvpOutcome {
    pub participant: EventParticipant,
    pub waitlisted: bool,
}

impl RsvpOutcome {
    /// Notice to surface to the caller, present only when waitlisted
    pub fn notice(&self) -> Option<&'static str> {
        self.waitlisted.then_some(WAITLIST_MESSAGE)
    }
}

/// Result of a successful cancellation
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub cancelled: EventParticipant,
    /// Waitlisted participant promoted into the freed going slot, if any
    pub promoted: Option<EventParticipant>,
}

/// RSVP service for managing event participation
#[derive(Clone)]
pub struct RsvpService {
    db: DatabaseService,
}

impl RsvpService {
    /// Create a new RsvpService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register a user for an event, admitting or waitlisting by capacity.
    ///
    /// A transaction conflict is retried once against fresh state; a second
    /// conflict surfaces as `CapacityConflict` instead of a generic failure.
    pub async fn rsvp(&self, user_id: Uuid, event_id: Uuid) -> Result<RsvpOutcome> {
        match self.try_rsvp(user_id, event_id).await {
            Err(e) if e.is_transaction_conflict() => {
                warn!(user_id = %user_id, event_id = %event_id, "RSVP transaction conflict, retrying once");
                self.try_rsvp(user_id, event_id).await.map_err(|e| {
                    if e.is_transaction_conflict() {
                        GatherHubError::CapacityConflict
                    } else {
                        e
                    }
                })
            }
            other => other,
        }
    }

    async fn try_rsvp(&self, user_id: Uuid, event_id: Uuid) -> Result<RsvpOutcome> {
        let mut tx = self.db.pool.begin().await?;

        // Row lock on the event serializes all RSVP/cancel traffic for it
        let event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(GatherHubError::EventNotFound { event_id })?;

        if !event.is_published {
            return Err(GatherHubError::EventNotAvailable);
        }
        if let Some(deadline) = event.rsvp_deadline {
            if Utc::now() > deadline {
                debug!(event_id = %event_id, "RSVP rejected: deadline passed");
                return Err(GatherHubError::EventNotAvailable);
            }
        }

        // The caller's own record is excluded so a repeated RSVP can never
        // displace the caller from a going slot they already hold
        let going = self
            .db
            .participants
            .count_going_excluding(&mut tx, event_id, user_id)
            .await?;

        let status = match capacity::evaluate(event.capacity, going) {
            Decision::Admit => ParticipantStatus::Going,
            Decision::Waitlist => ParticipantStatus::Waitlisted,
        };

        let participant = self
            .db
            .participants
            .upsert(&mut tx, event_id, user_id, status)
            .await?;

        tx.commit().await?;

        logging::log_rsvp_decision(user_id, event_id, status.as_str());

        Ok(RsvpOutcome {
            waitlisted: status == ParticipantStatus::Waitlisted,
            participant,
        })
    }

    /// Cancel a user's RSVP, promoting the longest-waiting waitlisted
    /// participant when a going slot frees up.
    pub async fn cancel(&self, user_id: Uuid, event_id: Uuid) -> Result<CancelOutcome> {
        match self.try_cancel(user_id, event_id).await {
            Err(e) if e.is_transaction_conflict() => {
                warn!(user_id = %user_id, event_id = %event_id, "Cancel transaction conflict, retrying once");
                self.try_cancel(user_id, event_id).await.map_err(|e| {
                    if e.is_transaction_conflict() {
                        GatherHubError::CapacityConflict
                    } else {
                        e
                    }
                })
            }
            other => other,
        }
    }

    async fn try_cancel(&self, user_id: Uuid, event_id: Uuid) -> Result<CancelOutcome> {
        let mut tx = self.db.pool.begin().await?;

        let event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(GatherHubError::EventNotFound { event_id })?;

        let active = self
            .db
            .participants
            .find_active(&mut tx, event_id, user_id)
            .await?
            .ok_or(GatherHubError::NotRegistered { event_id })?;

        let freed_going_slot = active.participant_status() == Some(ParticipantStatus::Going);
        let cancelled = self
            .db
            .participants
            .mark_cancelled(&mut tx, active.id)
            .await?;

        // Promotion only matters for capacity-limited events; unlimited
        // events never accumulate a waitlist
        let mut promoted = None;
        if freed_going_slot && event.capacity.is_some() {
            let going = self
                .db
                .participants
                .count_going_in_tx(&mut tx, event_id)
                .await?;
            if capacity::evaluate(event.capacity, going) == Decision::Admit {
                if let Some(waiting) = self
                    .db
                    .participants
                    .oldest_waitlisted(&mut tx, event_id)
                    .await?
                {
                    let record = self.db.participants.promote(&mut tx, waiting.id).await?;
                    info!(
                        user_id = %record.user_id,
                        event_id = %event_id,
                        "Promoted waitlisted participant into freed slot"
                    );
                    promoted = Some(record);
                }
            }
        }

        tx.commit().await?;

        info!(user_id = %user_id, event_id = %event_id, "RSVP cancelled");

        Ok(CancelOutcome { cancelled, promoted })
    }

    /// List all non-cancelled participants for an event with public user
    /// fields, FIFO by RSVP time
    pub async fn list_participants(&self, event_id: Uuid) -> Result<Vec<ParticipantWithUser>> {
        if self.db.events.find_by_id(event_id).await?.is_none() {
            return Err(GatherHubError::EventNotFound { event_id });
        }

        self.db.participants.list_with_users(event_id).await
    }

    /// Current going count for an event
    pub async fn going_count(&self, event_id: Uuid) -> Result<i64> {
        self.db.participants.count_going(event_id).await
    }
}
