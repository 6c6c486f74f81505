//! Services module
//!
//! This module contains business logic services

pub mod capacity;
pub mod event;
pub mod rsvp;
pub mod status;

// Re-export commonly used services
pub use capacity::{evaluate, Decision};
pub use event::{EventService, EventView};
pub use rsvp::{RsvpService, RsvpOutcome, CancelOutcome, WAITLIST_MESSAGE};
pub use status::{EventStatus, project};

use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub rsvp_service: RsvpService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService) -> Self {
        Self {
            event_service: EventService::new(db.clone()),
            rsvp_service: RsvpService::new(db),
        }
    }
}
