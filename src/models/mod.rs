//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod participant;

// Re-export commonly used models
pub use user::{User, CreateUserRequest};
pub use event::{Event, CreateEventRequest, UpdateEventRequest, EventListQuery, Pagination};
pub use participant::{EventParticipant, ParticipantWithUser, ParticipantStatus};
