//! Capacity evaluation
//!
//! Pure admission decision for an RSVP: given an event's capacity and the
//! current count of going participants, decide whether the request is
//! admitted directly or placed on the waitlist. All side effects live in the
//! RSVP service; keeping the decision pure makes the admission rule testable
//! without a database.

/// Outcome of a capacity evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A going slot is available
    Admit,
    /// The event is at capacity; the participant joins the waitlist
    Waitlist,
}

/// Decide whether an RSVP is admitted or waitlisted.
///
/// Admits when capacity is unset (unlimited) or when the going count is
/// below capacity. A non-positive capacity should never be stored (the
/// schema enforces capacity > 0) but is treated as always-waitlist rather
/// than trusted.
pub fn evaluate(capacity: Option<i32>, going_count: i64) -> Decision {
    match capacity {
        None => Decision::Admit,
        Some(cap) if cap <= 0 => Decision::Waitlist,
        Some(cap) if going_count < i64::from(cap) => Decision::Admit,
        Some(_) => Decision::Waitlist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unlimited_capacity_always_admits() {
        assert_eq!(evaluate(None, 0), Decision::Admit);
        assert_eq!(evaluate(None, 500), Decision::Admit);
    }

    #[test]
    fn test_admits_below_capacity() {
        assert_eq!(evaluate(Some(2), 0), Decision::Admit);
        assert_eq!(evaluate(Some(2), 1), Decision::Admit);
    }

    #[test]
    fn test_waitlists_at_capacity() {
        assert_eq!(evaluate(Some(2), 2), Decision::Waitlist);
        assert_eq!(evaluate(Some(2), 3), Decision::Waitlist);
    }

    #[test]
    fn test_zero_capacity_always_waitlists() {
        assert_eq!(evaluate(Some(0), 0), Decision::Waitlist);
        assert_eq!(evaluate(Some(-1), 0), Decision::Waitlist);
    }

    proptest! {
        #[test]
        fn admit_iff_room_remains(capacity in 1i32..10_000, going in 0i64..20_000) {
            let decision = evaluate(Some(capacity), going);
            let expected = if going < i64::from(capacity) {
                Decision::Admit
            } else {
                Decision::Waitlist
            };
            prop_assert_eq!(decision, expected);
        }
    }
}
