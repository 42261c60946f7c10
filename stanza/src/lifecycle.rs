//! State transitions for a single reservation.
//!
//! The state machine has four states derived from the three lifecycle
//! flags: `Booked` (initial), `CheckedIn`, `CheckedOut` (terminal) and
//! `Cancelled` (terminal, reachable from any point). Transitions are pure
//! functions over an owned `&mut Reservation`: they either mutate the
//! record and return `Ok`, or leave it untouched and return the typed
//! failure. Availability side effects live in
//! [`FrontDesk`](crate::desk::FrontDesk), not here.
//!
//! Two transitions are deliberately permissive:
//! - [`cancel`] is idempotent and legal at any lifecycle point, including
//!   after check-out.
//! - [`update_details`] re-validates nothing, not even date order.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, Stay};

/// The lifecycle state of a reservation, derived from its flags.
///
/// `Cancelled` takes precedence over the other flags when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationState {
    /// Created, not yet checked in.
    Booked,
    /// Guest has checked in.
    CheckedIn,
    /// Guest has checked out. Terminal.
    CheckedOut,
    /// Cancelled. Terminal.
    Cancelled,
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Booked => write!(f, "booked"),
            Self::CheckedIn => write!(f, "checked-in"),
            Self::CheckedOut => write!(f, "checked-out"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Returns the derived lifecycle state of a reservation.
#[must_use]
pub const fn state(reservation: &Reservation) -> ReservationState {
    if reservation.cancelled {
        ReservationState::Cancelled
    } else if reservation.checked_out {
        ReservationState::CheckedOut
    } else if reservation.checked_in {
        ReservationState::CheckedIn
    } else {
        ReservationState::Booked
    }
}

/// Performs check-in.
///
/// # Errors
///
/// Returns [`Error::AlreadyCheckedIn`] if check-in was already performed;
/// the record is left unchanged.
pub fn check_in(reservation: &mut Reservation) -> Result<()> {
    if reservation.checked_in {
        return Err(Error::AlreadyCheckedIn {
            reservation: reservation.id(),
        });
    }
    reservation.checked_in = true;
    Ok(())
}

/// Performs check-out.
///
/// # Errors
///
/// Returns [`Error::CheckInRequired`] if check-in has not been performed;
/// the record is left unchanged.
pub fn check_out(reservation: &mut Reservation) -> Result<()> {
    if !reservation.checked_in {
        return Err(Error::CheckInRequired {
            reservation: reservation.id(),
        });
    }
    reservation.checked_out = true;
    Ok(())
}

/// Cancels the reservation.
///
/// Idempotent and permitted at any lifecycle point, including after
/// check-out. Cancelling an already-cancelled reservation is not an
/// error.
pub fn cancel(reservation: &mut Reservation) {
    reservation.cancelled = true;
}

/// Overwrites occupant count and stay dates.
///
/// No re-validation is performed against date order or room availability;
/// the fields are written exactly as given. The lifecycle flags are not
/// touched.
pub fn update_details(reservation: &mut Reservation, occupants: u32, stay: Stay) {
    reservation.set_details(occupants, stay);
}

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::{GuestId, ReservationId};
    use crate::room::RoomId;
    use chrono::NaiveDate;

    fn fresh() -> Reservation {
        let stay = Stay::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
        )
        .unwrap();
        Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay)
            .occupants(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_initial_state_is_booked() {
        let reservation = fresh();
        assert_eq!(state(&reservation), ReservationState::Booked);
    }

    #[test]
    fn test_check_in() {
        let mut reservation = fresh();
        check_in(&mut reservation).unwrap();
        assert!(reservation.checked_in());
        assert_eq!(state(&reservation), ReservationState::CheckedIn);
    }

    #[test]
    fn test_double_check_in_rejected() {
        let mut reservation = fresh();
        check_in(&mut reservation).unwrap();

        let err = check_in(&mut reservation).unwrap_err();
        assert!(matches!(err, Error::AlreadyCheckedIn { .. }));
        // Flags unchanged by the failed call
        assert!(reservation.checked_in());
        assert!(!reservation.checked_out());
    }

    #[test]
    fn test_check_out_requires_check_in() {
        let mut reservation = fresh();
        let err = check_out(&mut reservation).unwrap_err();
        assert!(matches!(err, Error::CheckInRequired { .. }));
        assert!(!reservation.checked_out());
        assert!(!reservation.checked_in());
    }

    #[test]
    fn test_check_out_after_check_in() {
        let mut reservation = fresh();
        check_in(&mut reservation).unwrap();
        check_out(&mut reservation).unwrap();
        assert!(reservation.checked_out());
        assert_eq!(state(&reservation), ReservationState::CheckedOut);
        assert!(!reservation.is_active());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut reservation = fresh();
        cancel(&mut reservation);
        assert!(reservation.cancelled());
        cancel(&mut reservation);
        assert!(reservation.cancelled());
        assert_eq!(state(&reservation), ReservationState::Cancelled);
    }

    #[test]
    fn test_cancel_after_check_out_is_permitted() {
        let mut reservation = fresh();
        check_in(&mut reservation).unwrap();
        check_out(&mut reservation).unwrap();
        cancel(&mut reservation);
        assert!(reservation.cancelled());
        // Cancelled wins when reporting state
        assert_eq!(state(&reservation), ReservationState::Cancelled);
    }

    #[test]
    fn test_update_details_writes_without_validation() {
        let mut reservation = fresh();
        // Inverted date range goes through untouched
        let inverted = Stay::new_unchecked(
            NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        );
        update_details(&mut reservation, 5, inverted);

        assert_eq!(reservation.occupants(), 5);
        assert_eq!(reservation.stay(), inverted);
        // Flags untouched
        assert_eq!(state(&reservation), ReservationState::Booked);
    }

    #[test]
    fn test_update_details_preserves_flags() {
        let mut reservation = fresh();
        check_in(&mut reservation).unwrap();
        let stay = reservation.stay();
        update_details(&mut reservation, 3, stay);
        assert!(reservation.checked_in());
        assert!(!reservation.cancelled());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ReservationState::Booked.to_string(), "booked");
        assert_eq!(ReservationState::CheckedIn.to_string(), "checked-in");
        assert_eq!(ReservationState::CheckedOut.to_string(), "checked-out");
        assert_eq!(ReservationState::Cancelled.to_string(), "cancelled");
    }
}
