//! Property-based tests for the reservation state machine.

use proptest::prelude::*;

use super::{cancel, check_in, check_out, state, update_details, ReservationState};
use crate::reservation::{GuestId, Reservation, ReservationId, Stay};
use crate::room::RoomId;
use chrono::NaiveDate;

/// An operation applied to a reservation during a generated run.
#[derive(Debug, Clone)]
enum Op {
    CheckIn,
    CheckOut,
    Cancel,
    Update { occupants: u32, offset: i8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::CheckIn),
        Just(Op::CheckOut),
        Just(Op::Cancel),
        (1u32..6, -10i8..10).prop_map(|(occupants, offset)| Op::Update { occupants, offset }),
    ]
}

fn fresh_reservation() -> Reservation {
    let stay = Stay::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
    )
    .unwrap();
    Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay)
        .occupants(2)
        .build()
        .unwrap()
}

fn apply(reservation: &mut Reservation, op: &Op) {
    match op {
        Op::CheckIn => {
            let _ = check_in(reservation);
        }
        Op::CheckOut => {
            let _ = check_out(reservation);
        }
        Op::Cancel => cancel(reservation),
        Op::Update { occupants, offset } => {
            // Updates re-validate nothing, so inverted ranges are fair game.
            let base = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
            let start = base + chrono::TimeDelta::days(i64::from(*offset));
            let stay = Stay::new_unchecked(start, base + chrono::TimeDelta::days(1));
            update_details(reservation, *occupants, stay);
        }
    }
}

proptest! {
    // PROPERTY: checked_out implies checked_in, for every operation order.
    #[test]
    fn prop_checkout_implies_checkin(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut reservation = fresh_reservation();
        for op in &ops {
            apply(&mut reservation, op);
            prop_assert!(!reservation.checked_out() || reservation.checked_in());
        }
    }

    // PROPERTY: the cancelled flag is monotonic; no operation clears it.
    #[test]
    fn prop_cancelled_is_monotonic(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut reservation = fresh_reservation();
        let mut seen_cancelled = false;
        for op in &ops {
            apply(&mut reservation, op);
            if seen_cancelled {
                prop_assert!(reservation.cancelled());
            }
            seen_cancelled = reservation.cancelled();
        }
    }

    // PROPERTY: a failed transition leaves the record byte-for-byte unchanged.
    #[test]
    fn prop_failed_transition_mutates_nothing(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut reservation = fresh_reservation();
        for op in &ops {
            let before = reservation.clone();
            let failed = match op {
                Op::CheckIn => check_in(&mut reservation).is_err(),
                Op::CheckOut => check_out(&mut reservation).is_err(),
                Op::Cancel => {
                    cancel(&mut reservation);
                    false
                }
                Op::Update { occupants, offset } => {
                    apply(&mut reservation, &Op::Update { occupants: *occupants, offset: *offset });
                    false
                }
            };
            if failed {
                prop_assert_eq!(&reservation, &before);
            }
        }
    }

    // PROPERTY: derived state agrees with the activity definition.
    #[test]
    fn prop_state_consistent_with_activity(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut reservation = fresh_reservation();
        for op in &ops {
            apply(&mut reservation, op);
            let derived = state(&reservation);
            match derived {
                ReservationState::Booked | ReservationState::CheckedIn => {
                    prop_assert!(reservation.is_active());
                }
                ReservationState::CheckedOut | ReservationState::Cancelled => {
                    prop_assert!(!reservation.is_active());
                }
            }
        }
    }
}
