//! Reserve command implementation.
//!
//! Books a room for a guest. The room is claimed atomically: if it is
//! already held by an active reservation the command fails and nothing
//! is persisted.

use chrono::NaiveDate;
use clap::Args;
use stanza::desk::BookingRequest;
use stanza::{GuestId, RoomId, Stay};

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Book a room for a guest.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room identifier
    #[arg(long, value_name = "ROOM_ID")]
    pub room: RoomId,

    /// Guest identifier (generated when omitted)
    #[arg(long, value_name = "GUEST_ID")]
    pub guest: Option<GuestId>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Occupant count
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub occupants: u32,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = Stay::new(self.check_in, self.check_out)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let desk = open_desk(global)?;
        let guest = self.guest.unwrap_or_else(GuestId::new);

        let reservation = desk.create_reservation(BookingRequest {
            room: self.room,
            guest,
            occupants: self.occupants,
            stay,
        })?;

        // The reservation id goes to stdout so scripts can capture it
        println!("{}", reservation.id());
        if !global.quiet {
            eprintln!(
                "Reserved room {} for guest {guest}, {}",
                reservation.room(),
                reservation.stay()
            );
        }
        Ok(())
    }
}
