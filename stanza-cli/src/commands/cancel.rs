//! Cancel command implementation.
//!
//! Cancellation is permitted at any lifecycle point and is idempotent.
//! It always leaves the reservation's room available again.

use clap::Args;
use stanza::ReservationId;

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Cancel a reservation and release its room.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub id: ReservationId,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let updated = desk.cancel(self.id)?;

        if !global.quiet {
            println!(
                "Cancelled reservation {}; room {} released",
                updated.id(),
                updated.room()
            );
        }
        Ok(())
    }
}
