//! Check-in command implementation.

use clap::Args;
use stanza::ReservationId;

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Check a reservation in.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub id: ReservationId,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let updated = desk.check_in(self.id)?;

        if !global.quiet {
            println!("Checked in reservation {}", updated.id());
        }
        Ok(())
    }
}
