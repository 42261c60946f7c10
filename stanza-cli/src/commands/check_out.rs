//! Check-out command implementation.
//!
//! Check-out ends the stay but the room remains claimed; only `cancel`
//! releases availability.

use clap::Args;
use stanza::ReservationId;

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Check a reservation out.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub id: ReservationId,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let updated = desk.check_out(self.id)?;

        if !global.quiet {
            println!("Checked out reservation {}", updated.id());
        }
        Ok(())
    }
}
