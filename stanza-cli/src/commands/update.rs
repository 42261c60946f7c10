//! Update command implementation.
//!
//! Overwrites the occupant count and stay dates of a reservation. The
//! values are written exactly as given; this command intentionally does
//! not re-validate date order or room availability.

use chrono::NaiveDate;
use clap::Args;
use stanza::ReservationId;

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Overwrite reservation details.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub id: ReservationId,

    /// New occupant count
    #[arg(long, value_name = "COUNT")]
    pub occupants: u32,

    /// New check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// New check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let updated = desk.update_details(self.id, self.occupants, self.check_in, self.check_out)?;

        if !global.quiet {
            println!(
                "Updated reservation {}: {} occupant(s), {}",
                updated.id(),
                updated.occupants(),
                updated.stay()
            );
        }
        Ok(())
    }
}
