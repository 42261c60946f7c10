//! List command implementation.
//!
//! Displays reservations in table, JSON, or YAML format with optional
//! filters.

use std::io::Write;

use clap::Args;
use stanza::{lifecycle, GuestId, OutputFormat, Reservation, RoomId};

use crate::error::CliError;
use crate::utils::{open_desk, print_serialized, resolve_format, GlobalOptions};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_name = "FORMAT", env = "STANZA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Filter by room
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<RoomId>,

    /// Filter by guest
    #[arg(long, value_name = "GUEST_ID")]
    pub guest: Option<GuestId>,

    /// Only show active reservations (neither cancelled nor checked out)
    #[arg(long)]
    pub active: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        let mut reservations = desk.list_reservations()?;
        if let Some(room) = self.room {
            reservations.retain(|r| r.room() == room);
        }
        if let Some(guest) = self.guest {
            reservations.retain(|r| r.guest() == guest);
        }
        if self.active {
            reservations.retain(Reservation::is_active);
        }

        match resolve_format(self.format, global)? {
            OutputFormat::Table => format_as_table(&reservations)?,
            format => print_serialized(format, &reservations)?,
        }
        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "ID\tROOM\tGUEST\tOCCUPANTS\tSTAY\tSTATE")?;
    for reservation in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            reservation.id(),
            reservation.room(),
            reservation.guest(),
            reservation.occupants(),
            reservation.stay(),
            lifecycle::state(reservation),
        )?;
    }
    Ok(())
}
