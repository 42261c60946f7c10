//! Rooms command implementation.
//!
//! Displays registered rooms in table, JSON, or YAML format.

use std::io::Write;

use clap::Args;
use stanza::{OutputFormat, Room};

use crate::error::CliError;
use crate::utils::{open_desk, print_serialized, resolve_format, GlobalOptions};

/// List registered rooms.
#[derive(Args)]
pub struct RoomsCommand {
    /// Output format
    #[arg(long, value_name = "FORMAT", env = "STANZA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only show currently bookable rooms
    #[arg(long)]
    pub available: bool,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        let mut rooms = desk.list_rooms()?;
        if self.available {
            rooms.retain(Room::available);
        }

        match resolve_format(self.format, global)? {
            OutputFormat::Table => format_as_table(&rooms)?,
            format => print_serialized(format, &rooms)?,
        }
        Ok(())
    }
}

/// Format rooms as a human-readable table.
fn format_as_table(rooms: &[Room]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "NUMBER\tCAPACITY\tRATE\tAVAILABLE\tID")?;
    for room in rooms {
        writeln!(
            handle,
            "{}\t{}\t{:.2}\t{}\t{}",
            room.number(),
            room.capacity(),
            room.nightly_rate(),
            if room.available() { "yes" } else { "no" },
            room.id(),
        )?;
    }
    Ok(())
}
