//! Show command implementation.
//!
//! Displays one reservation together with its service attachments.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use stanza::{lifecycle, OutputFormat, Reservation, ReservationId, ServiceAttachment};

use crate::error::CliError;
use crate::utils::{open_desk, print_serialized, resolve_format, GlobalOptions};

/// Show one reservation with its attachments.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub id: ReservationId,

    /// Output format
    #[arg(long, value_name = "FORMAT", env = "STANZA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Serializable view of a reservation and its attachments.
#[derive(Serialize)]
struct ReservationDetail {
    reservation: Reservation,
    attachments: Vec<ServiceAttachment>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        let reservation = desk.reservation(self.id)?;
        let attachments = desk.attachments_for(self.id)?;

        match resolve_format(self.format, global)? {
            OutputFormat::Table => format_as_text(&reservation, &attachments)?,
            format => print_serialized(
                format,
                &ReservationDetail {
                    reservation,
                    attachments,
                },
            )?,
        }
        Ok(())
    }
}

/// Format the reservation as human-readable key/value lines.
fn format_as_text(
    reservation: &Reservation,
    attachments: &[ServiceAttachment],
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "id:        {}", reservation.id())?;
    writeln!(handle, "room:      {}", reservation.room())?;
    writeln!(handle, "guest:     {}", reservation.guest())?;
    writeln!(handle, "occupants: {}", reservation.occupants())?;
    writeln!(handle, "stay:      {}", reservation.stay())?;
    writeln!(handle, "state:     {}", lifecycle::state(reservation))?;

    if attachments.is_empty() {
        writeln!(handle, "services:  -")?;
    } else {
        writeln!(handle, "services:")?;
        for attachment in attachments {
            writeln!(handle, "  - {}", attachment.service())?;
        }
    }
    Ok(())
}
