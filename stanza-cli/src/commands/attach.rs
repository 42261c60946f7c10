//! Attach command implementation.
//!
//! Attaches an additional service to a reservation. The service does not
//! need a catalog record; a warning is logged when it has none.

use clap::Args;
use stanza::{ReservationId, ServiceId};

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Attach an additional service to a reservation.
#[derive(Args)]
pub struct AttachCommand {
    /// Reservation identifier
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation: ReservationId,

    /// Service identifier
    #[arg(value_name = "SERVICE_ID")]
    pub service: ServiceId,
}

impl AttachCommand {
    /// Execute the attach command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        if !desk.service_exists(self.service)? {
            log::warn!("service {} has no catalog record", self.service);
        }

        let attachment = desk.attach_service(self.reservation, self.service)?;

        if !global.quiet {
            println!(
                "Attached service {} to reservation {} ({})",
                attachment.service(),
                attachment.reservation(),
                attachment.id()
            );
        }
        Ok(())
    }
}
