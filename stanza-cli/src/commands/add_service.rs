//! Add-service command implementation.

use clap::Args;
use stanza::{AdditionalService, ServiceId};

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Register an additional service.
#[derive(Args)]
pub struct AddServiceCommand {
    /// Service name (at most 250 characters)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Service description
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Service rate
    #[arg(long, value_name = "RATE", default_value_t = 0.0)]
    pub rate: f64,
}

impl AddServiceCommand {
    /// Execute the add-service command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        let service = AdditionalService::new(ServiceId::new(), self.name, self.description, self.rate)
            .map_err(stanza::Error::from)?;

        let id = service.id();
        let name = service.name().to_string();
        desk.add_service(service)?;

        if !global.quiet {
            println!("Added service {name} ({id})");
        }
        Ok(())
    }
}
