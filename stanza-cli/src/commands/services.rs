//! Services command implementation.

use std::io::Write;

use clap::Args;
use stanza::{AdditionalService, OutputFormat};

use crate::error::CliError;
use crate::utils::{open_desk, print_serialized, resolve_format, GlobalOptions};

/// List registered services.
#[derive(Args)]
pub struct ServicesCommand {
    /// Output format
    #[arg(long, value_name = "FORMAT", env = "STANZA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ServicesCommand {
    /// Execute the services command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let services = desk.list_services()?;

        match resolve_format(self.format, global)? {
            OutputFormat::Table => format_as_table(&services)?,
            format => print_serialized(format, &services)?,
        }
        Ok(())
    }
}

/// Format services as a human-readable table.
fn format_as_table(services: &[AdditionalService]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "NAME\tRATE\tDESCRIPTION\tID")?;
    for service in services {
        writeln!(
            handle,
            "{}\t{:.2}\t{}\t{}",
            service.name(),
            service.rate(),
            if service.description().is_empty() {
                "-"
            } else {
                service.description()
            },
            service.id(),
        )?;
    }
    Ok(())
}
