//! Add-room command implementation.

use clap::Args;
use stanza::{Room, RoomId};

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};

/// Register a room.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Identifying room number (e.g. "101" or "suite-3")
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Maximum occupant capacity
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub capacity: u32,

    /// Nightly rate
    #[arg(long, value_name = "RATE", default_value_t = 0.0)]
    pub rate: f64,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;

        let room = Room::builder(RoomId::new(), self.number)
            .capacity(self.capacity)
            .nightly_rate(self.rate)
            .build()
            .map_err(stanza::Error::from)?;

        let id = room.id();
        let number = room.number().to_string();
        desk.add_room(room)?;

        if !global.quiet {
            println!("Added room {number} ({id})");
        }
        Ok(())
    }
}
