//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, AddServiceCommand, AttachCommand, CancelCommand, CheckInCommand,
    CheckOutCommand, ListCommand, ReserveCommand, RoomsCommand, ServicesCommand, ShowCommand,
    UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing hotel room reservations.
#[derive(Parser)]
#[command(name = "stanza")]
#[command(version, about = "Manage hotel room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "STANZA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "STANZA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register a room
    AddRoom(AddRoomCommand),

    /// List registered rooms
    Rooms(RoomsCommand),

    /// Register an additional service
    AddService(AddServiceCommand),

    /// List registered services
    Services(ServicesCommand),

    /// Book a room for a guest
    Reserve(ReserveCommand),

    /// Overwrite reservation details
    Update(UpdateCommand),

    /// Check a reservation in
    CheckIn(CheckInCommand),

    /// Check a reservation out
    CheckOut(CheckOutCommand),

    /// Cancel a reservation and release its room
    Cancel(CancelCommand),

    /// Attach an additional service to a reservation
    Attach(AttachCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation with its attachments
    Show(ShowCommand),
}
