//! Main entry point for the stanza CLI.
//!
//! This is the command-line interface for the stanza reservation system.
//! It provides commands for managing rooms, reservations, and additional
//! services:
//! - `add-room` / `rooms`: Register and list rooms
//! - `reserve`: Book a room for a guest
//! - `check-in` / `check-out` / `cancel`: Walk a reservation through its
//!   lifecycle
//! - `update`: Overwrite reservation details
//! - `attach` / `add-service` / `services`: Manage additional services
//! - `list` / `show`: Inspect reservations

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity and install it as the
    // global backend so library debug output is visible with --verbose
    stanza::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::Rooms(cmd) => cmd.execute(&global),
        cli::Command::AddService(cmd) => cmd.execute(&global),
        cli::Command::Services(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::CheckIn(cmd) => cmd.execute(&global),
        cli::Command::CheckOut(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Attach(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
