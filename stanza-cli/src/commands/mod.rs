//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `add_room`: Register a room
//! - `rooms`: List registered rooms
//! - `add_service`: Register an additional service
//! - `services`: List registered services
//! - `reserve`: Book a room for a guest
//! - `update`: Overwrite reservation details
//! - `check_in` / `check_out`: Lifecycle transitions
//! - `cancel`: Cancel a reservation and release its room
//! - `attach`: Attach an additional service to a reservation
//! - `list`: List reservations
//! - `show`: Show one reservation with its attachments

pub mod add_room;
pub mod add_service;
pub mod attach;
pub mod cancel;
pub mod check_in;
pub mod check_out;
pub mod list;
pub mod reserve;
pub mod rooms;
pub mod services;
pub mod show;
pub mod update;

pub use add_room::AddRoomCommand;
pub use add_service::AddServiceCommand;
pub use attach::AttachCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use list::ListCommand;
pub use reserve::ReserveCommand;
pub use rooms::RoomsCommand;
pub use services::ServicesCommand;
pub use show::ShowCommand;
pub use update::UpdateCommand;
