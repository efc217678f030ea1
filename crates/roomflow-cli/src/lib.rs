// roomflow CLI
//
// One subcommand group per booking screen. Commands that only need the
// engine (calendar, quote, config) never touch the network; everything else
// opens the data directory through roomflow-runtime and runs on a tokio
// runtime built per invocation.

mod args;
mod commands;
mod handlers;
pub mod types;
pub mod views;

pub use args::{
    BadgeCommand, BookingsCommand, Cli, Commands, ConfigCommand, NotificationsCommand,
    ProfileCommand, RoomCommand,
};
pub use commands::run;
