use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use roomflow_engine::MonthCursor;
use roomflow_types::{CalendarDate, Decimal, Gender};

#[derive(Parser)]
#[command(name = "roomflow")]
#[command(about = "Pick dates, price and book hotel stays", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $ROOMFLOW_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Start a registration; an OTP is sent to the phone number
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<CalendarDate>,

        /// MALE or FEMALE
        #[arg(long)]
        gender: Option<Gender>,
    },

    VerifyOtp {
        #[arg(long)]
        phone: String,

        #[arg(long)]
        otp: String,
    },

    ResendOtp {
        #[arg(long)]
        phone: String,
    },

    /// Finish registration by choosing a password
    SetPassword {
        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm: String,
    },

    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    Room {
        #[command(subcommand)]
        command: RoomCommand,
    },

    Bookings {
        #[command(subcommand)]
        command: BookingsCommand,
    },

    /// Render a month with an optional selection
    Calendar {
        /// YYYY-MM (default: the check-in month, else the current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<MonthCursor>,

        /// Override today's date
        #[arg(long)]
        today: Option<CalendarDate>,

        #[arg(long)]
        check_in: Option<CalendarDate>,

        #[arg(long, requires = "check_in")]
        check_out: Option<CalendarDate>,
    },

    /// Price a stay without contacting the backend
    Quote {
        /// Nightly rate
        #[arg(long)]
        rate: Decimal,

        #[arg(long)]
        check_in: Option<CalendarDate>,

        #[arg(long)]
        check_out: Option<CalendarDate>,

        #[arg(long, default_value = "0")]
        discount: Decimal,
    },

    /// Walk a room through the booking flow and submit it
    Book {
        #[arg(long)]
        room: u64,

        #[arg(long)]
        check_in: CalendarDate,

        #[arg(long)]
        check_out: CalendarDate,

        #[arg(long, default_value = "2")]
        adults: u32,

        #[arg(long, default_value = "0")]
        children: u32,

        #[arg(long, default_value = "0")]
        infants: u32,

        /// Nightly rate; fetched from the room when omitted
        #[arg(long)]
        rate: Option<Decimal>,

        /// Override today's date
        #[arg(long)]
        today: Option<CalendarDate>,

        /// Price the stay but do not submit it
        #[arg(long)]
        dry_run: bool,
    },

    Notifications {
        #[command(subcommand)]
        command: NotificationsCommand,
    },

    Badge {
        #[command(subcommand)]
        command: BadgeCommand,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the cached profile
    Show,

    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        date_of_birth: Option<CalendarDate>,

        #[arg(long)]
        gender: Option<Gender>,

        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RoomCommand {
    Show { room_id: u64 },
}

#[derive(Subcommand)]
pub enum BookingsCommand {
    Upcoming,
    Past,
    Show { booking_id: u64 },
    Cancel { booking_id: u64 },
}

#[derive(Subcommand)]
pub enum NotificationsCommand {
    List,
    Unread,
    Count,
    Read { notification_id: u64 },
    ReadAll,
    Delete { notification_id: u64 },
    /// Delete every notification
    Clear,
}

#[derive(Subcommand)]
pub enum BadgeCommand {
    /// Poll the unread count and print each change
    Watch {
        /// Stop after this many updates
        #[arg(long)]
        updates: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    SetUrl { url: String },
}

fn parse_month(raw: &str) -> Result<MonthCursor, String> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{}'", raw))?;
    let year: i32 = year
        .parse()
        .map_err(|_| format!("invalid year in '{}'", raw))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("invalid month in '{}'", raw))?;
    MonthCursor::new(year, month).ok_or_else(|| format!("no such month: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_month() {
        let cursor = parse_month("2024-02").unwrap();
        assert_eq!((cursor.year(), cursor.month()), (2024, 2));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("February").is_err());
    }

    #[test]
    fn test_book_defaults_to_two_adults() {
        let cli = Cli::try_parse_from([
            "roomflow",
            "book",
            "--room",
            "3",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
        ])
        .unwrap();
        match cli.command {
            Commands::Book {
                adults,
                children,
                infants,
                dry_run,
                ..
            } => {
                assert_eq!((adults, children, infants), (2, 0, 0));
                assert!(!dry_run);
            }
            _ => panic!("expected book"),
        }
    }
}
