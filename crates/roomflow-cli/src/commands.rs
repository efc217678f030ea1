use super::args::{
    BadgeCommand, BookingsCommand, Cli, Commands, ConfigCommand, NotificationsCommand,
    ProfileCommand, RoomCommand,
};
use super::handlers::{self, HandlerContext};
use crate::types::LogLevel;
use anyhow::{Context, Result};
use roomflow_runtime::{Roomflow, resolve_data_dir};
use roomflow_types::CalendarDate;
use std::future::Future;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = HandlerContext::new(cli.format);

    match cli.command {
        // Offline commands
        Commands::Calendar {
            month,
            today,
            check_in,
            check_out,
        } => handlers::calendar::handle(
            &ctx,
            month,
            today.unwrap_or_else(CalendarDate::today),
            check_in,
            check_out,
        ),

        Commands::Quote {
            rate,
            check_in,
            check_out,
            discount,
        } => handlers::quote::handle(&ctx, rate, check_in, check_out, discount),

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx, &data_dir),
            ConfigCommand::SetUrl { url } => handlers::config::set_url(&ctx, &data_dir, &url),
        },

        Commands::Logout => {
            let client = Roomflow::open(&data_dir)?;
            handlers::auth::logout(&ctx, &client)
        }

        Commands::Profile {
            command: ProfileCommand::Show,
        } => {
            let client = Roomflow::open(&data_dir)?;
            handlers::profile::show(&ctx, &client)
        }

        // Backend commands
        command => {
            let client = Roomflow::open(&data_dir)?;
            block_on(dispatch(&ctx, &client, command))
        }
    }
}

async fn dispatch(ctx: &HandlerContext, client: &Roomflow, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            handlers::auth::login(ctx, client, &email, &password).await
        }

        Commands::Register {
            name,
            email,
            phone,
            date_of_birth,
            gender,
        } => {
            handlers::auth::register(ctx, client, name, email, phone, date_of_birth, gender).await
        }

        Commands::VerifyOtp { phone, otp } => {
            handlers::auth::verify_otp(ctx, client, &phone, &otp).await
        }

        Commands::ResendOtp { phone } => handlers::auth::resend_otp(ctx, client, &phone).await,

        Commands::SetPassword {
            phone,
            password,
            confirm,
        } => handlers::auth::set_password(ctx, client, &phone, &password, &confirm).await,

        Commands::Profile { command } => match command {
            ProfileCommand::Show => handlers::profile::show(ctx, client),
            ProfileCommand::Update {
                name,
                phone,
                date_of_birth,
                gender,
                avatar,
            } => {
                let update = roomflow_types::ProfileUpdate {
                    full_name: name,
                    phone_number: phone,
                    date_of_birth,
                    gender,
                    avatar,
                };
                handlers::profile::update(ctx, client, update).await
            }
        },

        Commands::Room {
            command: RoomCommand::Show { room_id },
        } => handlers::room::show(ctx, client, room_id).await,

        Commands::Bookings { command } => match command {
            BookingsCommand::Upcoming => handlers::bookings::upcoming(ctx, client).await,
            BookingsCommand::Past => handlers::bookings::past(ctx, client).await,
            BookingsCommand::Show { booking_id } => {
                handlers::bookings::show(ctx, client, booking_id).await
            }
            BookingsCommand::Cancel { booking_id } => {
                handlers::bookings::cancel(ctx, client, booking_id).await
            }
        },

        Commands::Book {
            room,
            check_in,
            check_out,
            adults,
            children,
            infants,
            rate,
            today,
            dry_run,
        } => {
            let request = handlers::book::BookArgs {
                room_id: room,
                check_in,
                check_out,
                adults,
                children,
                infants,
                rate,
                today: today.unwrap_or_else(CalendarDate::today),
                dry_run,
            };
            handlers::book::handle(ctx, client, request).await
        }

        Commands::Notifications { command } => match command {
            NotificationsCommand::List => handlers::notifications::list(ctx, client, false).await,
            NotificationsCommand::Unread => handlers::notifications::list(ctx, client, true).await,
            NotificationsCommand::Count => handlers::notifications::count(ctx, client).await,
            NotificationsCommand::Read { notification_id } => {
                handlers::notifications::mark_read(ctx, client, notification_id).await
            }
            NotificationsCommand::ReadAll => {
                handlers::notifications::mark_all_read(ctx, client).await
            }
            NotificationsCommand::Delete { notification_id } => {
                handlers::notifications::delete(ctx, client, notification_id).await
            }
            NotificationsCommand::Clear => handlers::notifications::clear(ctx, client).await,
        },

        Commands::Badge {
            command: BadgeCommand::Watch { updates },
        } => handlers::badge::watch(ctx, client, updates).await,

        Commands::Calendar { .. }
        | Commands::Quote { .. }
        | Commands::Config { .. }
        | Commands::Logout => Err(anyhow::anyhow!("command runs without the backend")),
    }
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(future)
}

/// Logs go to stderr; `RUST_LOG` wins over `--log-level`.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roomflow={level},roomflow_runtime={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
