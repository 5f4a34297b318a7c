//! Hemolink portal client - command-line interface over the session and
//! notification subsystem.

mod app;
mod auth;
mod notifications;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use portal_config::{init_logging, Config, Paths};
use portal_types::Role;

/// Hemolink portal command-line interface.
#[derive(Parser)]
#[command(name = "hemolink")]
#[command(about = "Hemolink blood-donation portal client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Base directory for config and credentials. Defaults to ~/.hemolink
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Portal API URL override
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    User,
    Organiser,
    Facility,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => Role::User,
            RoleArg::Organiser => Role::Organiser,
            RoleArg::Facility => Role::Facility,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the portal
    Login {
        /// Which role's login endpoint to use
        #[arg(long, value_enum)]
        role: RoleArg,
        /// IC number (user role only)
        #[arg(long)]
        ic: Option<String>,
        /// Login email (organiser, facility, and admin roles)
        #[arg(long)]
        email: Option<String>,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Show the current session
    Status,
    /// Re-resolve the stored identity against the portal
    Refresh,
    /// Log out of this device
    Logout,
    /// Log out of every device
    LogoutAll,
    /// Role-scoped notification mailbox
    #[command(subcommand)]
    Notifications(NotificationsCommand),
}

#[derive(Subcommand)]
enum NotificationsCommand {
    /// List the mailbox, one page at a time
    List {
        /// 1-based page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Mark a notification read, following its redirect if present
    Read {
        /// Notification id
        id: i64,
        /// Redirect target attached to the notification
        #[arg(long)]
        redirect: Option<String>,
        /// Path the user is currently on
        #[arg(long, default_value = "/")]
        current_path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let mut config = Config::load(&paths)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let app = app::build(&config, &paths)?;

    match cli.command {
        Commands::Login {
            role,
            ic,
            email,
            password,
        } => auth::login(&app, role.into(), ic, email, password).await,
        Commands::Status => auth::status(&app).await,
        Commands::Refresh => auth::refresh(&app).await,
        Commands::Logout => auth::logout(&app, false).await,
        Commands::LogoutAll => auth::logout(&app, true).await,
        Commands::Notifications(command) => match command {
            NotificationsCommand::List { page } => notifications::list(&app, page).await,
            NotificationsCommand::Read {
                id,
                redirect,
                current_path,
            } => notifications::read(&app, id, redirect, current_path).await,
        },
    }
}
