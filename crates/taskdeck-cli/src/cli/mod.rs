//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck_core::config;
use taskdeck_core::theme::Theme;

mod commands;
pub mod interrupt;
mod logging;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version = "0.1")]
#[command(about = "Task manager in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the home page
    Home,

    /// Log in and store the session
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Username (max 10 characters)
        #[arg(long)]
        username: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Account password
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Repeat the password
        #[arg(long = "confirm-password")]
        confirm_password: Option<String>,
    },

    /// Log out and discard the stored session
    Logout,

    /// Show the header and who is signed in
    Status,

    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Commands that talk to the backend or change state get a log file;
    /// read-only ones leave `<home>` untouched.
    fn writes_logs(&self) -> bool {
        match self {
            Commands::Login { .. }
            | Commands::Register { .. }
            | Commands::Logout
            | Commands::Status => true,
            Commands::Theme { command } => command.is_some(),
            Commands::Home | Commands::Config { .. } => false,
        }
    }
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Switch between light and dark
    Toggle,
    /// Set a specific theme
    Set {
        /// light or dark
        #[arg(value_name = "THEME")]
        theme: Theme,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = cli
        .command
        .as_ref()
        .is_some_and(Commands::writes_logs)
        .then(logging::init)
        .flatten();
    interrupt::init();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let Some(command) = cli.command else {
        return commands::home::show(&config);
    };

    match command {
        Commands::Home => commands::home::show(&config),

        Commands::Login { email, password } => {
            let app = commands::App::load(config)?;
            commands::auth::login(&app, email, password).await
        }

        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let app = commands::App::load(config)?;
            commands::auth::register(
                &app,
                commands::auth::RegisterArgs {
                    username,
                    email,
                    password,
                    confirm_password,
                },
            )
            .await
        }

        Commands::Logout => {
            let app = commands::App::load(config)?;
            commands::auth::logout(&app).await
        }

        Commands::Status => {
            let app = commands::App::load(config)?;
            commands::auth::status(&app);
            Ok(())
        }

        Commands::Theme { command } => match command {
            None => {
                commands::theme::show(&config);
                Ok(())
            }
            Some(ThemeCommands::Toggle) => commands::theme::toggle(&config),
            Some(ThemeCommands::Set { theme }) => commands::theme::set(&config, theme),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
