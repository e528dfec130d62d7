//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// User Registry - user records with CPF validation and a persisted error catalog
#[derive(Parser, Debug)]
#[command(name = "user-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage the persisted error catalog
    Errors(ErrorsArgs),
}

/// Arguments for the serve command.
///
/// Unset flags fall back to `SERVER_HOST` / `SERVER_PORT` from the configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, env = "SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT")]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations, then seed an empty error catalog
    Up {
        /// Leave the errors table as it is
        #[arg(long)]
        no_seed: bool,
    },
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop every table, re-run all migrations and re-seed the error catalog
    Fresh {
        /// Leave the errors table empty
        #[arg(long)]
        no_seed: bool,
    },
}

impl MigrateAction {
    /// Whether the error catalog should be seeded after this action
    pub fn seeds_catalog(&self) -> bool {
        match self {
            MigrateAction::Up { no_seed } | MigrateAction::Fresh { no_seed } => !no_seed,
            MigrateAction::Down | MigrateAction::Status => false,
        }
    }
}

/// Arguments for the errors command
#[derive(Parser, Debug)]
pub struct ErrorsArgs {
    #[command(subcommand)]
    pub action: ErrorsAction,
}

/// Error catalog actions
#[derive(Subcommand, Debug)]
pub enum ErrorsAction {
    /// Insert every catalog entry if the errors table is empty
    Seed,
}
