//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Track and control cloud compute instances by name
#[derive(Parser)]
#[command(
    name = "instances",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` also disables it)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start tracking a remote instance
    Add(commands::add::AddArgs),

    /// Stop tracking an instance (the remote instance is untouched)
    Rm(commands::InstanceArgs),

    /// Show the remote state of an instance
    Status(commands::InstanceArgs),

    /// Start an instance
    Start(commands::InstanceArgs),

    /// Stop a running instance
    Stop(commands::InstanceArgs),

    /// List tracked instances
    List(commands::list::ListArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the application context cannot be built or the
    /// command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        })?;

        match command {
            Command::Add(args) => commands::add::run(&app, args).await,
            Command::Rm(args) => commands::rm::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Start(args) => commands::start::run(&app, &args).await,
            Command::Stop(args) => commands::stop::run(&app, &args).await,
            Command::List(args) => commands::list::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
