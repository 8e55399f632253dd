mod command;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use enum_as_inner::EnumAsInner;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use advisory_server::config;
use command::add_user::{self, AddUser};
use command::seed::{self, Seed};
use command::set_role::{self, SetRole};

/// Travel advisory server administration utilities.
#[derive(Debug, Parser)]
#[clap(version)]
#[clap(propagate_version = true)]
pub struct Opts {
    /// Path to the config file.
    #[clap(short = 'f', long)]
    config: Option<PathBuf>,

    /// The sub-command.
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, EnumAsInner)]
pub enum Command {
    AddUser(AddUser),
    SetRole(SetRole),
    Seed(Seed),
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    init_logging();

    let config = config::load_config(opts.config.as_deref(), false).await?;

    match opts.command {
        Command::AddUser(_) => add_user::run(config, opts).await?,
        Command::SetRole(_) => set_role::run(config, opts).await?,
        Command::Seed(_) => seed::run(config, opts).await?,
    }

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::from_default_env();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}
