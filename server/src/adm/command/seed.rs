use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::Opts;
use advisory_server::config::Config;
use advisory_server::seed::{self, SeedFiles};

/// Load seed files into the database.
///
/// Files given on the command line take precedence over the ones in
/// the `[seed]` section of the config. The admin account from the
/// config is created as well.
#[derive(Debug, Parser)]
pub struct Seed {
    /// CSV file of advice entries.
    #[clap(long)]
    advice: Option<PathBuf>,

    /// CSV file of countries.
    #[clap(long)]
    countries: Option<PathBuf>,

    /// CSV file of country-advice links.
    #[clap(long)]
    links: Option<PathBuf>,
}

pub async fn run(config: Config, opts: Opts) -> Result<()> {
    let sub = opts
        .command
        .as_seed()
        .ok_or_else(|| anyhow!("Not a seed command"))?;

    let database = advisory_server::connect_database(&config).await?;

    if let Some(password) = &config.seed.admin_password {
        if seed::ensure_admin(&database, &config.seed.admin_username, password).await? {
            eprintln!("Created admin account {}", config.seed.admin_username);
        }
    }

    let defaults = SeedFiles::from_config(&config.seed);
    let files = SeedFiles {
        advice: sub.advice.as_deref().or(defaults.advice),
        countries: sub.countries.as_deref().or(defaults.countries),
        links: sub.links.as_deref().or(defaults.links),
    };

    let summary = seed::load_files(&database, files).await?;

    eprintln!(
        "Created {} advice, {} countries and {} links",
        summary.advice, summary.countries, summary.links
    );

    Ok(())
}
