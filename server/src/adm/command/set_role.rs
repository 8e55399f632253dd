use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use crate::Opts;
use advisory_server::config::Config;
use advisory_server::database::entity::user::Role;
use advisory_server::database::UserDatabase;

/// Change the role of an existing user.
#[derive(Debug, Parser)]
pub struct SetRole {
    /// The user to change.
    #[clap(long)]
    username: String,

    /// The new role.
    #[clap(long)]
    role: RoleArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    Guest,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Guest => Role::Guest,
            RoleArg::Admin => Role::Admin,
        }
    }
}

pub async fn run(config: Config, opts: Opts) -> Result<()> {
    let sub = opts
        .command
        .as_set_role()
        .ok_or_else(|| anyhow!("Not a set-role command"))?;

    let database = advisory_server::connect_database(&config).await?;
    let user = database
        .get_user_by_name(&sub.username)
        .await?
        .ok_or_else(|| anyhow!("User \"{}\" does not exist", sub.username))?;

    let user = database.set_role(&user, sub.role.into()).await?;

    eprintln!("User {} is now {}", user.username, user.role.as_str());

    Ok(())
}
