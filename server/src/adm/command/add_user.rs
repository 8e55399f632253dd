use anyhow::{anyhow, Result};
use clap::Parser;

use crate::Opts;
use advisory::credentials::{validate_password, Username};
use advisory_server::config::Config;
use advisory_server::database::entity::user::Role;
use advisory_server::database::{NewUser, UserDatabase};

/// Create a user account.
///
/// For example, to create an administrator named Alice:
///
/// $ advisoryadm add-user --username alice --password 'S3cret!pass' --admin
#[derive(Debug, Parser)]
pub struct AddUser {
    /// The name the user logs in with.
    #[clap(long)]
    username: Username,

    /// The password of the user.
    #[clap(long)]
    password: String,

    /// Make the user an administrator.
    #[clap(long)]
    admin: bool,
}

pub async fn run(config: Config, opts: Opts) -> Result<()> {
    let sub = opts
        .command
        .as_add_user()
        .ok_or_else(|| anyhow!("Not an add-user command"))?;

    validate_password(&sub.password)?;

    let role = if sub.admin { Role::Admin } else { Role::Guest };

    let database = advisory_server::connect_database(&config).await?;
    let user = NewUser::new(sub.username.as_str().to_owned(), &sub.password, role).await?;
    let user = database.add_user(user).await?;

    eprintln!("Created user {} ({})", user.username, user.role.as_str());

    Ok(())
}
