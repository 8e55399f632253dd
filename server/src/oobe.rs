//! Guided out-of-box experience.
//!
//! This performs automatic setup for people running `advisoryd`
//! directly without specifying any configurations. The goal is
//! to let them quickly try the site with a config template that
//! provides guidance for a more permanent setup.
//!
//! Paths:
//! - Config: `~/.config/advisory/server.toml`
//! - SQLite: `~/.local/share/advisory/server.db`

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::fs::{self, OpenOptions};

use crate::config;

const CONFIG_TEMPLATE: &str = include_str!("config-template.toml");

/// Symbols mixed into the generated admin password.
const PASSWORD_SYMBOLS: &[u8] = b"!#%+-=?@^_";

pub async fn run_oobe() -> Result<()> {
    let config_path = config::get_xdg_config_path()?;

    if config_path.exists() {
        return Ok(());
    }

    let data_path = config::get_xdg_data_path()?;

    // Generate a simple config
    let database_path = data_path.join("server.db");
    let database_path = database_path
        .to_str()
        .ok_or_else(|| anyhow!("Data path {:?} is not valid UTF-8", database_path))?;
    let database_url = format!("sqlite://{}", database_path);
    OpenOptions::new()
        .create(true)
        .write(true)
        .open(database_path)
        .await?;

    let session_secret = {
        let random = random_alphanumeric(&mut rand::thread_rng(), 128);
        BASE64_STANDARD.encode(random)
    };

    let admin_password = generate_admin_password();

    let config_content = CONFIG_TEMPLATE
        .replace("%database_url%", &database_url)
        .replace("%session_secret%", &session_secret)
        .replace("%admin_password%", &admin_password);

    fs::write(&config_path, config_content.as_bytes()).await?;

    eprintln!();
    eprintln!("-----------------");
    eprintln!("Welcome to the Travel Advisory server!");
    eprintln!();
    eprintln!("A simple setup using SQLite has been configured for you in:");
    eprintln!();
    eprintln!("    {}", config_path.display());
    eprintln!();
    eprintln!("Log in at http://localhost:8080/login with:");
    eprintln!();
    eprintln!("    Username: admin");
    eprintln!("    Password: {admin_password}");
    eprintln!();
    eprintln!("Enjoy!");
    eprintln!("-----------------");
    eprintln!();

    Ok(())
}

/// Generates a password satisfying the registration policy.
fn generate_admin_password() -> String {
    let mut rng = rand::thread_rng();
    let mut password = random_alphanumeric(&mut rng, 16);

    password.push(rng.gen_range('A'..='Z'));
    password.push(rng.gen_range('a'..='z'));
    password.push(rng.gen_range('0'..='9'));
    password.push(PASSWORD_SYMBOLS[rng.gen_range(0..PASSWORD_SYMBOLS.len())] as char);

    password
}

fn random_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
