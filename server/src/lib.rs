#![deny(
    asm_sub_register,
    deprecated,
    missing_abi,
    unsafe_code,
    unused_macros,
    unused_must_use,
    unused_unsafe
)]
#![deny(clippy::from_over_into, clippy::needless_question_mark)]
#![cfg_attr(
    not(debug_assertions),
    deny(unused_imports, unused_mut, unused_variables,)
)]

pub mod access;
mod api;
pub mod config;
pub mod database;
mod error;
mod middleware;
pub mod oobe;
pub mod seed;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::Extension, http::Uri, Router};
use sea_orm::{query::Statement, ConnectionTrait, Database, DatabaseConnection};
use tokio::sync::{Mutex, OnceCell};
use tokio::time;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use access::http::{apply_session, load_user};
use access::{FlashLevel, Session};
use config::Config;
use database::entity::user::UserModel;
use database::migration::{Migrator, MigratorTrait};
use error::{ServerError, ServerResult};
use middleware::{init_request_state, restrict_host};

type State = Arc<StateInner>;
type RequestState = Arc<RequestStateInner>;

/// Global server state.
#[derive(Debug)]
pub struct StateInner {
    /// The server configuration.
    config: Config,

    /// Handle to the database.
    database: OnceCell<DatabaseConnection>,
}

/// Request state.
#[derive(Debug)]
struct RequestStateInner {
    /// The browser session.
    session: Mutex<Session>,

    /// The logged-in user, resolved on first use.
    user: OnceCell<Option<UserModel>>,
}

impl StateInner {
    async fn new(config: Config) -> State {
        Arc::new(Self {
            config,
            database: OnceCell::new(),
        })
    }

    /// Creates a state around an existing database handle.
    #[cfg(test)]
    fn with_database(config: Config, database: DatabaseConnection) -> State {
        Arc::new(Self {
            config,
            database: OnceCell::new_with(Some(database)),
        })
    }

    /// Returns a handle to the database.
    async fn database(&self) -> ServerResult<&DatabaseConnection> {
        self.database
            .get_or_try_init(|| async {
                Database::connect(&self.config.database.url)
                    .await
                    .map_err(ServerError::database_error)
            })
            .await
    }

    /// Sends periodic heartbeat queries to the database.
    async fn run_db_heartbeat(&self) -> ServerResult<()> {
        let db = self.database().await?;
        let stmt =
            Statement::from_string(db.get_database_backend(), "SELECT 'heartbeat';".to_string());

        loop {
            let _ = db.execute(stmt.clone()).await;
            time::sleep(Duration::from_secs(60)).await;
        }
    }
}

impl RequestStateInner {
    fn new() -> Self {
        Self {
            session: Mutex::new(Session::anonymous()),
            user: OnceCell::new(),
        }
    }

    /// Returns the logged-in user.
    ///
    /// A session referring to a deleted account is anonymous.
    async fn current_user(&self, database: &DatabaseConnection) -> ServerResult<Option<UserModel>> {
        let user = self
            .user
            .get_or_try_init(|| async {
                let user_id = self.session.lock().await.user_id();
                match user_id {
                    Some(id) => load_user(database, id).await,
                    None => Ok(None),
                }
            })
            .await?;

        Ok(user.clone())
    }

    /// Queues a message for the next rendered page.
    async fn flash(&self, level: FlashLevel, message: impl Into<String>) {
        self.session.lock().await.flash(level, message);
    }

    async fn log_in(&self, user: &UserModel) {
        self.session.lock().await.log_in(user.id);
    }

    async fn log_out(&self) {
        self.session.lock().await.log_out();
    }
}

/// The fallback route.
#[axum_macros::debug_handler]
async fn fallback(_: Uri) -> ServerResult<()> {
    Err(ServerError::NotFound)
}

/// Builds the application with all middlewares.
fn build_router(state: State) -> Router {
    Router::new()
        .merge(api::get_router())
        .fallback(fallback)
        // middlewares
        .layer(axum::middleware::from_fn(apply_session))
        .layer(axum::middleware::from_fn(init_request_state))
        .layer(axum::middleware::from_fn(restrict_host))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

/// Runs the API server.
pub async fn run_api_server(cli_listen: Option<SocketAddr>, config: Config) -> Result<()> {
    eprintln!("Starting API server...");

    let state = StateInner::new(config).await;

    let listen = if let Some(cli_listen) = cli_listen {
        cli_listen
    } else {
        state.config.listen.to_owned()
    };

    let rest = build_router(state.clone());

    eprintln!("Listening on {:?}...", listen);

    let (server_ret, _) = tokio::join!(
        axum::Server::bind(&listen).serve(rest.into_make_service()),
        async {
            if state.config.database.heartbeat {
                let _ = state.run_db_heartbeat().await;
            }
        },
    );

    server_ret?;

    Ok(())
}

/// Runs database migrations.
pub async fn run_migrations(config: Config) -> Result<()> {
    eprintln!("Running migrations...");

    let state = StateInner::new(config).await;
    let db = state.database().await?;
    Migrator::up(db, None).await?;

    Ok(())
}

/// Connects to the database and brings the schema up to date.
pub async fn connect_database(config: &Config) -> Result<DatabaseConnection> {
    let db = Database::connect(&config.database.url).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Runs migrations then loads the admin account and seed files.
pub async fn run_seed(config: Config) -> Result<()> {
    eprintln!("Seeding database...");

    let db = connect_database(&config).await?;
    seed::seed_database(&db, &config.seed).await?;

    Ok(())
}
