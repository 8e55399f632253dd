//! Data access.
//!
//! Each kind of record has its own module with an async trait that is
//! implemented for the database connection. Handlers receive the
//! connection from the server state and call the trait methods on it.
//!
//! Uniqueness of usernames, advice topics, links and votes is checked
//! by querying before inserting. Nothing prevents two concurrent
//! requests from both passing the check.

pub mod entity;
pub mod migration;

mod advice;
mod countries;
mod country_advice;
mod users;
mod votes;

#[cfg(test)]
mod tests;

pub use advice::{AdviceDatabase, NewAdvice};
pub use countries::{CountryDatabase, NewCountry};
pub use country_advice::CountryAdviceDatabase;
pub use users::{NewUser, UserDatabase};
pub use votes::VoteDatabase;

#[cfg(test)]
pub(crate) async fn test_database() -> sea_orm::DatabaseConnection {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    // Each connection to an in-memory database sees a fresh database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let database = Database::connect(options)
        .await
        .expect("Could not open test database");
    Migrator::up(&database, None)
        .await
        .expect("Could not run migrations");

    database
}
