//! Database entities.
//!
//! We use SeaORM and target PostgreSQL (production) and SQLite (development).

pub mod advice;
pub mod country;
pub mod country_advice;
pub mod user;
pub mod user_vote;
