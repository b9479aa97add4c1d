//! Course registration REST backend: subjects with study times, people, lookups, curricula and books.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod storage;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use seed::seed_example_data;
pub use service::{PgStore, HealthCheck, Repository, Store};
pub use state::AppState;
pub use storage::BookStorage;
pub use store::{connect, ensure_database_exists};
