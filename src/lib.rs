//! Election API: CRUD over candidates, parties and voters stored in PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{api_routes, app, common_routes};
pub use service::{EntityAccessor, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, PgStore, Store};
