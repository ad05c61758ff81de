/// Posts Service Library
///
/// Serves the posts feed of the Memories app: paginated listing, title/tag
/// search, CRUD, like toggling and comments, plus sign-up/sign-in for the
/// bearer tokens that identify the acting user.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `domain`: Identifiers, pagination, search and engagement rules
/// - `services`: Business logic layer
/// - `repository`: PostgreSQL access behind async traits
/// - `security`: Password hashing and token issuing
/// - `middleware`: Bearer token resolution
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
