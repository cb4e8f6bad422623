//! # murmur
//!
//! A small REST API over in-memory users, posts and comments.
//!
//! ## The chain
//!
//! Every request takes the same path:
//!
//! 1. **Decode**: query string and body (JSON or URL-encoded form) are parsed
//!    into a typed [`Request`].
//! 2. **Middleware**: the [`RequestLogger`](middleware::RequestLogger) logs
//!    it; under `/api` the [`ApiKeyGate`](middleware::ApiKeyGate) checks the
//!    `api-key` query parameter.
//! 3. **Dispatch**: the radix-tree [`Router`] picks a handler, or the request
//!    falls through to `404 Resource Not Found`.
//! 4. **Respond**: handlers return `Result<_, ApiError>`; every [`ApiError`]
//!    becomes `{"error": message}` with its status.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use murmur::{api, Config, Db, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), murmur::Error> {
//!     let config = Config::default();
//!     let app = api::app(Db::seeded(), &config);
//!
//!     Server::bind(config.socket_addr()?).serve(app).await
//! }
//! ```
//!
//! ## Writing a handler
//!
//! ```rust
//! use murmur::query::{self, Field};
//! use murmur::{ApiError, Db, Json, Request};
//! use murmur::model::Comment;
//!
//! async fn by_user(req: Request, db: Db) -> Result<Json<Vec<Comment>>, ApiError> {
//!     let user_id = query::parse_identifier(req.param("id").unwrap_or_default(), "userId")?;
//!     let store = db.read().await;
//!     let found = query::by_field(store.comments.all(), Field::UserId, Some(user_id));
//!     Ok(Json(found.into_iter().cloned().collect()))
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod middleware;
pub mod model;
pub mod query;
pub mod resources;
pub mod store;

pub use app::App;
pub use config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::Db;
