//! Route handlers, one module per resource.
//!
//! Handlers take the [`Request`] and the shared [`Db`](crate::Db) and return
//! `Result<_, ApiError>`. They only validate input and call into the
//! [`query`](crate::query) engine and the stores; rendering is left to
//! [`IntoResponse`](crate::IntoResponse).

pub mod comments;
pub mod links;
pub mod posts;
pub mod users;

use serde::Serialize;

use crate::error::ApiError;
use crate::query;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// `{"message": "..."}`, the body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Message {
    message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// The `{id}` path parameter as an integer; `name` is used in the error.
fn path_id(req: &Request, name: &str) -> Result<i64, ApiError> {
    query::parse_identifier(req.param("id").unwrap_or_default(), name)
}

/// `201 Created` with a `location` header and `value` as the body.
fn created<T: Serialize>(location: &str, value: &T) -> Result<Response, ApiError> {
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", location)
        .json(serde_json::to_vec(value)?))
}
