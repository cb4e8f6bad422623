//! Middleware pipeline.
//!
//! Middleware intercepts a request after it is decoded and before it is
//! routed. It is the place for cross-cutting concerns: request logging and
//! credential checks.
//!
//! Each step returns `Result<Request, ApiError>`. `Ok` passes the (possibly
//! annotated) request to the next step; `Err` ends the chain and goes
//! straight to the error responder. A step therefore has exactly one outcome
//! per request.
//!
//! Steps run in registration order. A step added with
//! [`Pipeline::scoped`] only sees requests under its path prefix:
//!
//! ```rust
//! use murmur::middleware::{ApiKeyGate, Pipeline, RequestLogger};
//!
//! let pipeline = Pipeline::new()
//!     .layer(RequestLogger)
//!     .scoped("/api", ApiKeyGate::new(["ps-example"]));
//! ```

mod api_key;
mod logger;

pub use api_key::ApiKeyGate;
pub use logger::RequestLogger;

use crate::error::ApiError;
use crate::request::Request;

/// One step of the pipeline.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request) -> Result<Request, ApiError>;
}

struct Layer {
    scope: Option<String>,
    middleware: Box<dyn Middleware>,
}

impl Layer {
    fn applies_to(&self, path: &str) -> bool {
        self.scope.as_deref().is_none_or(|prefix| in_scope(prefix, path))
    }
}

/// `/api` covers `/api`, `/api/` and `/api/users`, but not `/apix`.
fn in_scope(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// An ordered chain of [`Middleware`] steps.
#[derive(Default)]
pub struct Pipeline {
    layers: Vec<Layer>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step that sees every request.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Layer { scope: None, middleware: Box::new(middleware) });
        self
    }

    /// Appends a step that only sees requests whose path is `prefix` or lies
    /// beneath it.
    pub fn scoped(mut self, prefix: &str, middleware: impl Middleware) -> Self {
        let prefix = prefix.trim_end_matches('/').to_owned();
        self.layers.push(Layer { scope: Some(prefix), middleware: Box::new(middleware) });
        self
    }

    /// Runs every applicable step in order, stopping at the first rejection.
    pub fn run(&self, mut req: Request) -> Result<Request, ApiError> {
        for layer in &self.layers {
            if layer.applies_to(req.path()) {
                req = layer.middleware.handle(req)?;
            }
        }
        Ok(req)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use bytes::Bytes;

    use super::*;
    use crate::Status;

    pub(crate) fn request(uri: &str) -> Request {
        let req = http::Request::builder().uri(uri).body(Bytes::new()).unwrap();
        Request::from_http(req).unwrap()
    }

    struct Count(Arc<AtomicUsize>);

    impl Middleware for Count {
        fn handle(&self, req: Request) -> Result<Request, ApiError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(req)
        }
    }

    struct Reject;

    impl Middleware for Reject {
        fn handle(&self, _req: Request) -> Result<Request, ApiError> {
            Err(ApiError::unauthorized("no"))
        }
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        assert!(in_scope("/api", "/api"));
        assert!(in_scope("/api", "/api/"));
        assert!(in_scope("/api", "/api/users/1"));
        assert!(!in_scope("/api", "/apix"));
        assert!(!in_scope("/api", "/comments"));
    }

    #[test]
    fn scoped_step_skips_other_paths() {
        let hits = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().scoped("/api/", Count(Arc::clone(&hits)));

        pipeline.run(request("/comments")).unwrap();
        pipeline.run(request("/api/users")).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejection_stops_the_chain() {
        let hits = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .layer(Reject)
            .layer(Count(Arc::clone(&hits)));

        let err = pipeline.run(request("/")).unwrap_err();
        assert_eq!(err.status(), Status::Unauthorized);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
