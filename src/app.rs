//! The request-handling chain.
//!
//! ```text
//! http::Request ─► decode (query, body) ─► pipeline ─► route lookup ─► handler
//!                      │                      │             │              │
//!                      └──────── Err(ApiError) ─────────────┴── 404 ───────┤
//!                                                                          ▼
//!                                                          error responder / Response
//! ```
//!
//! Every stage either produces the next value or an [`ApiError`]; the first
//! error wins and is rendered once by the terminal responder.

use bytes::Bytes;

use crate::error::ApiError;
use crate::middleware::{Middleware, Pipeline};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

/// A router, its middleware, and the state handed to every handler.
pub struct App<S> {
    pipeline: Pipeline,
    router: Router<S>,
    state: S,
}

impl<S> App<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(router: Router<S>, state: S) -> Self {
        Self { pipeline: Pipeline::new(), router, state }
    }

    /// Appends a middleware step that sees every request.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.pipeline = self.pipeline.layer(middleware);
        self
    }

    /// Appends a middleware step limited to `prefix` and the paths beneath it.
    pub fn scoped(mut self, prefix: &str, middleware: impl Middleware) -> Self {
        self.pipeline = self.pipeline.scoped(prefix, middleware);
        self
    }

    /// Runs one request through the whole chain. Never fails: every error
    /// becomes a JSON error response.
    pub async fn oneshot(&self, req: http::Request<Bytes>) -> Response {
        self.handle(req).await.into_response()
    }

    async fn handle(&self, req: http::Request<Bytes>) -> Result<Response, ApiError> {
        let req = Request::from_http(req)?;
        let mut req = self.pipeline.run(req)?;

        let Some((handler, params)) = self.router.lookup(req.method(), req.path()) else {
            return Err(ApiError::not_found("Resource Not Found"));
        };

        req.set_params(params);
        Ok(handler.call(req, self.state.clone()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::ApiKeyGate;
    use crate::{Method, Status};

    async fn whoami(req: Request, greeting: &'static str) -> Response {
        Response::text(format!("{greeting} {}", req.api_key().unwrap_or("anonymous")))
    }

    async fn fail(_req: Request, _state: &'static str) -> Result<Response, ApiError> {
        Err(ApiError::new(Status::Unauthorized, "nope"))
    }

    fn app() -> App<&'static str> {
        let router = Router::<&'static str>::new()
            .get("/open", whoami)
            .get("/api/me", whoami)
            .on(Method::Post, "/fail", fail);

        App::new(router, "hello").scoped("/api", ApiKeyGate::new(["k"]))
    }

    fn get(uri: &str) -> http::Request<Bytes> {
        http::Request::builder().uri(uri).body(Bytes::new()).unwrap()
    }

    #[tokio::test]
    async fn dispatches_with_state() {
        let res = app().oneshot(get("/open")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"hello anonymous");
    }

    #[tokio::test]
    async fn gate_runs_before_dispatch() {
        let app = app();

        assert_eq!(app.oneshot(get("/api/me")).await.status_code(), 400);
        assert_eq!(app.oneshot(get("/api/me?api-key=x")).await.status_code(), 401);

        let res = app.oneshot(get("/api/me?api-key=k")).await;
        assert_eq!(res.body(), b"hello k");
    }

    #[tokio::test]
    async fn unmatched_route_is_not_found() {
        let res = app().oneshot(get("/nowhere")).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"error":"Resource Not Found"}"#);
    }

    #[tokio::test]
    async fn handler_errors_reach_the_responder() {
        let req = http::Request::builder().method("POST").uri("/fail").body(Bytes::new()).unwrap();
        let res = app().oneshot(req).await;
        assert_eq!(res.status_code(), 401);
        assert_eq!(res.body(), br#"{"error":"nope"}"#);
    }
}
