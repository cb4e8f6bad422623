//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. Cross-cutting concerns belong to the
//! [`middleware`](crate::middleware) pipeline, which runs before lookup.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// The application router.
///
/// One radix tree per HTTP method. Build it once at startup and hand it to
/// [`App::new`](crate::App::new) together with the state every handler
/// receives. Each registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
}

impl<S> Router<S> {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }
}

impl<S: 'static> Router<S> {
    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use murmur::{Method, Request, Response, Router};
    /// # async fn get_comment(_: Request, _: ()) -> Response { Response::text("") }
    /// # async fn delete_comment(_: Request, _: ()) -> Response { Response::text("") }
    /// Router::<()>::new()
    ///     .on(Method::Get,    "/comments/{id}", get_comment)
    ///     .on(Method::Delete, "/comments/{id}", delete_comment);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route for
    /// the same method. Routes are registered at startup, so this surfaces
    /// immediately.
    pub fn on(self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.add(method, path, handler)
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Post, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Delete, path, handler)
    }

    fn add(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Finds the handler for `method` and `path`. One trailing `/` is
    /// ignored, so `/comments/` matches `/comments`.
    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    async fn noop(_req: Request, _state: ()) -> Response {
        Response::text("ok")
    }

    #[test]
    fn lookup_extracts_params() {
        let router = Router::<()>::new()
            .get("/posts/{id}/comments", noop)
            .get("/comments/{id}", noop);

        let (_, params) = router.lookup(Method::Get, "/posts/5/comments").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("5"));
    }

    #[test]
    fn lookup_is_per_method() {
        let router = Router::<()>::new().post("/comments", noop);

        assert!(router.lookup(Method::Post, "/comments").is_some());
        assert!(router.lookup(Method::Get, "/comments").is_none());
    }

    #[test]
    fn lookup_ignores_one_trailing_slash() {
        let router = Router::<()>::new()
            .get("/", noop)
            .get("/comments", noop)
            .get("/comments/{id}", noop);

        assert!(router.lookup(Method::Get, "/").is_some());
        assert!(router.lookup(Method::Get, "/comments/").is_some());
        let (_, params) = router.lookup(Method::Get, "/comments/7/").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::<()>::new()
            .get("/comments/{id}", noop)
            .get("/comments/{key}", noop);
    }
}
