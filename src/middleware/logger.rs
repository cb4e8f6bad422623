//! Request logging.

use tracing::info;

use super::Middleware;
use crate::error::ApiError;
use crate::request::Request;

/// Logs every request's method, path and query string, plus the body when it
/// is a non-empty object. Never rejects.
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn handle(&self, req: Request) -> Result<Request, ApiError> {
        info!(method = %req.method(), path = req.path(), query = req.raw_query(), "received request");

        if req.body().as_object().is_some_and(|fields| !fields.is_empty()) {
            info!(body = %req.body(), "containing data");
        }
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use super::*;
    use crate::middleware::tests::request;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs the logger over `req` and returns everything it logged.
    fn log(req: Request) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || RequestLogger.handle(req).unwrap());
        captured.output()
    }

    fn post(body: &'static str) -> Request {
        let req = http::Request::builder()
            .method("POST")
            .uri("/comments")
            .header("content-type", "application/json")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap();
        Request::from_http(req).unwrap()
    }

    #[test]
    fn passes_request_through_unchanged() {
        let req = RequestLogger.handle(request("/comments?userId=2")).unwrap();
        assert_eq!(req.path(), "/comments");
        assert_eq!(req.query("userId"), Some("2"));
    }

    #[test]
    fn logs_query_string() {
        let out = log(request("/api/users?api-key=perscholas"));
        assert!(out.contains("received request"));
        assert!(out.contains("path=\"/api/users\""), "{out}");
        assert!(out.contains("query=\"api-key=perscholas\""), "{out}");
    }

    #[test]
    fn logs_non_empty_object_body() {
        let out = log(post(r#"{"userId":1}"#));
        assert!(out.contains("containing data"), "{out}");
        assert!(out.contains(r#"{"userId":1}"#), "{out}");
    }

    #[test]
    fn skips_empty_or_non_object_body() {
        assert!(!log(post("{}")).contains("containing data"));
        assert!(!log(post("[1]")).contains("containing data"));
        assert!(!log(request("/comments")).contains("containing data"));
    }
}
