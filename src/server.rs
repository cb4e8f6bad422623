//! HTTP server and graceful shutdown.
//!
//! On **SIGTERM** or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! The stores live in memory, so everything is lost on exit.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app::App;
use crate::config::DEFAULT_BODY_LIMIT;
use crate::error::{ApiError, Error};
use crate::response::IntoResponse;
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    body_limit: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use murmur::{Config, Server};
    /// # fn main() -> Result<(), murmur::Error> {
    /// let server = Server::bind(Config::default().socket_addr()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr, body_limit: DEFAULT_BODY_LIMIT }
    }

    /// Caps request bodies at `bytes`; larger ones are answered with `413`.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Starts accepting connections and dispatching them through `app`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, app: App<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        let app = Arc::new(app);

        let body_limit = self.body_limit;

        info!(addr = %self.addr, body_limit, "murmur listening");

        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a SIGTERM stops accepting immediately,
                // even if more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let app = Arc::clone(&app);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let app = Arc::clone(&app);
                            async move { dispatch(app, req, body_limit).await }
                        });

                        // Serves HTTP/1.1 or HTTP/2, whichever the client speaks.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("murmur stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Buffers at most `limit` body bytes and runs one request through the app.
///
/// Failures become error responses, so hyper never sees an error.
async fn dispatch<S, B>(
    app: Arc<App<S>>,
    req: http::Request<B>,
    limit: usize,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    let response = match Limited::new(body, limit).collect().await {
        Ok(collected) => app.oneshot(http::Request::from_parts(parts, collected.to_bytes())).await,
        Err(e) if e.is::<LengthLimitError>() => {
            ApiError::new(Status::PayloadTooLarge, "Payload Too Large").into_response()
        }
        Err(e) => ApiError::bad_request(format!("failed to read request body: {e}")).into_response(),
    };

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT (Ctrl-C); elsewhere only
/// Ctrl-C. A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response, Router};

    async fn size(req: Request, _state: ()) -> Response {
        Response::text(req.body().to_string().len().to_string())
    }

    fn app() -> Arc<App<()>> {
        Arc::new(App::new(Router::<()>::new().post("/size", size), ()))
    }

    fn post(body: Vec<u8>) -> http::Request<Full<Bytes>> {
        http::Request::builder()
            .method("POST")
            .uri("/size")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    #[tokio::test]
    async fn body_within_limit_is_dispatched() {
        let res = dispatch(app(), post(br#"{"body":"hi"}"#.to_vec()), 64).await.unwrap();
        assert_eq!(res.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let body = format!(r#"{{"body":"{}"}}"#, "a".repeat(200)).into_bytes();
        let res = dispatch(app(), post(body), 64).await.unwrap();

        assert_eq!(res.status(), http::StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#"{"error":"Payload Too Large"}"#);
    }
}
