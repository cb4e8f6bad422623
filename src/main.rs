use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use murmur::{api, Config, Db, Error, Server};

/// In-memory REST API for users, posts and comments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; flags and environment variables override it
    #[arg(long, env = "MURMUR_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "MURMUR_HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "MURMUR_PORT")]
    port: Option<u16>,

    /// Key accepted on /api routes; repeat or comma-separate for several
    #[arg(long = "api-key", env = "MURMUR_API_KEYS", value_delimiter = ',')]
    api_keys: Vec<String>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MURMUR_BODY_LIMIT")]
    body_limit: Option<usize>,
}

impl Cli {
    fn into_config(self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(limit) = self.body_limit {
            config.body_limit = limit;
        }
        if !self.api_keys.is_empty() {
            config.api_keys = self.api_keys;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Cli::parse().into_config()?;
    tracing::debug!(host = %config.host, port = config.port, api_keys = config.api_keys.len(), body_limit = config.body_limit, "configuration loaded");

    let app = api::app(Db::seeded(), &config);
    Server::bind(config.socket_addr()?)
        .body_limit(config.body_limit)
        .serve(app)
        .await
}
