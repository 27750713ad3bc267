//! Server configuration module

use cart_app::config::DatastoreConfig;
use clap::Parser;

use crate::config::{observability::LoggingConfig, server::ServerRuntimeConfig};

pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Cart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "cart-json", about = "Cart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Cart datastore settings.
    #[command(flatten)]
    pub datastore: DatastoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
