//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Shared secret used for cookie keys and session token signatures.
    pub secret: String,
    /// Base URL of the external auth service that issues session tokens.
    pub auth_service_url: String,
}
