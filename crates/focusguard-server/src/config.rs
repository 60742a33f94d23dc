//! Command-line and environment configuration for the prediction server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use focusguard_core::DEFAULT_MODEL_PATH;

pub const DEFAULT_PORT: u16 = 5000;

/// Serve FocusGuard activity predictions over HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "focusguard-server")]
#[command(about = "Load the trained FocusGuard model and serve predictions over HTTP")]
#[command(version)]
pub struct ServerConfig {
    /// Model artifact written by `train`
    #[arg(short, long, env = "FOCUSGUARD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Interface to bind
    #[arg(short = 'H', long, env = "FOCUSGUARD_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "FOCUSGUARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.model, PathBuf::from("focusguard_model.json"));
    }

    #[test]
    fn test_parse_overrides() {
        let config = ServerConfig::try_parse_from([
            "focusguard-server",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--model",
            "models/latest.json",
        ])
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.model, PathBuf::from("models/latest.json"));
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(ServerConfig::try_parse_from(["focusguard-server", "--port", "http"]).is_err());
    }
}
