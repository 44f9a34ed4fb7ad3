use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "NOTEBOOK_PORT";
    pub const DB_PATH: &str = "NOTEBOOK_DB";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const DB_PATH: &str = "notes.json";
    pub const HOST: &str = "127.0.0.1";
    pub const LOOKUP_TIMEOUT_SECS: u64 = 5;
    pub const SERVICE_URL: &str = "http://localhost:8000";
}

/// Notebook RPC server
#[derive(Debug, Clone, Parser)]
#[command(name = "notebook-service", version)]
pub struct ServiceConfig {
    /// Port to listen on
    #[arg(long, env = env_vars::PORT, default_value_t = defaults::PORT)]
    pub port: u16,

    /// Note database file (created if missing)
    #[arg(long = "db", env = env_vars::DB_PATH, default_value = defaults::DB_PATH)]
    pub db_path: PathBuf,

    /// Address to bind
    #[arg(long, default_value = defaults::HOST)]
    pub host: String,

    /// MediaWiki API endpoint used for enrichment
    #[arg(long, default_value = crate::wikipedia_client::DEFAULT_API_URL)]
    pub wikipedia_url: String,

    /// Timeout for each Wikipedia request, in seconds
    #[arg(long, default_value_t = defaults::LOOKUP_TIMEOUT_SECS)]
    pub lookup_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

/// Interactive notebook client
#[derive(Debug, Clone, Parser)]
#[command(name = "notebook-client", version)]
pub struct ClientConfig {
    /// Service URL; prompted for when omitted
    #[arg(long)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_defaults() {
        let cfg = ServiceConfig::try_parse_from(["notebook-service"]).unwrap();
        // Only meaningful when the environment does not override them
        if std::env::var(env_vars::PORT).is_err() {
            assert_eq!(cfg.port, defaults::PORT);
        }
        if std::env::var(env_vars::DB_PATH).is_err() {
            assert_eq!(cfg.db_path, PathBuf::from(defaults::DB_PATH));
        }
        assert_eq!(cfg.host, defaults::HOST);
        assert_eq!(cfg.lookup_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_service_flags_override() {
        let cfg = ServiceConfig::try_parse_from([
            "notebook-service",
            "--port",
            "9123",
            "--db",
            "/tmp/other.json",
            "--lookup-timeout-secs",
            "2",
        ])
        .unwrap();
        assert_eq!(cfg.port, 9123);
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9123");
        assert_eq!(cfg.lookup_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(ServiceConfig::try_parse_from(["notebook-service", "--port", "http"]).is_err());
    }
}
