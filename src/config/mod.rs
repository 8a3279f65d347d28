// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, DemoConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" plus environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("CASEDESK"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "CaseDesk-Demo/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB, login bodies are tiny
            .set_default("demo.email", "admin@example.com")?
            .set_default("demo.password", "admin123")?
            .set_default("demo.token_prefix", "demo-token-")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_credentials() {
        // No config file named like this should exist
        let cfg = Config::load_from("no_such_config_file").unwrap();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.demo.email, "admin@example.com");
        assert_eq!(cfg.demo.password, "admin123");
        assert_eq!(cfg.demo.token_prefix, "demo-token-");
        assert!(cfg.http.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("no_such_config_file").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 3001);
    }
}
