//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the application is mounted in the URL space.
    pub mount: MountConfig,

    /// Route table behavior.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Mount configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// Path of the entry script, e.g. "/exam/public/index.php".
    /// Its directory (and the parent of a `public` directory) is stripped
    /// from request paths before routing.
    pub script_name: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            script_name: "/index.php".to_string(),
        }
    }
}

impl MountConfig {
    /// URL prefix links should be built from ("" when mounted at the root).
    pub fn base_path(&self) -> &str {
        let dir = crate::routing::normalize::dirname(&self.script_name);
        match dir {
            "/" | "." => "",
            dir => dir,
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Refuse to start when a Controller@action reference does not resolve.
    /// When false such routes answer 404.
    pub strict_handlers: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strict_handlers: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [mount]
            script_name = "/exam/public/index.php"
            "#,
        )
        .unwrap();

        assert_eq!(config.mount.script_name, "/exam/public/index.php");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.routing.strict_handlers);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_base_path() {
        let mut mount = MountConfig::default();
        assert_eq!(mount.base_path(), "");

        mount.script_name = "/exam/public/index.php".into();
        assert_eq!(mount.base_path(), "/exam/public");
    }
}
