//! `[serve]` section configuration.
//!
//! Development file server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in prosa.toml.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface to bind on.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// Port to listen on.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_serve_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 4000);
    }

    #[test]
    fn test_serve_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"

            [serve]
            interface = "0.0.0.0"
            port = 8080
        "#,
        )
        .unwrap();

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 8080);
    }
}
