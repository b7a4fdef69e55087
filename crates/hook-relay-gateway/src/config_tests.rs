//! Tests for gateway configuration.

use super::*;

fn valid_config() -> GatewayConfig {
    GatewayConfig {
        downstream: DownstreamConfig {
            base_url: "http://notify.example.com".to_string(),
            timeout_seconds: 10,
        },
        secrets: SecretsConfig {
            dir: "/etc/hook-relay/keys".to_string(),
        },
        endpoints: vec![EndpointConfig {
            source: SourceKind::GitHub,
            key: "github_key".to_string(),
        }],
        ..GatewayConfig::default()
    }
}

/// Defaults fill the server section; the downstream URL has no default and
/// fails validation until set.
#[test]
fn test_default_config_needs_downstream_url() {
    let config = GatewayConfig::default();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.validate().is_err());
}

/// A fully specified config validates.
#[test]
fn test_valid_config_passes_validation() {
    assert!(valid_config().validate().is_ok());
}

/// An endpoint with an empty key is rejected.
#[test]
fn test_empty_endpoint_key_is_rejected() {
    let mut config = valid_config();
    config.endpoints.push(EndpointConfig {
        source: SourceKind::GitLab,
        key: String::new(),
    });

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("gitlab"));
}

/// The YAML shape operators write deserializes as expected, including the
/// provider spelling.
#[test]
fn test_config_deserializes_from_yaml_shape() {
    let json = r#"{
        "server": {"host": "127.0.0.1", "port": 9000, "shutdown_timeout_seconds": 5},
        "downstream": {"base_url": "http://downstream:3030", "timeout_seconds": 3},
        "secrets": {"dir": "/keys"},
        "endpoints": [
            {"source": "DockerHub", "key": "dockerhub_key"},
            {"source": "BitbucketServer", "key": "bb_key"}
        ]
    }"#;

    let config: GatewayConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.endpoints.len(), 2);
    assert_eq!(config.endpoints[0].source, SourceKind::DockerHub);
    assert_eq!(config.endpoints[1].source, SourceKind::BitbucketServer);
    assert!(config.validate().is_ok());
}
