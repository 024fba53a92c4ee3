use crate::config::PhysicsConfig;
use crate::error::Error;
use crate::forces::RSOFT;

#[test]
fn test_default_config() {
    let config = PhysicsConfig::default();

    assert_eq!(config.g, 1.0);
    assert_eq!(config.softening, RSOFT);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_full_config() {
    let config: PhysicsConfig =
        serde_json::from_str(r#"{ "g": 39.478417, "softening": 0.001 }"#).unwrap();

    assert_eq!(config.g, 39.478417);
    assert_eq!(config.softening, 0.001);
}

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: PhysicsConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config, PhysicsConfig::default());
}

#[test]
fn test_rejects_non_positive_g() {
    for g in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let config = PhysicsConfig { g, softening: 0.01 };
        assert!(matches!(config.validate(), Err(Error::InvalidParam(_))), "g = {g}");
    }
}

#[test]
fn test_rejects_negative_softening() {
    let config = PhysicsConfig {
        g: 1.0,
        softening: -0.01,
    };
    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("softening"));
}

#[test]
fn test_zero_softening_allowed() {
    let config = PhysicsConfig {
        g: 1.0,
        softening: 0.0,
    };

    assert!(config.validate().is_ok());
}
