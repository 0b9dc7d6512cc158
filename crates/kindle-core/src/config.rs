//! # Config Document
//!
//! The declarative document a provider hands to the engine.
//!
//! The schema is owned by the stages: the engine only knows the `version`
//! field and treats every other top-level key as an opaque section. Sections
//! are kept in a `BTreeMap` so serialization order is deterministic and the
//! cache bytes are stable across save -> load -> save.

use crate::KindleError;
use crate::primitives::{CLOUD_CONFIG_HEADER, SCRIPT_HEADER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CONFIG
// =============================================================================

/// A provisioning config document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Schema version declared by the document.
    pub version: u32,
    /// Every other top-level key, keyed by section name.
    #[serde(flatten)]
    pub sections: BTreeMap<String, serde_json::Value>,
}

impl Config {
    /// Create an empty config with the given version.
    #[must_use]
    pub fn new(version: u32) -> Self {
        Self {
            version,
            sections: BTreeMap::new(),
        }
    }

    /// Builder-style section insertion.
    #[must_use]
    pub fn with_section(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.sections.insert(name.into(), value);
        self
    }

    /// Look up a top-level section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&serde_json::Value> {
        self.sections.get(name)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse raw provider data into a config.
///
/// Empty input, cloud-config documents and scripts are reported as the
/// ignorable errors [`KindleError::EmptyConfig`], [`KindleError::CloudConfig`]
/// and [`KindleError::Script`]. Anything else must be a JSON config.
pub fn parse(raw: &[u8]) -> Result<Config, KindleError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(KindleError::EmptyConfig);
    }
    if is_cloud_config(raw) {
        return Err(KindleError::CloudConfig);
    }
    if raw.starts_with(SCRIPT_HEADER.as_bytes()) {
        return Err(KindleError::Script);
    }

    serde_json::from_slice(raw).map_err(|e| KindleError::InvalidConfig(e.to_string()))
}

fn is_cloud_config(raw: &[u8]) -> bool {
    let first_line = raw.split(|&b| b == b'\n').next().unwrap_or_default();
    first_line.trim_ascii_end() == CLOUD_CONFIG_HEADER.as_bytes()
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a config to its cached byte form.
///
/// This is a pure transformation - no file I/O.
pub fn to_bytes(config: &Config) -> Result<Vec<u8>, KindleError> {
    serde_json::to_vec(config).map_err(|e| KindleError::CacheSerialize(e.to_string()))
}

/// Deserialize a config from its cached byte form.
///
/// This is a pure transformation - no file I/O.
pub fn from_bytes(bytes: &[u8]) -> Result<Config, KindleError> {
    serde_json::from_slice(bytes).map_err(|e| KindleError::CacheCorrupt(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_flattens_sections() {
        let cfg = parse(br#"{"version":1,"storage":{"files":[]}}"#).expect("parse");

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.section("storage"), Some(&json!({"files": []})));
        assert!(cfg.section("systemd").is_none());
    }

    #[test]
    fn empty_and_blank_input_are_empty_configs() {
        assert_eq!(parse(b""), Err(KindleError::EmptyConfig));
        assert_eq!(parse(b"  \n\t"), Err(KindleError::EmptyConfig));
    }

    #[test]
    fn cloud_config_is_detected_on_first_line() {
        let raw = b"#cloud-config\r\nhostname: node1\n";
        assert_eq!(parse(raw), Err(KindleError::CloudConfig));

        // Header elsewhere is just invalid input.
        let raw = b"hostname: node1\n#cloud-config\n";
        assert!(matches!(parse(raw), Err(KindleError::InvalidConfig(_))));
    }

    #[test]
    fn scripts_are_detected() {
        assert_eq!(parse(b"#!/bin/sh\necho hi\n"), Err(KindleError::Script));
    }

    #[test]
    fn garbage_is_invalid_not_ignorable() {
        let err = parse(b"{not json").expect_err("must fail");
        assert!(matches!(err, KindleError::InvalidConfig(_)));
        assert!(!err.is_ignorable());
    }

    #[test]
    fn missing_version_is_invalid() {
        assert!(matches!(
            parse(br#"{"storage":{}}"#),
            Err(KindleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let cfg = Config::new(1)
            .with_section("systemd", json!({"units": [{"name": "a.service"}]}))
            .with_section("storage", json!({"files": []}));

        let bytes1 = to_bytes(&cfg).expect("first serialize");
        let restored = from_bytes(&bytes1).expect("deserialize");
        let bytes2 = to_bytes(&restored).expect("second serialize");

        assert_eq!(restored, cfg);
        assert_eq!(
            bytes1, bytes2,
            "save -> load -> save must produce identical bytes"
        );
    }

    #[test]
    fn extreme_floats_roundtrip_exactly() {
        let floats = [
            1.4918945332818847e-179,
            2.5e-308,
            f64::MIN,
            0.1,
            f64::MAX,
            f64::MIN_POSITIVE,
        ];
        for f in floats {
            let cfg = Config::new(1).with_section("x", json!(f));
            let bytes = to_bytes(&cfg).expect("serialize");
            let restored = from_bytes(&bytes).expect("deserialize");

            assert_eq!(restored, cfg, "{:e} changed through the cache", f);
        }
    }

    #[test]
    fn corrupt_bytes_are_cache_corrupt() {
        assert!(matches!(
            from_bytes(b"\x00\x01garbage"),
            Err(KindleError::CacheCorrupt(_))
        ));
    }
}
