// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for Warden.
//!
//! This crate provides [`WardenConfig`] — the top-level runtime settings —
//! together with helpers for loading from TOML files, merging overlays, and
//! producing advisory [`ConfigWarning`]s.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A recommended optional field is missing.
    MissingOptionalField {
        /// Name of the missing field.
        field: String,
        /// Why it matters.
        hint: String,
    },
    /// A target-scan timeout is unusually large.
    LargeTimeout {
        /// Name of the data source the timeout applies to.
        source: String,
        /// Timeout value in milliseconds.
        millis: u64,
    },
    /// A provenance rule's path substring will never match anything below
    /// an already-registered, more general rule.
    ShadowedProvenanceRule {
        /// The substring that will never be reached.
        pattern: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingOptionalField { field, hint } => {
                write!(f, "missing optional field '{field}': {hint}")
            }
            ConfigWarning::LargeTimeout { source, millis } => {
                write!(f, "data source '{source}' has a large timeout ({millis}ms)")
            }
            ConfigWarning::ShadowedProvenanceRule { pattern } => {
                write!(f, "provenance rule '{pattern}' is shadowed by an earlier rule")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level runtime configuration for Warden.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct WardenConfig {
    /// Backend base URL for the hybrid data-access layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Direct SQL connection string used as a fallback when the backend is
    /// unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Directory holding the cached JSON mirror used as a cold fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// Directory where published registry and report artifacts are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Number of worker tasks in the aggregation pipeline's fan-out pool.
    /// `None` means size it from the host's CPU count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_concurrency: Option<usize>,

    /// The degradation guard.
    #[serde(default)]
    pub degradation_guard: DegradationGuardConfig,

    /// Path-substring rules used to classify where a project's UUID
    /// provenance came from, expressed as data rather than hardcoded logic.
    #[serde(default = "default_provenance_rules")]
    pub provenance_rules: Vec<ProvenanceRule>,

    /// Pattern rules used to classify event-debt items.
    #[serde(default)]
    pub event_debt_rules: EventDebtRules,

    /// Named data-source entries (backend / SQL / cache timeouts, etc).
    #[serde(default)]
    pub sources: BTreeMap<String, SourceEntry>,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            database_url: None,
            log_level: Some("info".into()),
            cache_dir: None,
            output_dir: None,
            worker_concurrency: None,
            degradation_guard: DegradationGuardConfig::default(),
            provenance_rules: default_provenance_rules(),
            event_debt_rules: EventDebtRules::default(),
            sources: BTreeMap::new(),
        }
    }
}

/// Thresholds guarding against silently overwriting a richer registry with
/// a poorer one.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct DegradationGuardConfig {
    /// Refuse to write when `old_linked_count > 0` and `new_linked_count`
    /// drops to `0`, unless the caller passes `force`.
    #[serde(default = "DegradationGuardConfig::default_block_on_zero_linked")]
    pub block_on_zero_linked: bool,

    /// Warn (never block) when `new_github_count < old_github_count /
    /// shrink_factor`.
    #[serde(default = "DegradationGuardConfig::default_shrink_factor")]
    pub warn_shrink_factor: f64,
}

impl DegradationGuardConfig {
    fn default_block_on_zero_linked() -> bool {
        true
    }

    fn default_shrink_factor() -> f64 {
        2.0
    }
}

impl Default for DegradationGuardConfig {
    fn default() -> Self {
        Self {
            block_on_zero_linked: Self::default_block_on_zero_linked(),
            warn_shrink_factor: Self::default_shrink_factor(),
        }
    }
}

/// A single path-substring provenance rule. Rules are evaluated in list
/// order; the first match wins.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ProvenanceRule {
    /// Substring to search for in a project's local path(s).
    pub pattern: String,
    /// The provenance label to assign when `pattern` matches.
    pub label: String,
}

/// Illustrative default provenance rules, evaluated in order. Projects
/// matching none of these fall back to `"unclassified"`. Intended as a
/// starting point, not a closed set — override freely in config.
fn default_provenance_rules() -> Vec<ProvenanceRule> {
    vec![
        ProvenanceRule { pattern: "/test".into(), label: "TEST".into() },
        ProvenanceRule { pattern: "memory".into(), label: "MEMORY".into() },
        ProvenanceRule { pattern: "/external/".into(), label: "EXTERNAL".into() },
        ProvenanceRule { pattern: "/canonical/".into(), label: "CANONICAL".into() },
        ProvenanceRule { pattern: "/orphan".into(), label: "ORPHAN".into() },
    ]
}

/// Pattern rules used to classify event-debt items by name or producer
/// location.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct EventDebtRules {
    /// Event-name prefixes that mark a dynamically-generated name the
    /// publisher couldn't resolve to a literal.
    #[serde(default = "EventDebtRules::default_unknown_name_prefixes")]
    pub unknown_name_prefixes: Vec<String>,
    /// Substrings that, found anywhere in an event name, mark it as an
    /// unreplaced placeholder literal.
    #[serde(default = "EventDebtRules::default_placeholder_literals")]
    pub placeholder_literals: Vec<String>,
    /// Producer-location substrings that mark an emitter as archived.
    #[serde(default = "EventDebtRules::default_archived_location_substrings")]
    pub archived_location_substrings: Vec<String>,
}

impl EventDebtRules {
    fn default_unknown_name_prefixes() -> Vec<String> {
        vec!["unknown:".into()]
    }

    fn default_placeholder_literals() -> Vec<String> {
        vec!["event.name".into()]
    }

    fn default_archived_location_substrings() -> Vec<String> {
        vec!["INBOX".into(), "archive".into(), "older_versions".into()]
    }
}

impl Default for EventDebtRules {
    fn default() -> Self {
        Self {
            unknown_name_prefixes: Self::default_unknown_name_prefixes(),
            placeholder_literals: Self::default_placeholder_literals(),
            archived_location_substrings: Self::default_archived_location_substrings(),
        }
    }
}

/// Configuration for a single named data source.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct SourceEntry {
    /// Connection timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed timeout in milliseconds (5 minutes).
const MAX_TIMEOUT_MILLIS: u64 = 300_000;

/// Threshold above which a timeout generates a warning.
const LARGE_TIMEOUT_THRESHOLD_MILLIS: u64 = 30_000;

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`WardenConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`WardenConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<WardenConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => WardenConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`WardenConfig`].
pub fn parse_toml(content: &str) -> Result<WardenConfig, ConfigError> {
    toml::from_str::<WardenConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `WD_BACKEND_URL`
/// - `WD_DATABASE_URL`
/// - `WD_LOG_LEVEL`
/// - `WD_CACHE_DIR`
/// - `WD_OUTPUT_DIR`
pub fn apply_env_overrides(config: &mut WardenConfig) {
    if let Ok(val) = std::env::var("WD_BACKEND_URL") {
        config.backend_url = Some(val);
    }
    if let Ok(val) = std::env::var("WD_DATABASE_URL") {
        config.database_url = Some(val);
    }
    if let Ok(val) = std::env::var("WD_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var("WD_CACHE_DIR") {
        config.cache_dir = Some(val);
    }
    if let Ok(val) = std::env::var("WD_OUTPUT_DIR") {
        config.output_dir = Some(val);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (invalid log level, out-of-range timeouts, shadowed
/// provenance rules that would never match) are returned as a
/// [`ConfigError::ValidationError`]; soft issues come back as warnings.
pub fn validate_config(config: &WardenConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if !(0.0..=1.0).contains(&(1.0 / config.degradation_guard.warn_shrink_factor))
        || config.degradation_guard.warn_shrink_factor <= 0.0
    {
        errors.push(format!(
            "degradation_guard.warn_shrink_factor must be > 0, got {}",
            config.degradation_guard.warn_shrink_factor
        ));
    }

    for (name, source) in &config.sources {
        if name.is_empty() {
            errors.push("source name must not be empty".into());
        }
        if let Some(t) = source.timeout_ms {
            if t == 0 || t > MAX_TIMEOUT_MILLIS {
                errors.push(format!(
                    "source '{name}': timeout {t}ms out of range (1..{MAX_TIMEOUT_MILLIS})"
                ));
            } else if t > LARGE_TIMEOUT_THRESHOLD_MILLIS {
                warnings.push(ConfigWarning::LargeTimeout {
                    source: name.clone(),
                    millis: t,
                });
            }
        }
    }

    for (i, rule) in config.provenance_rules.iter().enumerate() {
        if rule.pattern.is_empty() {
            errors.push(format!("provenance_rules[{i}]: pattern must not be empty"));
            continue;
        }
        let shadowed = config.provenance_rules[..i]
            .iter()
            .any(|earlier| rule.pattern.contains(earlier.pattern.as_str()));
        if shadowed {
            warnings.push(ConfigWarning::ShadowedProvenanceRule {
                pattern: rule.pattern.clone(),
            });
        }
    }

    if config.backend_url.is_none() {
        warnings.push(ConfigWarning::MissingOptionalField {
            field: "backend_url".into(),
            hint: "scans will skip the live backend and fall through to SQL or cache".into(),
        });
    }
    if config.output_dir.is_none() {
        warnings.push(ConfigWarning::MissingOptionalField {
            field: "output_dir".into(),
            hint: "registry and report artifacts will not be persisted to disk".into(),
        });
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over `base`.
///
/// Source maps and provenance rules are combined; on source-name collisions
/// the overlay entry wins. Provenance rules from `overlay` are appended
/// after `base`'s, preserving first-match-wins order from the base config.
pub fn merge_configs(base: WardenConfig, overlay: WardenConfig) -> WardenConfig {
    let mut sources = base.sources;
    sources.extend(overlay.sources);

    let mut provenance_rules = base.provenance_rules;
    provenance_rules.extend(overlay.provenance_rules);

    WardenConfig {
        backend_url: overlay.backend_url.or(base.backend_url),
        database_url: overlay.database_url.or(base.database_url),
        log_level: overlay.log_level.or(base.log_level),
        cache_dir: overlay.cache_dir.or(base.cache_dir),
        output_dir: overlay.output_dir.or(base.output_dir),
        worker_concurrency: overlay.worker_concurrency.or(base.worker_concurrency),
        degradation_guard: overlay.degradation_guard,
        provenance_rules,
        event_debt_rules: overlay.event_debt_rules,
        sources,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let cfg = WardenConfig::default();
        let warnings = validate_config(&cfg).expect("default config should be valid");
        assert!(!warnings.is_empty(), "should have advisory warnings");
    }

    #[test]
    fn default_config_has_sensible_defaults() {
        let cfg = WardenConfig::default();
        assert_eq!(cfg.log_level.as_deref(), Some("info"));
        assert!(cfg.sources.is_empty());
        assert!(cfg.degradation_guard.block_on_zero_linked);
        assert_eq!(cfg.degradation_guard.warn_shrink_factor, 2.0);
        assert!(!cfg.event_debt_rules.placeholder_name_prefixes.is_empty());
    }

    #[test]
    fn parse_valid_toml_string() {
        let toml_str = r#"
            backend_url = "https://backend.internal"
            log_level = "debug"
            output_dir = "/tmp/out"

            [sources.database]
            timeout_ms = 5000
        "#;
        let cfg = parse_toml(toml_str).unwrap();
        assert_eq!(cfg.backend_url.as_deref(), Some("https://backend.internal"));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.sources.len(), 1);
    }

    #[test]
    fn parse_invalid_toml_gives_parse_error() {
        let bad = "this is [not valid toml =";
        let err = parse_toml(bad).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn parse_wrong_types_gives_parse_error() {
        let toml_str = r#"log_level = 42"#;
        let err = parse_toml(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn validation_catches_invalid_log_level() {
        let cfg = WardenConfig {
            log_level: Some("verbose".into()),
            ..Default::default()
        };
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn validation_catches_empty_source_name() {
        let mut cfg = WardenConfig::default();
        cfg.sources.insert("".into(), SourceEntry { timeout_ms: None });
        let err = validate_config(&cfg).unwrap_err();
        match err {
            ConfigError::ValidationError { reasons } => {
                assert!(reasons.iter().any(|r| r.contains("name must not be empty")));
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn validation_catches_zero_timeout() {
        let mut cfg = WardenConfig::default();
        cfg.sources.insert("sql".into(), SourceEntry { timeout_ms: Some(0) });
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn validation_catches_timeout_exceeding_max() {
        let mut cfg = WardenConfig::default();
        cfg.sources.insert(
            "sql".into(),
            SourceEntry { timeout_ms: Some(MAX_TIMEOUT_MILLIS + 1) },
        );
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn large_timeout_produces_warning() {
        let mut cfg = WardenConfig::default();
        cfg.backend_url = Some("https://b".into());
        cfg.output_dir = Some("/tmp".into());
        cfg.sources.insert(
            "sql".into(),
            SourceEntry { timeout_ms: Some(60_000) },
        );
        let warnings = validate_config(&cfg).unwrap();
        assert!(warnings.iter().any(|w| matches!(w, ConfigWarning::LargeTimeout { .. })));
    }

    #[test]
    fn validation_catches_invalid_shrink_factor() {
        let mut cfg = WardenConfig::default();
        cfg.degradation_guard.warn_shrink_factor = 0.0;
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn shadowed_provenance_rule_produces_warning() {
        let mut cfg = WardenConfig::default();
        cfg.backend_url = Some("https://b".into());
        cfg.output_dir = Some("/tmp".into());
        cfg.provenance_rules.push(ProvenanceRule { pattern: "archive".into(), label: "archived".into() });
        cfg.provenance_rules.push(ProvenanceRule { pattern: "old_archive".into(), label: "legacy-archived".into() });
        let warnings = validate_config(&cfg).unwrap();
        assert!(warnings.iter().any(|w| matches!(w, ConfigWarning::ShadowedProvenanceRule { .. })));
    }

    #[test]
    fn empty_provenance_pattern_is_a_hard_error() {
        let mut cfg = WardenConfig::default();
        cfg.provenance_rules.push(ProvenanceRule { pattern: "".into(), label: "x".into() });
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn merge_overlay_overrides_base() {
        let base = WardenConfig {
            backend_url: Some("https://old".into()),
            log_level: Some("info".into()),
            ..Default::default()
        };
        let overlay = WardenConfig {
            backend_url: Some("https://new".into()),
            log_level: None,
            ..Default::default()
        };
        let merged = merge_configs(base, overlay);
        assert_eq!(merged.backend_url.as_deref(), Some("https://new"));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn merge_combines_source_maps() {
        let base = WardenConfig {
            sources: BTreeMap::from([("a".into(), SourceEntry { timeout_ms: None })]),
            ..Default::default()
        };
        let overlay = WardenConfig {
            sources: BTreeMap::from([("b".into(), SourceEntry { timeout_ms: None })]),
            ..Default::default()
        };
        let merged = merge_configs(base, overlay);
        assert!(merged.sources.contains_key("a"));
        assert!(merged.sources.contains_key("b"));
    }

    #[test]
    fn merge_overlay_source_wins_on_collision() {
        let base = WardenConfig {
            sources: BTreeMap::from([("sql".into(), SourceEntry { timeout_ms: Some(1000) })]),
            ..Default::default()
        };
        let overlay = WardenConfig {
            sources: BTreeMap::from([("sql".into(), SourceEntry { timeout_ms: Some(2000) })]),
            ..Default::default()
        };
        let merged = merge_configs(base, overlay);
        assert_eq!(merged.sources["sql"].timeout_ms, Some(2000));
    }

    #[test]
    fn merge_appends_provenance_rules_preserving_base_order() {
        let base = WardenConfig {
            provenance_rules: vec![ProvenanceRule { pattern: "a".into(), label: "A".into() }],
            ..Default::default()
        };
        let overlay = WardenConfig {
            provenance_rules: vec![ProvenanceRule { pattern: "b".into(), label: "B".into() }],
            ..Default::default()
        };
        let merged = merge_configs(base, overlay);
        assert_eq!(merged.provenance_rules[0].pattern, "a");
        assert_eq!(merged.provenance_rules[1].pattern, "b");
    }

    #[test]
    fn empty_string_toml_parses_to_defaults() {
        let cfg = parse_toml("").unwrap();
        assert_eq!(cfg.backend_url, None);
        assert!(cfg.sources.is_empty());
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = WardenConfig {
            backend_url: Some("https://b".into()),
            database_url: Some("postgres://x".into()),
            log_level: Some("debug".into()),
            cache_dir: Some("/cache".into()),
            output_dir: Some("/out".into()),
            worker_concurrency: Some(4),
            ..Default::default()
        };
        let serialized = toml::to_string(&cfg).unwrap();
        let deserialized: WardenConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warden.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "backend_url = \"https://b\"\nlog_level = \"warn\"").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.backend_url.as_deref(), Some("https://b"));
        assert_eq!(cfg.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn load_missing_file_gives_file_not_found() {
        let err = load_config(Some(Path::new("/nonexistent/warden.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn load_none_returns_default() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::FileNotFound { path: "/foo".into() };
        assert!(e.to_string().contains("/foo"));

        let e = ConfigError::ParseError { reason: "bad toml".into() };
        assert!(e.to_string().contains("bad toml"));
    }

    #[test]
    fn config_warning_display() {
        let w = ConfigWarning::MissingOptionalField { field: "f".into(), hint: "h".into() };
        assert!(w.to_string().contains('f'));

        let w = ConfigWarning::LargeTimeout { source: "sql".into(), millis: 9999 };
        assert!(w.to_string().contains("9999"));

        let w = ConfigWarning::ShadowedProvenanceRule { pattern: "archive".into() };
        assert!(w.to_string().contains("archive"));
    }
}
