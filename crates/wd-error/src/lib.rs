// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unified error taxonomy for Warden, with stable error codes.
//!
//! Every [`WdError`] carries an [`ErrorCode`] (a machine-readable, stable
//! string tag), a human-readable message, an optional cause chain, and
//! arbitrary key-value context, grouped into a five-category taxonomy:
//! `ConfigError`, `IOError`, `DataError`, `PolicyError`, `ExternalError`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// The five broad error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad manifest, missing mandatory file.
    Config,
    /// Filesystem / network failure.
    Io,
    /// Malformed input, parse failure.
    Data,
    /// Conflict freeze, gate failure, degradation-guard trigger.
    Policy,
    /// Subprocess failure, database failure.
    External,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Config => "config",
            Self::Io => "io",
            Self::Data => "data",
            Self::Policy => "policy",
            Self::External => "external",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable, stable error code.
///
/// Each variant serialises to a `SCREAMING_SNAKE_CASE` string that does not
/// change across patch releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // -- Config --
    /// A scanner manifest failed to parse or is missing a required field.
    ConfigManifestInvalid,
    /// A mandatory configuration file is missing.
    ConfigFileMissing,
    /// Two scanners registered under the same flat name.
    ConfigScannerNameCollision,
    /// A multi-target run was requested without an explicit scanner selection.
    ConfigMultiTargetRequiresScanners,

    // -- IO --
    /// The target path does not exist or could not be read.
    IoTargetUnavailable,
    /// Writing the scan artifact failed.
    IoArtifactWriteFailed,

    // -- Data --
    /// A scanner's output could not be parsed into the expected shape.
    DataScannerOutputInvalid,
    /// A registry or inventory file is malformed.
    DataRegistryMalformed,
    /// A URL could not be normalized into a project key.
    DataUrlNotNormalizable,

    // -- Policy --
    /// Two authorities disagree on a project's UUID; resolution is frozen.
    PolicyIdentityConflict,
    /// The gate command found one or more strict-mode violations.
    PolicyGateFailed,
    /// A registry save would overwrite richer data with poorer data.
    PolicyDegradationGuardTriggered,

    // -- External --
    /// A named scanner was requested but is not registered.
    ExternalScannerNotFound,
    /// A `git` subprocess invocation failed or timed out.
    ExternalGitFailed,
    /// The backend HTTP endpoint and the SQL fallback both failed.
    ExternalDataSourceUnavailable,

    /// Catch-all for unexpected internal errors.
    Internal,
}

impl ErrorCode {
    /// Returns the broad [`ErrorCategory`] this code belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigManifestInvalid
            | Self::ConfigFileMissing
            | Self::ConfigScannerNameCollision
            | Self::ConfigMultiTargetRequiresScanners => ErrorCategory::Config,

            Self::IoTargetUnavailable | Self::IoArtifactWriteFailed => ErrorCategory::Io,

            Self::DataScannerOutputInvalid
            | Self::DataRegistryMalformed
            | Self::DataUrlNotNormalizable => ErrorCategory::Data,

            Self::PolicyIdentityConflict
            | Self::PolicyGateFailed
            | Self::PolicyDegradationGuardTriggered => ErrorCategory::Policy,

            Self::ExternalScannerNotFound
            | Self::ExternalGitFailed
            | Self::ExternalDataSourceUnavailable => ErrorCategory::External,

            Self::Internal => ErrorCategory::Data,
        }
    }

    /// Stable `&'static str` representation (e.g. `"POLICY_GATE_FAILED"`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigManifestInvalid => "CONFIG_MANIFEST_INVALID",
            Self::ConfigFileMissing => "CONFIG_FILE_MISSING",
            Self::ConfigScannerNameCollision => "CONFIG_SCANNER_NAME_COLLISION",
            Self::ConfigMultiTargetRequiresScanners => "CONFIG_MULTI_TARGET_REQUIRES_SCANNERS",
            Self::IoTargetUnavailable => "IO_TARGET_UNAVAILABLE",
            Self::IoArtifactWriteFailed => "IO_ARTIFACT_WRITE_FAILED",
            Self::DataScannerOutputInvalid => "DATA_SCANNER_OUTPUT_INVALID",
            Self::DataRegistryMalformed => "DATA_REGISTRY_MALFORMED",
            Self::DataUrlNotNormalizable => "DATA_URL_NOT_NORMALIZABLE",
            Self::PolicyIdentityConflict => "POLICY_IDENTITY_CONFLICT",
            Self::PolicyGateFailed => "POLICY_GATE_FAILED",
            Self::PolicyDegradationGuardTriggered => "POLICY_DEGRADATION_GUARD_TRIGGERED",
            Self::ExternalScannerNotFound => "EXTERNAL_SCANNER_NOT_FOUND",
            Self::ExternalGitFailed => "EXTERNAL_GIT_FAILED",
            Self::ExternalDataSourceUnavailable => "EXTERNAL_DATA_SOURCE_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WdError
// ---------------------------------------------------------------------------

/// Unified Warden error.
///
/// ```
/// use wd_error::{WdError, ErrorCode};
///
/// let err = WdError::new(ErrorCode::ExternalGitFailed, "git status timed out")
///     .with_context("target", "/repos/alpha")
///     .with_context("timeout_secs", 60);
/// ```
pub struct WdError {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Optional underlying cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Arbitrary structured context for diagnostics.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl WdError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            context: BTreeMap::new(),
        }
    }

    /// Attach a key-value pair to the diagnostic context.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Shorthand for `self.code.category()`.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

impl fmt::Debug for WdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("WdError");
        d.field("code", &self.code);
        d.field("message", &self.message);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        if !self.context.is_empty() {
            d.field("context", &self.context);
        }
        d.finish()
    }
}

impl fmt::Display for WdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)?;
        if !self.context.is_empty() {
            // Deterministic output thanks to BTreeMap.
            if let Ok(ctx) = serde_json::to_string(&self.context) {
                write!(f, " {ctx}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for WdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Serialisable snapshot of a [`WdError`] (without the opaque source), used
/// to embed failures into a `ScanResult` artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WdErrorDto {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Structured context.
    pub context: BTreeMap<String, serde_json::Value>,
    /// String representation of the source error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_message: Option<String>,
}

impl From<&WdError> for WdErrorDto {
    fn from(err: &WdError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            context: err.context.clone(),
            source_message: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}
