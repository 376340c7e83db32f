//! Error types for protocol generation.

use std::fmt;
use thiserror::Error;

/// Which catalogue table a missing asset was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// A (story family, condition, version) stimulus record.
    Stimulus,
    /// A button-set key.
    ButtonSet,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Stimulus => write!(f, "stimulus"),
            AssetKind::ButtonSet => write!(f, "button set"),
        }
    }
}

/// Errors from loading assets and generating protocols.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Missing stimulus asset ({kind}): {key}")]
    MissingAsset { kind: AssetKind, key: String },

    #[error("Malformed button set {key}: expected 4 images, found {found}")]
    MalformedButtonSet { key: String, found: usize },

    #[error("Unknown {what} label: {label}")]
    UnknownLabel { what: &'static str, label: String },

    #[error("Stimulus defined more than once: {0}")]
    DuplicateStimulus(String),

    #[error("Missing static frame: {0}")]
    MissingStaticFrame(String),

    #[error("Duplicate frame identifier: {0}")]
    DuplicateFrame(String),

    #[error("Sequence references unknown frame: {0}")]
    UnknownFrame(String),

    #[error("Frame is never used in the sequence: {0}")]
    DeadFrame(String),

    #[error("Trial frame appears more than once in the sequence: {0}")]
    DuplicateTrial(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    /// The missing key, if this is a missing-asset error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            ProtocolError::MissingAsset { key, .. } => Some(key),
            _ => None,
        }
    }
}
