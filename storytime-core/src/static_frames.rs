//! Fixed, non-randomized frames.
//!
//! Setup, consent, assent, orientation, break and exit frames are opaque to
//! the generator: it only places their identifiers in the sequence and copies
//! their definitions into the frame map untouched.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const ART_CLASS_STATIC_FRAMES: &str = include_str!("../assets/static_frames.json");

/// The static frames of a session and where they go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFrames {
    /// Identifiers shown before the first story, in order.
    pub pre_session: Vec<String>,
    /// Marker placed before every story.
    pub start_recording: String,
    /// Break placed between stories.
    pub rest: String,
    /// Final frame of the session.
    pub exit_survey: String,
    /// Frame definitions keyed by identifier.
    pub frames: BTreeMap<String, Value>,
}

impl StaticFrames {
    /// The built-in static frames for the art class storytime study.
    pub fn art_class() -> Result<Self, ProtocolError> {
        Self::from_json(ART_CLASS_STATIC_FRAMES)
    }

    /// Parse and validate static frames from JSON.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let frames: StaticFrames = serde_json::from_str(json)?;
        frames.validate()?;
        Ok(frames)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Every identifier the session layout references, each once, in
    /// first-use order.
    pub fn referenced_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(self.pre_session.len() + 3);
        let markers = [&self.start_recording, &self.rest, &self.exit_survey];
        for id in self.pre_session.iter().chain(markers) {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }

    /// Check the layout: only the start-recording and rest markers may
    /// repeat in a session, so they must be distinct from each other and
    /// from every pre-session and exit identifier, and pre-session
    /// identifiers must be unique. Every referenced identifier needs a
    /// definition.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.start_recording == self.rest {
            return Err(ProtocolError::DuplicateFrame(self.rest.clone()));
        }

        let mut seen = HashSet::new();
        for id in self.pre_session.iter().chain([&self.exit_survey]) {
            let is_marker = *id == self.start_recording || *id == self.rest;
            if is_marker || !seen.insert(id.as_str()) {
                return Err(ProtocolError::DuplicateFrame(id.clone()));
            }
        }

        for id in self.referenced_ids() {
            if !self.frames.contains_key(id) {
                return Err(ProtocolError::MissingStaticFrame(id.to_string()));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&Value, ProtocolError> {
        self.frames
            .get(id)
            .ok_or_else(|| ProtocolError::MissingStaticFrame(id.to_string()))
    }
}
