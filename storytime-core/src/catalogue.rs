//! Stimulus catalogue.
//!
//! Maps (story family, condition, version) to the stimulus record used for a
//! trial, and button-set keys to the four images shown as answer choices.
//! The catalogue is pure data; the built-in one for the art class storytime
//! study is embedded from `assets/catalogue.json`.

use crate::design::{Condition, StoryFamily, Version};
use crate::error::{AssetKind, ProtocolError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Number of images in every button set.
pub const BUTTON_SET_SIZE: usize = 4;

const ART_CLASS_CATALOGUE: &str = include_str!("../assets/catalogue.json");

/// The stimuli for one trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusRecord {
    /// Illustration shown during the exposition and beside the question.
    pub story_image: String,
    /// Narration played over the illustration.
    pub story_audio: String,
    /// Key into the button-set table.
    pub button_set: String,
    /// Audio asking the question.
    pub question_audio: String,
}

impl StimulusRecord {
    pub fn new(
        story_image: impl Into<String>,
        story_audio: impl Into<String>,
        button_set: impl Into<String>,
        question_audio: impl Into<String>,
    ) -> Self {
        Self {
            story_image: story_image.into(),
            story_audio: story_audio.into(),
            button_set: button_set.into(),
            question_audio: question_audio.into(),
        }
    }
}

/// On-disk layout: `stories.<family>.<condition>.<version>` and `button_sets`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogueFile {
    stories: BTreeMap<String, BTreeMap<String, BTreeMap<String, StimulusRecord>>>,
    button_sets: BTreeMap<String, Vec<String>>,
}

/// Lookup tables for trial stimuli and answer-choice images.
#[derive(Debug, Clone, Default)]
pub struct StimulusCatalogue {
    stimuli: HashMap<(StoryFamily, Condition, Version), StimulusRecord>,
    button_sets: HashMap<String, Vec<String>>,
}

impl StimulusCatalogue {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalogue for the art class storytime study.
    pub fn art_class() -> Result<Self, ProtocolError> {
        Self::from_json(ART_CLASS_CATALOGUE)
    }

    /// Parse a catalogue from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        let mut catalogue = Self::new();

        for (family, conditions) in file.stories {
            let family: StoryFamily = family.parse()?;
            for (condition, versions) in conditions {
                let condition: Condition = condition.parse()?;
                for (version, record) in versions {
                    let version: Version = version.parse()?;
                    // Labels parse case-insensitively, so two keys can name one trial
                    if catalogue
                        .insert_stimulus(family, condition, version, record)
                        .is_some()
                    {
                        return Err(ProtocolError::DuplicateStimulus(format!(
                            "{family}/{condition}/{version}"
                        )));
                    }
                }
            }
        }

        for (key, images) in file.button_sets {
            catalogue.insert_button_set(key, images);
        }

        Ok(catalogue)
    }

    /// Load a catalogue from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize back to the JSON layout accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        let mut file = CatalogueFile::default();
        for ((family, condition, version), record) in &self.stimuli {
            file.stories
                .entry(family.to_string())
                .or_default()
                .entry(condition.to_string())
                .or_default()
                .insert(version.to_string(), record.clone());
        }
        file.button_sets = self
            .button_sets
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn insert_stimulus(
        &mut self,
        family: StoryFamily,
        condition: Condition,
        version: Version,
        record: StimulusRecord,
    ) -> Option<StimulusRecord> {
        self.stimuli.insert((family, condition, version), record)
    }

    pub fn insert_button_set(
        &mut self,
        key: impl Into<String>,
        images: Vec<String>,
    ) -> Option<Vec<String>> {
        self.button_sets.insert(key.into(), images)
    }

    pub fn remove_button_set(&mut self, key: &str) -> Option<Vec<String>> {
        self.button_sets.remove(key)
    }

    /// Mutable access to a stimulus record, for callers patching a catalogue.
    pub fn stimulus_mut(
        &mut self,
        family: StoryFamily,
        condition: Condition,
        version: Version,
    ) -> Option<&mut StimulusRecord> {
        self.stimuli.get_mut(&(family, condition, version))
    }

    /// Look up the stimulus record for one trial.
    pub fn stimulus(
        &self,
        family: StoryFamily,
        condition: Condition,
        version: Version,
    ) -> Result<&StimulusRecord, ProtocolError> {
        self.stimuli
            .get(&(family, condition, version))
            .ok_or_else(|| ProtocolError::MissingAsset {
                kind: AssetKind::Stimulus,
                key: format!("{family}/{condition}/{version}"),
            })
    }

    /// Look up a button set. Fails if the key is absent or the set does not
    /// hold exactly [`BUTTON_SET_SIZE`] images.
    pub fn button_set(&self, key: &str) -> Result<&[String; BUTTON_SET_SIZE], ProtocolError> {
        let images = self
            .button_sets
            .get(key)
            .ok_or_else(|| ProtocolError::MissingAsset {
                kind: AssetKind::ButtonSet,
                key: key.to_string(),
            })?;

        images
            .as_slice()
            .try_into()
            .map_err(|_| ProtocolError::MalformedButtonSet {
                key: key.to_string(),
                found: images.len(),
            })
    }

    pub fn stimulus_count(&self) -> usize {
        self.stimuli.len()
    }

    pub fn button_set_count(&self) -> usize {
        self.button_sets.len()
    }

    /// Check that every trial the generator could draw resolves: all
    /// family x condition x version records exist and each references a
    /// well-formed button set with no repeated image.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        for family in StoryFamily::ALL {
            for condition in Condition::ALL {
                for version in Version::ALL {
                    let record = self.stimulus(family, condition, version)?;
                    let images = self.button_set(&record.button_set)?;
                    let mut distinct: Vec<&String> = images.iter().collect();
                    distinct.sort();
                    distinct.dedup();
                    if distinct.len() != BUTTON_SET_SIZE {
                        return Err(ProtocolError::MalformedButtonSet {
                            key: record.button_set.clone(),
                            found: distinct.len(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_art_class_catalogue_is_complete() {
        let catalogue = StimulusCatalogue::art_class().unwrap();
        assert_eq!(catalogue.stimulus_count(), 4 * 6 * 2);
        assert_eq!(catalogue.button_set_count(), 24);
        catalogue.validate().unwrap();
    }

    #[test]
    fn test_stimulus_lookup() {
        let catalogue = StimulusCatalogue::art_class().unwrap();
        let record = catalogue
            .stimulus(StoryFamily::Ask1, Condition::Adj0, Version::B)
            .unwrap();
        assert_eq!(record.story_image, "A1-ADJ-0.jpg");
        assert_eq!(record.story_audio, "A1-ADJ-0-B");
        assert_eq!(record.button_set, "A1-ADJ-0Buttons");
        assert_eq!(record.question_audio, "Q-A1-ADJ-0-B");

        // Some illustrations differ between versions
        let a = catalogue
            .stimulus(StoryFamily::Promise2, Condition::Arg0, Version::A)
            .unwrap();
        assert_eq!(a.story_image, "P2-ARG-0-A.jpg");
    }

    #[test]
    fn test_missing_button_set_names_key() {
        let catalogue = StimulusCatalogue::new();
        let err = catalogue.button_set("X1-ADJ0Buttons").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MissingAsset {
                kind: AssetKind::ButtonSet,
                ..
            }
        ));
        assert_eq!(err.missing_key(), Some("X1-ADJ0Buttons"));
    }

    #[test]
    fn test_missing_stimulus_names_key() {
        let catalogue = StimulusCatalogue::new();
        let err = catalogue
            .stimulus(StoryFamily::Promise1, Condition::Arg2, Version::A)
            .unwrap_err();
        assert_eq!(err.missing_key(), Some("Promise1/ARG2/A"));
    }

    #[test]
    fn test_malformed_button_set() {
        let mut catalogue = StimulusCatalogue::new();
        catalogue.insert_button_set("short", vec!["a.jpg".into(), "b.jpg".into()]);
        assert!(matches!(
            catalogue.button_set("short"),
            Err(ProtocolError::MalformedButtonSet { found: 2, .. })
        ));
    }

    #[test]
    fn test_validate_reports_missing_entries() {
        let mut catalogue = StimulusCatalogue::art_class().unwrap();
        catalogue.remove_button_set("P1-ARG-2Buttons");
        let err = catalogue.validate().unwrap_err();
        assert_eq!(err.missing_key(), Some("P1-ARG-2Buttons"));
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        let json = r#"{"stories": {"Ask3": {}}, "button_sets": {}}"#;
        assert!(matches!(
            StimulusCatalogue::from_json(json),
            Err(ProtocolError::UnknownLabel {
                what: "story family",
                ..
            })
        ));
    }

    #[test]
    fn test_case_variant_labels_collide() {
        let record = r#"{"story_image": "a.jpg", "story_audio": "a", "button_set": "s", "question_audio": "q"}"#;
        let json = format!(
            r#"{{"stories": {{"Ask1": {{"ADJ0": {{"A": {record}}}}}, "ask1": {{"adj0": {{"a": {record}}}}}}}, "button_sets": {{}}}}"#
        );
        match StimulusCatalogue::from_json(&json) {
            Err(ProtocolError::DuplicateStimulus(key)) => assert_eq!(key, "Ask1/ADJ0/A"),
            other => panic!("expected duplicate stimulus, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip_preserves_tables() {
        let catalogue = StimulusCatalogue::art_class().unwrap();
        let reparsed = StimulusCatalogue::from_json(&catalogue.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.stimulus_count(), catalogue.stimulus_count());
        assert_eq!(
            reparsed.button_set("A2-ADJ-1Buttons").unwrap(),
            catalogue.button_set("A2-ADJ-1Buttons").unwrap()
        );
    }
}
