//! ProtocolGenerator - assembles a complete session protocol.
//!
//! A protocol is the ordered list of frame identifiers the playback engine
//! steps through plus the record behind each identifier. Generation is a
//! single synchronous pass:
//!
//! 1. draw counterbalanced versions for both family pairs
//! 2. assemble the four story blocks, each with its own condition order
//! 3. shuffle the story order
//! 4. lay out pre-session frames, then per story a start-recording marker,
//!    the story's twelve trials and (between stories) a rest frame, then the
//!    exit survey
//!
//! Any asset lookup failure aborts the whole call; nothing partial is
//! returned.

use crate::assignment::VersionAssignment;
use crate::catalogue::StimulusCatalogue;
use crate::config::ProtocolConfig;
use crate::design::{Condition, StoryFamily};
use crate::error::ProtocolError;
use crate::frames::FrameRecord;
use crate::participant::{PastSession, Participant};
use crate::random::{RandomSource, RngSource};
use crate::static_frames::StaticFrames;
use crate::story::{StoryAssembler, StoryBlock};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Frames per story block: six conditions, two frames each.
pub const FRAMES_PER_STORY: usize = Condition::ALL.len() * 2;

/// Counterbalancing decisions behind a generated protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// Whether the participant was at least the adult threshold in age.
    pub adult_participant: bool,
    pub versions: VersionAssignment,
    /// Story families in presentation order.
    pub story_order: Vec<StoryFamily>,
    /// Condition order within each family.
    pub condition_orders: BTreeMap<StoryFamily, Vec<Condition>>,
}

/// A complete protocol: `{ "frames": ..., "sequence": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolResult {
    pub frames: BTreeMap<String, FrameRecord>,
    pub sequence: Vec<String>,
    #[serde(skip)]
    pub summary: GenerationSummary,
    #[serde(skip)]
    markers: Markers,
}

#[derive(Debug, Clone)]
struct Markers {
    start_recording: String,
    rest: String,
    exit_survey: String,
}

impl ProtocolResult {
    pub fn to_json_pretty(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Trial identifiers of each story, in presentation order: the
    /// identifiers between every start-recording marker and the following
    /// rest or exit-survey frame.
    pub fn story_blocks(&self) -> Vec<&[String]> {
        let mut blocks = Vec::new();
        let mut start = None;
        for (i, id) in self.sequence.iter().enumerate() {
            if *id == self.markers.start_recording {
                start = Some(i + 1);
            } else if *id == self.markers.rest || *id == self.markers.exit_survey {
                if let Some(s) = start.take() {
                    blocks.push(&self.sequence[s..i]);
                }
            }
        }
        blocks
    }

    /// Check the contract with the playback engine: every identifier in the
    /// sequence has a record, every record is used, and only the repeating
    /// structural markers occur more than once.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        let mut seen = HashSet::new();
        for id in &self.sequence {
            if !self.frames.contains_key(id) {
                return Err(ProtocolError::UnknownFrame(id.clone()));
            }
            let repeatable = *id == self.markers.start_recording || *id == self.markers.rest;
            if !seen.insert(id.as_str()) && !repeatable {
                return Err(ProtocolError::DuplicateTrial(id.clone()));
            }
        }

        if let Some(dead) = self.frames.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(ProtocolError::DeadFrame(dead.clone()));
        }

        Ok(())
    }
}

/// Generates protocols from a catalogue and a set of static frames.
#[derive(Debug, Clone)]
pub struct ProtocolGenerator {
    catalogue: StimulusCatalogue,
    static_frames: StaticFrames,
    config: ProtocolConfig,
}

impl ProtocolGenerator {
    pub fn new(
        catalogue: StimulusCatalogue,
        static_frames: StaticFrames,
        config: ProtocolConfig,
    ) -> Self {
        Self {
            catalogue,
            static_frames,
            config,
        }
    }

    /// Generator for the built-in art class storytime study.
    pub fn art_class(config: ProtocolConfig) -> Result<Self, ProtocolError> {
        Ok(Self::new(
            StimulusCatalogue::art_class()?,
            StaticFrames::art_class()?,
            config,
        ))
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &StimulusCatalogue {
        &self.catalogue
    }

    pub fn static_frames(&self) -> &StaticFrames {
        &self.static_frames
    }

    /// Generate a protocol with the thread-local generator and today's date.
    pub fn generate(
        &self,
        participant: &Participant,
        past_sessions: &[PastSession],
    ) -> Result<ProtocolResult, ProtocolError> {
        let today = Local::now().date_naive();
        self.generate_with(participant, past_sessions, &mut RngSource::thread(), today)
    }

    /// Generate a protocol with an explicit random source and date.
    pub fn generate_with<R: RandomSource>(
        &self,
        participant: &Participant,
        _past_sessions: &[PastSession],
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<ProtocolResult, ProtocolError> {
        let adult_participant = participant.is_adult(today, self.config.adult_age_days);
        debug!(adult_participant, "participant age checked");

        let versions = VersionAssignment::draw(rng);
        for family in StoryFamily::ALL {
            debug!(family = %family, versions = ?versions.for_family(family), "versions drawn");
        }

        let assembler = StoryAssembler::new(&self.catalogue, &self.config);
        let mut frames = BTreeMap::new();
        let mut blocks = Vec::with_capacity(StoryFamily::ALL.len());
        let mut condition_orders = BTreeMap::new();

        for family in StoryFamily::ALL {
            let StoryBlock {
                family,
                condition_order,
                sequence,
                frames: records,
            } = assembler.assemble(family, &versions, rng)?;

            for (id, record) in records {
                insert_frame(&mut frames, id, record)?;
            }
            condition_orders.insert(family, condition_order);
            blocks.push((family, sequence));
        }

        let blocks = rng.shuffle(&blocks, self.config.shuffle);
        let story_order: Vec<StoryFamily> = blocks.iter().map(|(family, _)| *family).collect();

        for id in self.static_frames.referenced_ids() {
            let record = FrameRecord::Static(self.static_frames.get(id)?.clone());
            insert_frame(&mut frames, id.to_string(), record)?;
        }

        let sequence = self.layout(&blocks);

        let result = ProtocolResult {
            frames,
            sequence,
            summary: GenerationSummary {
                adult_participant,
                versions,
                story_order,
                condition_orders,
            },
            markers: Markers {
                start_recording: self.static_frames.start_recording.clone(),
                rest: self.static_frames.rest.clone(),
                exit_survey: self.static_frames.exit_survey.clone(),
            },
        };
        result.validate()?;

        info!(
            frames = result.frames.len(),
            sequence = result.sequence.len(),
            story_order = ?result.summary.story_order,
            "generated protocol"
        );

        Ok(result)
    }

    fn layout(&self, blocks: &[(StoryFamily, Vec<String>)]) -> Vec<String> {
        let statics = &self.static_frames;
        let mut sequence = statics.pre_session.clone();

        for (i, (_, story)) in blocks.iter().enumerate() {
            sequence.push(statics.start_recording.clone());
            sequence.extend(story.iter().cloned());
            if i + 1 < blocks.len() {
                sequence.push(statics.rest.clone());
            }
        }

        sequence.push(statics.exit_survey.clone());
        sequence
    }
}

fn insert_frame(
    frames: &mut BTreeMap<String, FrameRecord>,
    id: String,
    record: FrameRecord,
) -> Result<(), ProtocolError> {
    if frames.contains_key(&id) {
        return Err(ProtocolError::DuplicateFrame(id));
    }
    frames.insert(id, record);
    Ok(())
}
