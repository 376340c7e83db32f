//! Assembly of one story block.

use crate::assignment::VersionAssignment;
use crate::catalogue::StimulusCatalogue;
use crate::choices::ChoiceSet;
use crate::config::ProtocolConfig;
use crate::design::{Condition, StoryFamily};
use crate::error::ProtocolError;
use crate::frames::FrameRecord;
use crate::random::RandomSource;
use crate::trial::{TrialFrameFactory, TrialKey};
use tracing::debug;

/// The frames of one story, in presentation order.
#[derive(Debug, Clone)]
pub struct StoryBlock {
    pub family: StoryFamily,
    /// The randomized order the conditions are presented in.
    pub condition_order: Vec<Condition>,
    /// Trial identifiers, exposition then question for each condition.
    pub sequence: Vec<String>,
    /// Records to insert into the session's frame map.
    pub frames: Vec<(String, FrameRecord)>,
}

/// Builds the six trials of a story family.
pub struct StoryAssembler<'a> {
    catalogue: &'a StimulusCatalogue,
    config: &'a ProtocolConfig,
}

impl<'a> StoryAssembler<'a> {
    pub fn new(catalogue: &'a StimulusCatalogue, config: &'a ProtocolConfig) -> Self {
        Self { catalogue, config }
    }

    /// Shuffle the conditions and build one trial per condition using the
    /// family's assigned versions.
    pub fn assemble<R: RandomSource>(
        &self,
        family: StoryFamily,
        versions: &VersionAssignment,
        rng: &mut R,
    ) -> Result<StoryBlock, ProtocolError> {
        let factory = TrialFrameFactory::new(self.config);
        let condition_order = rng.shuffle(&Condition::ALL, self.config.shuffle);

        let mut sequence = Vec::with_capacity(condition_order.len() * 2);
        let mut frames = Vec::with_capacity(condition_order.len() * 2);

        for &condition in &condition_order {
            let key = TrialKey::new(family, condition, versions.version(family, condition));
            let stimulus = self.catalogue.stimulus(family, condition, key.version)?;
            let choices =
                ChoiceSet::build(self.catalogue, &stimulus.button_set, rng, self.config.shuffle)?;

            for (id, record) in factory.build(key, stimulus, &choices).into_records() {
                sequence.push(id.clone());
                frames.push((id, record));
            }
        }

        debug!(
            family = %family,
            order = ?condition_order.iter().map(Condition::label).collect::<Vec<_>>(),
            "assembled story"
        );

        Ok(StoryBlock {
            family,
            condition_order,
            sequence,
            frames,
        })
    }
}
