//! Construction of the exposition/question frame pair for one trial.

use crate::catalogue::StimulusRecord;
use crate::choices::{ChoiceSet, ChoiceSlot};
use crate::config::ProtocolConfig;
use crate::design::{Condition, StoryFamily, Version};
use crate::frames::{
    ExpositionFrame, FrameRecord, ImageSpec, ParentTextBlock, QuestionFrame, IMAGES_AUDIO_KIND,
    STORY_ILLUSTRATION_ID,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Width of each answer choice, in percent of the screen.
const CHOICE_WIDTH: u32 = 15;

/// (left, top, width) of the illustration beside a question.
const QUESTION_ILLUSTRATION: (u32, u32, u32) = (5, 20, 40);

/// Identifies one trial: which family, condition and version it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TrialKey {
    pub family: StoryFamily,
    pub condition: Condition,
    pub version: Version,
}

impl TrialKey {
    pub fn new(family: StoryFamily, condition: Condition, version: Version) -> Self {
        Self {
            family,
            condition,
            version,
        }
    }

    /// e.g. `Ask1-ADJ0A-Exposition`
    pub fn exposition_id(&self) -> String {
        format!("{self}-Exposition")
    }

    /// e.g. `Ask1-ADJ0A-Question`
    pub fn question_id(&self) -> String {
        format!("{self}-Question")
    }
}

impl fmt::Display for TrialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.family, self.condition, self.version)
    }
}

/// The two frames of a trial with their identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialFrames {
    pub key: TrialKey,
    pub exposition: ExpositionFrame,
    pub question: QuestionFrame,
}

impl TrialFrames {
    /// (identifier, record) pairs in presentation order: exposition, question.
    pub fn into_records(self) -> [(String, FrameRecord); 2] {
        [
            (
                self.key.exposition_id(),
                FrameRecord::Exposition(self.exposition),
            ),
            (self.key.question_id(), FrameRecord::Question(self.question)),
        ]
    }
}

/// Builds trial frames in the engine's format.
pub struct TrialFrameFactory<'a> {
    config: &'a ProtocolConfig,
}

impl<'a> TrialFrameFactory<'a> {
    pub fn new(config: &'a ProtocolConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, key: TrialKey, stimulus: &StimulusRecord, choices: &ChoiceSet) -> TrialFrames {
        TrialFrames {
            key,
            exposition: self.exposition(stimulus),
            question: self.question(stimulus, choices),
        }
    }

    fn exposition(&self, stimulus: &StimulusRecord) -> ExpositionFrame {
        ExpositionFrame {
            kind: IMAGES_AUDIO_KIND.to_string(),
            base_dir: self.config.base_dir.clone(),
            audio: stimulus.story_audio.clone(),
            images: vec![ImageSpec::fill(STORY_ILLUSTRATION_ID, &stimulus.story_image)],
            audio_types: self.config.audio_types.clone(),
            auto_proceed: true,
            do_recording: false,
            show_progress_bar: true,
            show_replay_button: true,
        }
    }

    fn question(&self, stimulus: &StimulusRecord, choices: &ChoiceSet) -> QuestionFrame {
        let (left, top, width) = QUESTION_ILLUSTRATION;
        let mut images = Vec::with_capacity(1 + ChoiceSlot::ALL.len());
        images.push(
            ImageSpec::placed(STORY_ILLUSTRATION_ID, &stimulus.story_image, left, top, width)
                .non_choice(),
        );
        images.extend(choices.slots().map(|(slot, src)| {
            let (left, top) = slot.position();
            ImageSpec::placed(slot.id(), src, left, top, CHOICE_WIDTH)
                .with_feedback(&self.config.feedback_audio)
        }));

        let css = BTreeMap::from([
            ("color".to_string(), "black".to_string()),
            ("font-size".to_string(), "medium".to_string()),
        ]);

        QuestionFrame {
            kind: IMAGES_AUDIO_KIND.to_string(),
            base_dir: self.config.base_dir.clone(),
            audio: stimulus.question_audio.clone(),
            images,
            audio_types: self.config.audio_types.clone(),
            auto_proceed: false,
            show_replay_button: true,
            do_recording: false,
            parent_text_block: ParentTextBlock {
                text: self.config.question_parent_text.clone(),
                title: self.config.question_parent_title.clone(),
                css,
            },
            choice_required: true,
            can_make_choice_before_audio_finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StimulusCatalogue;
    use crate::random::ShuffleAlgorithm;
    use crate::testing::ScriptedRandom;

    fn sample_trial() -> TrialFrames {
        let catalogue = StimulusCatalogue::art_class().unwrap();
        let key = TrialKey::new(StoryFamily::Ask1, Condition::Adj0, Version::A);
        let stimulus = catalogue
            .stimulus(key.family, key.condition, key.version)
            .unwrap();
        let mut rng = ScriptedRandom::alternating();
        let choices = ChoiceSet::build(
            &catalogue,
            &stimulus.button_set,
            &mut rng,
            ShuffleAlgorithm::FisherYates,
        )
        .unwrap();
        let config = ProtocolConfig::default();
        TrialFrameFactory::new(&config).build(key, stimulus, &choices)
    }

    #[test]
    fn test_identifiers() {
        let key = TrialKey::new(StoryFamily::Promise2, Condition::Arg1, Version::B);
        assert_eq!(key.exposition_id(), "Promise2-ARG1B-Exposition");
        assert_eq!(key.question_id(), "Promise2-ARG1B-Question");
    }

    #[test]
    fn test_exposition_frame() {
        let trial = sample_trial();
        let frame = &trial.exposition;
        assert_eq!(frame.audio, "A1-ADJ-0-A");
        assert!(frame.auto_proceed);
        assert!(frame.show_replay_button);
        assert_eq!(frame.images.len(), 1);
        assert_eq!(frame.images[0].src, "A1-ADJ-0.jpg");
        assert_eq!(frame.images[0].position.as_deref(), Some("fill"));
    }

    #[test]
    fn test_question_frame() {
        let trial = sample_trial();
        let frame = &trial.question;
        assert_eq!(frame.audio, "Q-A1-ADJ-0-A");
        assert!(frame.choice_required);
        assert!(!frame.can_make_choice_before_audio_finished);
        assert_eq!(frame.images.len(), 5);
        assert!(frame.images[0].non_choice_option);
        assert!(frame.images[1..]
            .iter()
            .all(|i| i.feedback_audio.as_deref() == Some("feedback")));
        assert_eq!(
            frame.choice_images(),
            vec![
                "button_whisper.jpg",
                "button_bothHands.jpg",
                "button_loud.jpg",
                "button_fingerpaint.jpg"
            ]
        );
        assert_eq!(
            frame.resolve_selection("choice2"),
            Some((ChoiceSlot::BottomLeft, "button_loud.jpg"))
        );
        assert_eq!(frame.resolve_selection("storyIllustration"), None);
    }

    #[test]
    fn test_question_frame_json_shape() {
        let trial = sample_trial();
        let value = serde_json::to_value(&trial.question).unwrap();
        assert_eq!(value["kind"], "exp-lookit-images-audio");
        assert_eq!(value["choiceRequired"], true);
        assert_eq!(value["canMakeChoiceBeforeAudioFinished"], false);
        assert_eq!(value["ShowReplayButton"], true);
        assert_eq!(value["images"][0]["nonChoiceOption"], true);
        assert_eq!(value["images"][4]["left"], 75);
        assert_eq!(value["images"][4]["top"], 55);
        assert_eq!(value["parentTextBlock"]["css"]["font-size"], "medium");
    }

    #[test]
    fn test_records_in_presentation_order() {
        let [(first, _), (second, _)] = sample_trial().into_records();
        assert_eq!(first, "Ask1-ADJ0A-Exposition");
        assert_eq!(second, "Ask1-ADJ0A-Question");
    }
}
