//! Frame records handed to the playback engine.
//!
//! Generated trial frames serialize to the engine's `exp-lookit-images-audio`
//! shape. Static frames are carried as opaque JSON.

use crate::choices::ChoiceSlot;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Frame kind for generated image/audio trials.
pub const IMAGES_AUDIO_KIND: &str = "exp-lookit-images-audio";

/// Image id of the story illustration on generated frames.
pub const STORY_ILLUSTRATION_ID: &str = "storyIllustration";

/// One frame of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrameRecord {
    /// A pre-built frame, passed through untouched.
    Static(Value),
    /// Narration over an illustration.
    Exposition(ExpositionFrame),
    /// Question with four answer choices.
    Question(QuestionFrame),
}

impl FrameRecord {
    /// The engine's frame kind.
    pub fn kind(&self) -> Option<&str> {
        match self {
            FrameRecord::Static(value) => value.get("kind").and_then(Value::as_str),
            FrameRecord::Exposition(frame) => Some(&frame.kind),
            FrameRecord::Question(frame) => Some(&frame.kind),
        }
    }

    pub fn is_trial(&self) -> bool {
        !matches!(self, FrameRecord::Static(_))
    }

    pub fn as_question(&self) -> Option<&QuestionFrame> {
        match self {
            FrameRecord::Question(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_exposition(&self) -> Option<&ExpositionFrame> {
        match self {
            FrameRecord::Exposition(frame) => Some(frame),
            _ => None,
        }
    }
}

/// An image placed on a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub id: String,
    pub src: String,
    /// Named placement such as `fill`; used instead of coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Shown but not selectable.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub non_choice_option: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_audio: Option<String>,
}

impl ImageSpec {
    /// An image filling the whole frame.
    pub fn fill(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            position: Some("fill".to_string()),
            left: None,
            top: None,
            width: None,
            non_choice_option: false,
            feedback_audio: None,
        }
    }

    /// An image at explicit (left, top, width) percentages.
    pub fn placed(
        id: impl Into<String>,
        src: impl Into<String>,
        left: u32,
        top: u32,
        width: u32,
    ) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            position: None,
            left: Some(left),
            top: Some(top),
            width: Some(width),
            non_choice_option: false,
            feedback_audio: None,
        }
    }

    pub fn non_choice(mut self) -> Self {
        self.non_choice_option = true;
        self
    }

    pub fn with_feedback(mut self, audio: impl Into<String>) -> Self {
        self.feedback_audio = Some(audio.into());
        self
    }
}

/// Guidance shown to the parent beside a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentTextBlock {
    pub text: String,
    pub title: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub css: BTreeMap<String, String>,
}

/// Story narration played over its illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpositionFrame {
    pub kind: String,
    pub base_dir: String,
    pub audio: String,
    pub images: Vec<ImageSpec>,
    pub audio_types: Vec<String>,
    /// Advance as soon as the narration ends.
    pub auto_proceed: bool,
    pub do_recording: bool,
    pub show_progress_bar: bool,
    #[serde(rename = "ShowReplayButton")]
    pub show_replay_button: bool,
}

/// Question audio with the story illustration and four answer choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFrame {
    pub kind: String,
    pub base_dir: String,
    pub audio: String,
    pub images: Vec<ImageSpec>,
    pub audio_types: Vec<String>,
    pub auto_proceed: bool,
    #[serde(rename = "ShowReplayButton")]
    pub show_replay_button: bool,
    pub do_recording: bool,
    pub parent_text_block: ParentTextBlock,
    /// The participant must pick exactly one choice to continue.
    pub choice_required: bool,
    /// Choices stay disabled until the question audio has played.
    pub can_make_choice_before_audio_finished: bool,
}

impl QuestionFrame {
    /// Image shown in `slot`.
    pub fn choice(&self, slot: ChoiceSlot) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.id == slot.id())
            .map(|image| image.src.as_str())
    }

    /// The selectable images, in slot order.
    pub fn choice_images(&self) -> Vec<&str> {
        ChoiceSlot::ALL
            .iter()
            .filter_map(|&slot| self.choice(slot))
            .collect()
    }

    /// Map an image id reported by the engine to the chosen slot and image.
    pub fn resolve_selection(&self, image_id: &str) -> Option<(ChoiceSlot, &str)> {
        let slot = ChoiceSlot::from_id(image_id)?;
        self.choice(slot).map(|src| (slot, src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_spec_serialization() {
        let image = ImageSpec::placed("choice0", "button_loud.jpg", 55, 20, 15).with_feedback("feedback");
        assert_eq!(
            serde_json::to_value(&image).unwrap(),
            json!({
                "id": "choice0",
                "src": "button_loud.jpg",
                "left": 55,
                "top": 20,
                "width": 15,
                "feedbackAudio": "feedback"
            })
        );

        let fill = ImageSpec::fill(STORY_ILLUSTRATION_ID, "A1-ADJ-0.jpg");
        assert_eq!(
            serde_json::to_value(&fill).unwrap(),
            json!({"id": "storyIllustration", "src": "A1-ADJ-0.jpg", "position": "fill"})
        );
    }

    #[test]
    fn test_static_frame_serializes_verbatim() {
        let value = json!({"kind": "exp-lookit-exit-survey", "debriefing": {"title": "Thanks"}});
        let frame = FrameRecord::Static(value.clone());
        assert_eq!(serde_json::to_value(&frame).unwrap(), value);
        assert_eq!(frame.kind(), Some("exp-lookit-exit-survey"));
        assert!(!frame.is_trial());
    }
}
