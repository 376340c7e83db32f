//! Generator configuration.

use crate::random::ShuffleAlgorithm;

/// Default asset location for the art class storytime study.
pub const DEFAULT_BASE_DIR: &str =
    "https://raw.githubusercontent.com/smileyblue77/art_class_storytime/master/";

/// Age in days from which a participant counts as an adult (18 years).
pub const ADULT_AGE_DAYS: i64 = 6570;

const DEFAULT_PARENT_TEXT: &str = "If your child is stuck, please do not suggest an answer. \
Instead, we invite you to help by encouraging your child to guess and offering to listen to \
the story again. Reminder: pause at any point by pressing the space bar.";

/// Configuration for protocol generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolConfig {
    /// Base URL prepended to every generated frame's asset names.
    pub base_dir: String,

    /// Audio container formats available for each clip.
    pub audio_types: Vec<String>,

    /// Cue played after the participant picks a choice.
    pub feedback_audio: String,

    /// Title of the parent guidance shown on question frames.
    pub question_parent_title: String,

    /// Body of the parent guidance shown on question frames.
    pub question_parent_text: String,

    /// Permutation algorithm for condition, story and choice order.
    pub shuffle: ShuffleAlgorithm,

    /// Adult threshold in days.
    pub adult_age_days: i64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            audio_types: vec!["mp3".to_string(), "ogg".to_string()],
            feedback_audio: "feedback".to_string(),
            question_parent_title: "For parents".to_string(),
            question_parent_text: DEFAULT_PARENT_TEXT.to_string(),
            shuffle: ShuffleAlgorithm::FisherYates,
            adult_age_days: ADULT_AGE_DAYS,
        }
    }
}

impl ProtocolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `STORYTIME_BASE_DIR` and `STORYTIME_SHUFFLE`
    /// when set.
    pub fn from_env() -> Self {
        Self::from_overrides(
            std::env::var("STORYTIME_BASE_DIR").ok(),
            std::env::var("STORYTIME_SHUFFLE").ok(),
        )
    }

    /// Defaults with optional base URL and shuffle name overrides. An
    /// unrecognized shuffle name is ignored with a warning.
    pub fn from_overrides(base_dir: Option<String>, shuffle: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_dir) = base_dir {
            config.base_dir = base_dir;
        }

        if let Some(shuffle) = shuffle {
            match ShuffleAlgorithm::parse(&shuffle) {
                Some(algorithm) => config.shuffle = algorithm,
                None => tracing::warn!(value = %shuffle, "ignoring unknown STORYTIME_SHUFFLE"),
            }
        }

        config
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_audio_types(mut self, types: Vec<String>) -> Self {
        self.audio_types = types;
        self
    }

    pub fn with_feedback_audio(mut self, audio: impl Into<String>) -> Self {
        self.feedback_audio = audio.into();
        self
    }

    pub fn with_parent_text(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.question_parent_title = title.into();
        self.question_parent_text = text.into();
        self
    }

    pub fn with_shuffle(mut self, algorithm: ShuffleAlgorithm) -> Self {
        self.shuffle = algorithm;
        self
    }

    pub fn with_adult_age_days(mut self, days: i64) -> Self {
        self.adult_age_days = days;
        self
    }
}
