//! Counterbalanced protocol generator for the art class storytime study.
//!
//! Children hear four stories (Ask1, Ask2, Promise1, Promise2), each with six
//! question trials covering the conditions ADJ/ARG x 0/1/2. This crate
//! provides:
//! - A/B version assignment, complementary within each story pair
//! - Per-story condition shuffling and per-question choice shuffling
//! - Session layout with recording markers, breaks and static frames
//! - A frame map and frame sequence ready for the playback engine
//!
//! # Quick Start
//!
//! ```no_run
//! use storytime_core::{Participant, ProtocolConfig, ProtocolGenerator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ProtocolGenerator::art_class(ProtocolConfig::default())?;
//!     let participant = Participant::new().with_birthday("2017-04-12");
//!
//!     let protocol = generator.generate(&participant, &[])?;
//!     println!("{}", protocol.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod assignment;
pub mod catalogue;
pub mod choices;
pub mod config;
pub mod design;
pub mod error;
pub mod frames;
pub mod participant;
pub mod protocol;
pub mod random;
pub mod static_frames;
pub mod story;
pub mod testing;
pub mod trial;

// Primary public API
pub use assignment::VersionAssignment;
pub use catalogue::{StimulusCatalogue, StimulusRecord};
pub use choices::{ChoiceSet, ChoiceSlot};
pub use config::ProtocolConfig;
pub use design::{Condition, FamilyPair, StoryFamily, Version};
pub use error::{AssetKind, ProtocolError};
pub use frames::FrameRecord;
pub use participant::{PastSession, Participant};
pub use protocol::{GenerationSummary, ProtocolGenerator, ProtocolResult};
pub use random::{RandomSource, RngSource, ShuffleAlgorithm};
pub use static_frames::StaticFrames;
pub use testing::ScriptedRandom;
