//! Answer-choice arrangement for question frames.

use crate::catalogue::{StimulusCatalogue, BUTTON_SET_SIZE};
use crate::error::ProtocolError;
use crate::random::{RandomSource, ShuffleAlgorithm};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed answer positions on a question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceSlot {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ChoiceSlot {
    pub const ALL: [ChoiceSlot; 4] = [
        ChoiceSlot::TopLeft,
        ChoiceSlot::TopRight,
        ChoiceSlot::BottomLeft,
        ChoiceSlot::BottomRight,
    ];

    /// Image id the playback engine reports when this slot is selected.
    pub fn id(&self) -> &'static str {
        match self {
            ChoiceSlot::TopLeft => "choice0",
            ChoiceSlot::TopRight => "choice1",
            ChoiceSlot::BottomLeft => "choice2",
            ChoiceSlot::BottomRight => "choice3",
        }
    }

    /// Resolve a selected image id back to its slot.
    pub fn from_id(id: &str) -> Option<ChoiceSlot> {
        ChoiceSlot::ALL.into_iter().find(|slot| slot.id() == id)
    }

    pub fn index(&self) -> usize {
        match self {
            ChoiceSlot::TopLeft => 0,
            ChoiceSlot::TopRight => 1,
            ChoiceSlot::BottomLeft => 2,
            ChoiceSlot::BottomRight => 3,
        }
    }

    /// Screen placement as (left, top) percentages.
    pub fn position(&self) -> (u32, u32) {
        match self {
            ChoiceSlot::TopLeft => (55, 20),
            ChoiceSlot::TopRight => (75, 20),
            ChoiceSlot::BottomLeft => (55, 55),
            ChoiceSlot::BottomRight => (75, 55),
        }
    }
}

impl fmt::Display for ChoiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Four images assigned to the four slots of a question frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSet {
    /// Button-set key the images were drawn from.
    pub key: String,
    images: [String; BUTTON_SET_SIZE],
}

impl ChoiceSet {
    /// Shuffle the button set named by `key` into the four slots.
    pub fn build<R: RandomSource>(
        catalogue: &StimulusCatalogue,
        key: &str,
        rng: &mut R,
        algorithm: ShuffleAlgorithm,
    ) -> Result<Self, ProtocolError> {
        let images = catalogue.button_set(key)?;
        let shuffled = rng.shuffle(images, algorithm);
        let found = shuffled.len();
        let images: [String; BUTTON_SET_SIZE] =
            shuffled
                .try_into()
                .map_err(|_| ProtocolError::MalformedButtonSet {
                    key: key.to_string(),
                    found,
                })?;

        Ok(Self {
            key: key.to_string(),
            images,
        })
    }

    pub fn image(&self, slot: ChoiceSlot) -> &str {
        &self.images[slot.index()]
    }

    /// (slot, image) pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (ChoiceSlot, &str)> {
        ChoiceSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.image(slot)))
    }

    pub fn images(&self) -> &[String; BUTTON_SET_SIZE] {
        &self.images
    }
}
