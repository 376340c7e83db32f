//! Experimental design types.
//!
//! The study crosses two story kinds (Ask, Promise) with six linguistic
//! conditions (ADJ/ARG x 0/1/2). Each story kind is told twice, as a pair of
//! complementary story families, and every condition is counterbalanced
//! across the pair with an A/B version label.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Conditions
// ============================================================================

/// Whether a condition probes an adjunct or an argument question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    Adjunct,
    Argument,
}

/// One of the six linguistic test conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "ADJ0")]
    Adj0,
    #[serde(rename = "ADJ1")]
    Adj1,
    #[serde(rename = "ADJ2")]
    Adj2,
    #[serde(rename = "ARG0")]
    Arg0,
    #[serde(rename = "ARG1")]
    Arg1,
    #[serde(rename = "ARG2")]
    Arg2,
}

impl Condition {
    /// All conditions in declaration order.
    pub const ALL: [Condition; 6] = [
        Condition::Adj0,
        Condition::Adj1,
        Condition::Adj2,
        Condition::Arg0,
        Condition::Arg1,
        Condition::Arg2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Adj0 => "ADJ0",
            Condition::Adj1 => "ADJ1",
            Condition::Adj2 => "ADJ2",
            Condition::Arg0 => "ARG0",
            Condition::Arg1 => "ARG1",
            Condition::Arg2 => "ARG2",
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Condition::Adj0 | Condition::Adj1 | Condition::Adj2 => QuestionKind::Adjunct,
            Condition::Arg0 | Condition::Arg1 | Condition::Arg2 => QuestionKind::Argument,
        }
    }

    /// Negation level (0, 1 or 2).
    pub fn level(&self) -> u8 {
        match self {
            Condition::Adj0 | Condition::Arg0 => 0,
            Condition::Adj1 | Condition::Arg1 => 1,
            Condition::Adj2 | Condition::Arg2 => 2,
        }
    }

    /// Position in [`Condition::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Condition::Adj0 => 0,
            Condition::Adj1 => 1,
            Condition::Adj2 => 2,
            Condition::Arg0 => 3,
            Condition::Arg1 => 4,
            Condition::Arg2 => 5,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownLabel {
                what: "condition",
                label: s.to_string(),
            })
    }
}

// ============================================================================
// Story families
// ============================================================================

/// A complementary pair of story families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyPair {
    Ask,
    Promise,
}

impl FamilyPair {
    /// Pairs in the order their version draws are interleaved.
    pub const ALL: [FamilyPair; 2] = [FamilyPair::Ask, FamilyPair::Promise];

    /// The two members of the pair. The first receives the drawn version,
    /// the second its complement.
    pub fn members(&self) -> (StoryFamily, StoryFamily) {
        match self {
            FamilyPair::Ask => (StoryFamily::Ask1, StoryFamily::Ask2),
            FamilyPair::Promise => (StoryFamily::Promise1, StoryFamily::Promise2),
        }
    }
}

/// One of the four parallel story blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoryFamily {
    Ask1,
    Ask2,
    Promise1,
    Promise2,
}

impl StoryFamily {
    pub const ALL: [StoryFamily; 4] = [
        StoryFamily::Ask1,
        StoryFamily::Ask2,
        StoryFamily::Promise1,
        StoryFamily::Promise2,
    ];

    /// Name used as the frame identifier prefix.
    pub fn name(&self) -> &'static str {
        match self {
            StoryFamily::Ask1 => "Ask1",
            StoryFamily::Ask2 => "Ask2",
            StoryFamily::Promise1 => "Promise1",
            StoryFamily::Promise2 => "Promise2",
        }
    }

    pub fn pair(&self) -> FamilyPair {
        match self {
            StoryFamily::Ask1 | StoryFamily::Ask2 => FamilyPair::Ask,
            StoryFamily::Promise1 | StoryFamily::Promise2 => FamilyPair::Promise,
        }
    }

    /// The other member of this family's complementary pair.
    pub fn partner(&self) -> StoryFamily {
        match self {
            StoryFamily::Ask1 => StoryFamily::Ask2,
            StoryFamily::Ask2 => StoryFamily::Ask1,
            StoryFamily::Promise1 => StoryFamily::Promise2,
            StoryFamily::Promise2 => StoryFamily::Promise1,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StoryFamily::Ask1 => 0,
            StoryFamily::Ask2 => 1,
            StoryFamily::Promise1 => 2,
            StoryFamily::Promise2 => 3,
        }
    }
}

impl fmt::Display for StoryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoryFamily {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryFamily::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownLabel {
                what: "story family",
                label: s.to_string(),
            })
    }
}

// ============================================================================
// Versions
// ============================================================================

/// Counterbalancing label selecting one of two stimulus variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    A,
    B,
}

impl Version {
    pub const ALL: [Version; 2] = [Version::A, Version::B];

    pub fn complement(self) -> Version {
        match self {
            Version::A => Version::B,
            Version::B => Version::A,
        }
    }

    /// Map a binary draw onto a version (`true` is A).
    pub fn from_flip(flip: bool) -> Version {
        if flip {
            Version::A
        } else {
            Version::B
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Version::A => "A",
            Version::B => "B",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Version {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Version::A),
            "B" | "b" => Ok(Version::B),
            _ => Err(ProtocolError::UnknownLabel {
                what: "version",
                label: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_labels_round_trip() {
        for condition in Condition::ALL {
            assert_eq!(condition.label().parse::<Condition>().unwrap(), condition);
        }
        assert!("ADJ3".parse::<Condition>().is_err());
    }

    #[test]
    fn test_condition_index_matches_declaration_order() {
        for (i, condition) in Condition::ALL.iter().enumerate() {
            assert_eq!(condition.index(), i);
        }
    }

    #[test]
    fn test_condition_kind_and_level() {
        assert_eq!(Condition::Adj2.kind(), QuestionKind::Adjunct);
        assert_eq!(Condition::Arg0.kind(), QuestionKind::Argument);
        assert_eq!(Condition::Arg1.level(), 1);
    }

    #[test]
    fn test_partners_share_a_pair() {
        for family in StoryFamily::ALL {
            assert_ne!(family.partner(), family);
            assert_eq!(family.partner().pair(), family.pair());
            assert_eq!(family.partner().partner(), family);
        }
        assert_eq!(
            FamilyPair::Promise.members(),
            (StoryFamily::Promise1, StoryFamily::Promise2)
        );
    }

    #[test]
    fn test_version_complement() {
        assert_eq!(Version::A.complement(), Version::B);
        assert_eq!(Version::B.complement(), Version::A);
        assert_eq!(Version::from_flip(true), Version::A);
        assert_eq!("b".parse::<Version>().unwrap(), Version::B);
        assert!(matches!(
            "C".parse::<Version>(),
            Err(ProtocolError::UnknownLabel { what: "version", .. })
        ));
    }
}
