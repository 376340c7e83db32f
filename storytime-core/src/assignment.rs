//! Counterbalanced version assignment.
//!
//! Every condition gets one coin flip per complementary pair. The first
//! family of the pair takes the drawn version and the second its complement,
//! so within a pair each condition is shown once as A and once as B. Draws
//! are independent across conditions and pairs; nothing balances the A/B
//! count within a single family.

use crate::design::{Condition, FamilyPair, StoryFamily, Version};
use crate::random::RandomSource;
use serde::Serialize;

/// Version of every condition for every story family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionAssignment {
    table: [[Version; 6]; 4],
}

impl VersionAssignment {
    /// Draw a fresh assignment.
    ///
    /// Conditions are visited in declaration order and, for each, the Ask
    /// pair draws before the Promise pair.
    pub fn draw<R: RandomSource>(rng: &mut R) -> Self {
        let mut table = [[Version::A; 6]; 4];

        for condition in Condition::ALL {
            for pair in FamilyPair::ALL {
                let version = Version::from_flip(rng.coin_flip());
                let (first, second) = pair.members();
                table[first.index()][condition.index()] = version;
                table[second.index()][condition.index()] = version.complement();
            }
        }

        Self { table }
    }

    /// Build an assignment from the versions held by the first member of
    /// each pair (Ask1 and Promise1), in condition declaration order.
    pub fn from_first_members(ask1: [Version; 6], promise1: [Version; 6]) -> Self {
        let mut table = [[Version::A; 6]; 4];
        for condition in Condition::ALL {
            let i = condition.index();
            table[StoryFamily::Ask1.index()][i] = ask1[i];
            table[StoryFamily::Ask2.index()][i] = ask1[i].complement();
            table[StoryFamily::Promise1.index()][i] = promise1[i];
            table[StoryFamily::Promise2.index()][i] = promise1[i].complement();
        }
        Self { table }
    }

    pub fn version(&self, family: StoryFamily, condition: Condition) -> Version {
        self.table[family.index()][condition.index()]
    }

    /// (condition, version) pairs for one family, in declaration order.
    pub fn for_family(&self, family: StoryFamily) -> [(Condition, Version); 6] {
        Condition::ALL.map(|c| (c, self.version(family, c)))
    }

    /// How many conditions of `family` drew version A.
    pub fn count_a(&self, family: StoryFamily) -> usize {
        self.table[family.index()]
            .iter()
            .filter(|v| **v == Version::A)
            .count()
    }
}
