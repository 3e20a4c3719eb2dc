//! Participant sheets: the character data the oracles read.

use crate::state::ParticipantId;

use super::ParticipantStatus;

/// Creature type as far as dying rules are concerned.
///
/// Non-living creatures skip negative hit points and are destroyed at zero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CreatureKind {
    #[default]
    Living,
    Undead,
    Construct,
    Inevitable,
    Swarm,
}

impl CreatureKind {
    pub const fn is_living(self) -> bool {
        matches!(self, Self::Living)
    }
}

/// Character data for one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSheet {
    pub id: ParticipantId,
    pub name: String,
    /// Initiative modifier added to the d20.
    pub init: i32,
    /// Dexterity score; becomes the two-digit tiebreak.
    pub dex: u8,
    /// Constitution score; a living creature dies at `-con` hit points.
    pub con: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub perception: i32,
    pub hp: i32,
    pub hp_max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nonlethal: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: CreatureKind,
    /// Set once a dying creature has stabilised.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stable: bool,
}

impl ParticipantSheet {
    /// Creates a healthy living sheet with average stats.
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            init: 0,
            dex: 10,
            con: 10,
            perception: 0,
            hp: 10,
            hp_max: 10,
            nonlethal: 0,
            kind: CreatureKind::Living,
            stable: false,
        }
    }

    pub fn with_init(mut self, init: i32, dex: u8) -> Self {
        self.init = init;
        self.dex = dex;
        self
    }

    pub fn with_hp(mut self, hp: i32, hp_max: i32) -> Self {
        self.hp = hp;
        self.hp_max = hp_max;
        self
    }

    pub fn with_kind(mut self, kind: CreatureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Hit points after nonlethal damage.
    pub fn effective_hp(&self) -> i32 {
        self.hp - self.nonlethal
    }

    pub fn status(&self) -> ParticipantStatus {
        let destroyed = !self.kind.is_living() && self.hp < 1;
        if destroyed || self.hp <= -self.con {
            ParticipantStatus::Dead
        } else {
            ParticipantStatus::Active
        }
    }

    /// Reminders shown when this participant's turn comes up.
    pub fn start_of_turn_notices(&self) -> Vec<String> {
        if self.status() == ParticipantStatus::Dead {
            return Vec::new();
        }

        let mut notices = Vec::new();
        if self.hp < 0 && !self.stable {
            notices.push(format!(
                "{} is dying. Each turn they must make a DC {} CON check to stop bleeding.",
                self.name,
                10 - self.hp
            ));
        } else if self.effective_hp() == 0 {
            let condition = if self.hp == 0 { "disabled" } else { "staggered" };
            notices.push(format!(
                "{} is {condition}. They can only make one standard or move action each round.",
                self.name
            ));
        }
        notices
    }
}
