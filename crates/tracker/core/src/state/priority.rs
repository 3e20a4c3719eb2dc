//! Initiative priority and its single-character suffix.
//!
//! The host stores a priority as `<number>[.<tiebreak>][<suffix>]`. Inside the
//! engine it is the tagged value [`Priority`]; the string form only appears at
//! the persistence boundary through [`core::str::FromStr`] and
//! [`core::fmt::Display`].

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::TurnOrderError;

/// One-character marker appended to a participant's priority.
///
/// A participant carries at most one suffix, so the delay/ready flags and the
/// round-scoped surprise/latecomer markers exclude each other.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suffix {
    /// Surprised this round; acts after aware combatants on the same score.
    #[strum(serialize = "!")]
    Surprised,
    /// Aware during a surprise round; acts before tied combatants.
    #[strum(serialize = "½")]
    Aware,
    /// Joined mid-round on a score already taken.
    #[strum(serialize = "*")]
    Latecomer,
    /// Delaying the turn.
    #[strum(serialize = "D")]
    Delayed,
    /// Readying an action.
    #[strum(serialize = "R")]
    Readying,
}

impl Suffix {
    /// Parses a single suffix character.
    pub fn from_char(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).parse().ok()
    }

    /// Returns the character written after the numeric priority.
    pub fn as_char(self) -> char {
        match self {
            Self::Surprised => '!',
            Self::Aware => '½',
            Self::Latecomer => '*',
            Self::Delayed => 'D',
            Self::Readying => 'R',
        }
    }

    /// True for markers that only last until the participant's next lap.
    pub const fn is_round_scoped(self) -> bool {
        matches!(self, Self::Surprised | Self::Aware | Self::Latecomer)
    }

    /// Position among equal numeric priorities, lower acts first.
    const fn rank(suffix: Option<Self>) -> u8 {
        match suffix {
            Some(Self::Aware) => 0,
            None => 1,
            Some(Self::Latecomer) => 2,
            Some(Self::Surprised) => 3,
            Some(Self::Delayed) => 4,
            Some(Self::Readying) => 5,
        }
    }
}

/// Delay/ready state a participant can choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum TurnFlag {
    Delayed,
    Readying,
}

impl From<TurnFlag> for Suffix {
    fn from(flag: TurnFlag) -> Self {
        match flag {
            TurnFlag::Delayed => Suffix::Delayed,
            TurnFlag::Readying => Suffix::Readying,
        }
    }
}

/// Outcome of the surprise check made when joining a surprise round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum SurpriseState {
    Surprised,
    Aware,
}

impl From<SurpriseState> for Suffix {
    fn from(state: SurpriseState) -> Self {
        match state {
            SurpriseState::Surprised => Suffix::Surprised,
            SurpriseState::Aware => Suffix::Aware,
        }
    }
}

/// Orderable initiative value.
///
/// The number is kept as signed hundredths, so `d20 + init + 0.DEX` keeps
/// its numeric meaning below zero: `-1.86` is `-2` plus a tiebreak of `14`
/// and acts before `-1.88`.
///
/// `Ord` is "acts earlier is greater": higher value first, then suffix
/// precedence `½`, none, `*`, `!`, `D`, `R`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Priority {
    hundredths: i32,
    pub suffix: Option<Suffix>,
}

impl Priority {
    pub const MAX_TIEBREAK: u8 = 99;

    /// `score + tiebreak / 100`, the tiebreak clamped to two digits.
    pub fn new(score: i32, tiebreak: u8) -> Self {
        let tiebreak = i32::from(tiebreak.min(Self::MAX_TIEBREAK));
        Self {
            hundredths: score.saturating_mul(100).saturating_add(tiebreak),
            suffix: None,
        }
    }

    /// Whole part, rounded toward negative infinity.
    pub fn score(&self) -> i32 {
        self.hundredths.div_euclid(100)
    }

    /// Two-digit fraction added on top of [`score`](Self::score).
    pub fn tiebreak(&self) -> u8 {
        self.hundredths.rem_euclid(100) as u8
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: Option<Suffix>) -> Self {
        self.suffix = suffix;
        self
    }

    #[must_use]
    pub fn without_suffix(self) -> Self {
        self.with_suffix(None)
    }

    /// True when the numeric values match, regardless of suffix.
    pub fn same_value(&self, other: &Self) -> bool {
        self.hundredths == other.hundredths
    }

    pub fn flag(&self) -> Option<TurnFlag> {
        match self.suffix {
            Some(Suffix::Delayed) => Some(TurnFlag::Delayed),
            Some(Suffix::Readying) => Some(TurnFlag::Readying),
            _ => None,
        }
    }

    pub fn surprise(&self) -> Option<SurpriseState> {
        match self.suffix {
            Some(Suffix::Surprised) => Some(SurpriseState::Surprised),
            Some(Suffix::Aware) => Some(SurpriseState::Aware),
            _ => None,
        }
    }

    pub fn is_round_scoped(&self) -> bool {
        self.suffix.is_some_and(Suffix::is_round_scoped)
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hundredths
            .cmp(&other.hundredths)
            .then(Suffix::rank(other.suffix).cmp(&Suffix::rank(self.suffix)))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.hundredths.unsigned_abs();
        if self.hundredths < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", magnitude / 100)?;
        if magnitude % 100 != 0 {
            write!(f, ".{:02}", magnitude % 100)?;
        }
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl FromStr for Priority {
    type Err = TurnOrderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || TurnOrderError::MalformedPriority(raw.to_string());
        let text = raw.trim();

        let last = text.chars().next_back().ok_or_else(malformed)?;
        let (body, suffix) = match Suffix::from_char(last) {
            Some(suffix) => (&text[..text.len() - last.len_utf8()], Some(suffix)),
            None => (text, None),
        };

        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        // Host arithmetic can leave long fractions; only two digits matter.
        let cents = match fraction.as_bytes() {
            [] => 0,
            [tens] => i64::from(tens - b'0') * 10,
            [tens, units, ..] => i64::from(tens - b'0') * 10 + i64::from(units - b'0'),
        };
        let magnitude = whole
            .parse::<i64>()
            .ok()
            .and_then(|whole| whole.checked_mul(100))
            .map(|whole| whole + cents)
            .ok_or_else(malformed)?;
        let signed = if negative { -magnitude } else { magnitude };
        let hundredths = i32::try_from(signed).map_err(|_| malformed())?;

        Ok(Self { hundredths, suffix })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
