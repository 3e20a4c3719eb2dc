//! Host wire format for the turn-order field.
//!
//! The host stores the track as a JSON array of `{id, pr, custom, formula}`
//! objects. Participants carry their own id; round markers and timed effects
//! share the id `"-1"` and are told apart by their `custom` text.

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::error::TurnOrderError;
use crate::state::{ParticipantId, TurnEntry, TurnOrder};

/// Id the host gives entries that are not tokens.
pub const CUSTOM_ID: &str = "-1";

const MARKER_FORMULA: &str = "+1";
const EFFECT_FORMULA: &str = "-1";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("turn order is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Order(#[from] TurnOrderError),
}

/// `pr` as the host writes it: usually a string, sometimes a bare number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePriority {
    Text(String),
    Number(serde_json::Number),
}

impl WirePriority {
    fn text(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
        }
    }

    /// Whole-number reading used for round counters and durations.
    /// Fractions are truncated and negatives clamp to zero.
    fn count(&self) -> Result<u32, TurnOrderError> {
        let text = self.text();
        let whole = text.split_once('.').map_or(text.as_str(), |(whole, _)| whole);
        if let Some(digits) = whole.strip_prefix('-')
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(0);
        }
        whole
            .parse::<u32>()
            .map_err(|_| TurnOrderError::MalformedPriority(text.clone()))
    }
}

/// One element of the host's turn-order array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireEntry {
    pub id: String,
    pub pr: WirePriority,
    #[serde(default)]
    pub custom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<serde_json::Value>,
}

pub fn to_wire(entry: &TurnEntry, config: &TrackerConfig) -> WireEntry {
    match entry {
        TurnEntry::Participant { id, priority } => WireEntry {
            id: id.to_string(),
            pr: WirePriority::Text(priority.to_string()),
            custom: String::new(),
            formula: None,
        },
        TurnEntry::RoundMarker { round } => WireEntry {
            id: CUSTOM_ID.to_string(),
            pr: WirePriority::Text(round.to_string()),
            custom: config.round_marker_label.clone(),
            formula: Some(MARKER_FORMULA.into()),
        },
        TurnEntry::TimedEffect {
            description,
            remaining,
        } => WireEntry {
            id: CUSTOM_ID.to_string(),
            pr: WirePriority::Text(remaining.to_string()),
            custom: description.clone(),
            formula: Some(EFFECT_FORMULA.into()),
        },
    }
}

pub fn from_wire(wire: &WireEntry, config: &TrackerConfig) -> Result<TurnEntry, TurnOrderError> {
    if wire.id != CUSTOM_ID {
        let priority = wire.pr.text().parse()?;
        return Ok(TurnEntry::Participant {
            id: ParticipantId::new(wire.id.as_str()),
            priority,
        });
    }

    if wire.custom.trim() == config.round_marker_label {
        Ok(TurnEntry::RoundMarker {
            round: wire.pr.count()?,
        })
    } else {
        Ok(TurnEntry::TimedEffect {
            description: wire.custom.clone(),
            remaining: wire.pr.count()?,
        })
    }
}

/// Parses the host field. Blank text is an empty track.
pub fn decode(text: &str, config: &TrackerConfig) -> Result<TurnOrder, CodecError> {
    if text.trim().is_empty() {
        return Ok(TurnOrder::new());
    }
    let wire: Vec<WireEntry> = serde_json::from_str(text)?;
    let entries = wire
        .iter()
        .map(|entry| from_wire(entry, config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TurnOrder::from_entries(entries, config)?)
}

pub fn encode(order: &TurnOrder, config: &TrackerConfig) -> Result<String, CodecError> {
    let wire: Vec<WireEntry> = order
        .entries()
        .iter()
        .map(|entry| to_wire(entry, config))
        .collect();
    Ok(serde_json::to_string(&wire)?)
}
