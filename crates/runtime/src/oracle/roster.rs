//! Roster oracle implementing the tracker-core participant, initiative and
//! surprise oracles from character sheets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use tracker_core::{
    InitiativeOracle, ParticipantId, ParticipantOracle, ParticipantSheet, ParticipantStatus,
    PcgRng, Priority, RngOracle, SurpriseOracle, compute_seed,
};

const INITIATIVE_ROLL: u32 = 0;
const SURPRISE_ROLL: u32 = 1;

/// Oracle backed by a mutable set of participant sheets.
///
/// Sheets change during play (damage, healing, tokens deleted), so they sit
/// behind a lock and are read fresh on every query. Dice are rolled with
/// [`PcgRng`] from the session seed and a roll counter, so a seeded session
/// replays the same rolls in the same order.
pub struct RosterOracle {
    sheets: RwLock<HashMap<ParticipantId, ParticipantSheet>>,
    rng: PcgRng,
    session_seed: u64,
    nonce: AtomicU64,
}

impl RosterOracle {
    pub fn new(sheets: impl IntoIterator<Item = ParticipantSheet>, session_seed: u64) -> Self {
        let sheets = sheets
            .into_iter()
            .map(|sheet| (sheet.id.clone(), sheet))
            .collect();
        Self {
            sheets: RwLock::new(sheets),
            rng: PcgRng,
            session_seed,
            nonce: AtomicU64::new(0),
        }
    }

    /// Insert or replace a sheet.
    pub fn upsert(&self, sheet: ParticipantSheet) {
        self.write().insert(sheet.id.clone(), sheet);
    }

    /// Apply `change` to a sheet. Returns false if the id is unknown.
    pub fn update(&self, id: &ParticipantId, change: impl FnOnce(&mut ParticipantSheet)) -> bool {
        match self.write().get_mut(id) {
            Some(sheet) => {
                change(sheet);
                true
            }
            None => false,
        }
    }

    /// Drop a sheet, as when its token is deleted from the table.
    pub fn remove(&self, id: &ParticipantId) -> Option<ParticipantSheet> {
        self.write().remove(id)
    }

    pub fn sheet(&self, id: &ParticipantId) -> Option<ParticipantSheet> {
        self.read().get(id).cloned()
    }

    /// All participant ids, sorted.
    pub fn ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Name to show for a participant, falling back to its id.
    pub fn name_of(&self, id: &ParticipantId) -> String {
        self.display_name(id).unwrap_or_else(|| id.to_string())
    }

    fn roll_d20(&self, id: &ParticipantId, context: u32) -> i32 {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let seed = compute_seed(self.session_seed, nonce, id, context);
        self.rng.roll_d20(seed) as i32
    }

    // Sheet writes are single inserts or field updates; a poisoned lock
    // still holds whole sheets.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ParticipantId, ParticipantSheet>> {
        self.sheets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ParticipantId, ParticipantSheet>> {
        self.sheets.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParticipantOracle for RosterOracle {
    fn status(&self, id: &ParticipantId) -> ParticipantStatus {
        self.read()
            .get(id)
            .map_or(ParticipantStatus::Missing, ParticipantSheet::status)
    }

    fn start_of_turn(&self, id: &ParticipantId) -> Vec<String> {
        self.read()
            .get(id)
            .map(ParticipantSheet::start_of_turn_notices)
            .unwrap_or_default()
    }

    fn display_name(&self, id: &ParticipantId) -> Option<String> {
        self.read().get(id).map(|sheet| sheet.name.clone())
    }
}

impl InitiativeOracle for RosterOracle {
    /// d20 + initiative modifier, with Dexterity as the two-digit tiebreak.
    fn initiative(&self, id: &ParticipantId) -> Option<Priority> {
        let (init, dex) = {
            let sheets = self.read();
            let sheet = sheets.get(id)?;
            (sheet.init, sheet.dex)
        };
        let score = self.roll_d20(id, INITIATIVE_ROLL) + init;
        Some(Priority::new(score, dex))
    }
}

impl SurpriseOracle for RosterOracle {
    /// d20 + Perception against the difficulty; unknown ids are surprised.
    fn is_aware(&self, id: &ParticipantId, difficulty: i32) -> bool {
        let Some(perception) = self.read().get(id).map(|sheet| sheet.perception) else {
            return false;
        };
        self.roll_d20(id, SURPRISE_ROLL) + perception >= difficulty
    }
}
