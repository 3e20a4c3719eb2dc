//! RNG oracle for reproducible dice rolls.
//!
//! Initiative and surprise checks are rolled outside the engine, but they are
//! rolled through this trait so a session seed replays the same encounter.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value.

use crate::state::ParticipantId;

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }

    /// Roll a d20, the die behind initiative and perception checks.
    fn roll_d20(&self, seed: u64) -> u32 {
        self.roll_die(seed, 20)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - **Deterministic**: Same seed always produces same output
/// - **Small state**: Only 64 bits
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one roll.
///
/// * `session_seed` - seed fixed for the whole encounter
/// * `nonce` - roll counter, increments with every roll
/// * `participant` - who is rolling
/// * `context` - distinguishes roll types (0 = initiative, 1 = surprise)
pub fn compute_seed(session_seed: u64, nonce: u64, participant: &ParticipantId, context: u32) -> u64 {
    // FNV-1a over the host id; ids are strings, not dense integers.
    let id_hash = participant
        .as_str()
        .bytes()
        .fold(0xcbf29ce484222325u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x100000001b3)
        });

    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= id_hash.wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step (SplitMix64 finalizer)
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d20_stays_in_range() {
        let rng = PcgRng;
        let id = ParticipantId::new("goblin");
        for nonce in 0..500 {
            let roll = rng.roll_d20(compute_seed(42, nonce, &id, 0));
            assert!((1..=20).contains(&roll));
        }
    }

    #[test]
    fn seeds_differ_per_participant_and_context() {
        let a = ParticipantId::new("a");
        let b = ParticipantId::new("b");
        assert_eq!(compute_seed(7, 1, &a, 0), compute_seed(7, 1, &a, 0));
        assert_ne!(compute_seed(7, 1, &a, 0), compute_seed(7, 1, &b, 0));
        assert_ne!(compute_seed(7, 1, &a, 0), compute_seed(7, 1, &a, 1));
    }

    #[test]
    fn zero_sided_die_rolls_zero() {
        assert_eq!(PcgRng.roll_die(1, 0), 0);
    }
}
