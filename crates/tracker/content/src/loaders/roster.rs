//! Participant roster loader.
//!
//! A roster is the list of character sheets the runtime's roster oracle
//! rolls initiative and checks status from.

use std::collections::HashSet;
use std::path::Path;

use tracker_core::ParticipantSheet;

use crate::loaders::{LoadResult, read_file};

/// Loader for participant rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<ParticipantSheet>`
    pub fn load(path: &Path) -> LoadResult<Vec<ParticipantSheet>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from RON text, rejecting sheets that share an id.
    pub fn parse(content: &str) -> LoadResult<Vec<ParticipantSheet>> {
        let sheets: Vec<ParticipantSheet> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = HashSet::new();
        for sheet in &sheets {
            if !seen.insert(&sheet.id) {
                anyhow::bail!("Duplicate participant id '{}' in roster", sheet.id);
            }
            if sheet.name.trim().is_empty() {
                anyhow::bail!("Participant '{}' has no name", sheet.id);
            }
        }

        Ok(sheets)
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{CreatureKind, ParticipantStatus};

    use super::*;

    const ROSTER: &str = r#"[
        (
            id: "valeros",
            name: "Valeros",
            init: 2,
            dex: 14,
            con: 14,
            hp: 22,
            hp_max: 22,
        ),
        (
            id: "skeleton",
            name: "Skeleton",
            init: 6,
            dex: 14,
            con: 10,
            perception: 0,
            hp: 4,
            hp_max: 4,
            kind: Undead,
        ),
    ]"#;

    #[test]
    fn parses_sheets_with_defaults() {
        let sheets = RosterLoader::parse(ROSTER).expect("Failed to parse roster");
        assert_eq!(sheets.len(), 2);

        let valeros = &sheets[0];
        assert_eq!(valeros.kind, CreatureKind::Living);
        assert_eq!(valeros.nonlethal, 0);
        assert!(!valeros.stable);
        assert_eq!(valeros.status(), ParticipantStatus::Active);

        assert_eq!(sheets[1].kind, CreatureKind::Undead);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let roster = r#"[
            (id: "a", name: "A", init: 0, dex: 10, con: 10, hp: 5, hp_max: 5),
            (id: "a", name: "B", init: 0, dex: 10, con: 10, hp: 5, hp_max: 5),
        ]"#;
        let err = RosterLoader::parse(roster).expect_err("duplicate ids must fail");
        assert!(err.to_string().contains("Duplicate participant id 'a'"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("roster.ron");
        std::fs::write(&path, ROSTER).expect("Failed to write roster");

        let sheets = RosterLoader::load(&path).expect("Failed to load roster");
        assert_eq!(sheets[0].name, "Valeros");
    }
}
