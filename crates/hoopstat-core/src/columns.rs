// Column resolution: map logical stat fields onto the labels a source file
// actually uses.
//
// Labels are compared in normalized form (trimmed, lower-cased, whitespace
// runs collapsed to `_`). Each candidate is tried under four rules before
// moving to the next candidate:
//   1. exact normalized match
//   2. match with the marker prefix `f` (tools that rewrite identifiers
//      starting with a digit, e.g. `3PM` -> `f3PM`)
//   3. match after replacing `%` with `pct`
//   4. rule 3 with the marker prefix

use crate::error::{Result, StatsError};
use crate::table::RawTable;
use std::collections::HashMap;
use tracing::error;

/// Prefix some exporters put in front of labels that are not valid identifiers.
const MARKER_PREFIX: &str = "f";

/// Normalize a label or candidate for tolerant comparison.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Label lookup
// ---------------------------------------------------------------------------

/// Precomputed normalized-label -> header position lookup.
///
/// When two labels normalize to the same key, the first one in header order wins.
#[derive(Debug, Clone)]
pub struct LabelLookup<'a> {
    labels: &'a [String],
    by_normalized: HashMap<String, usize>,
}

impl<'a> LabelLookup<'a> {
    pub fn new(labels: &'a [String]) -> Self {
        let mut by_normalized = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            by_normalized.entry(normalize_label(label)).or_insert(position);
        }
        LabelLookup {
            labels,
            by_normalized,
        }
    }

    /// Header position of the first candidate that matches under any rule.
    pub fn position_of(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|candidate| {
            let key = normalize_label(candidate);
            let pct = key.replace('%', "pct");
            [
                key.clone(),
                format!("{MARKER_PREFIX}{key}"),
                pct.clone(),
                format!("{MARKER_PREFIX}{pct}"),
            ]
            .iter()
            .find_map(|variant| self.by_normalized.get(variant).copied())
        })
    }

    /// Actual header label for the first matching candidate.
    pub fn resolve(&self, candidates: &[&str]) -> Option<&'a str> {
        self.position_of(candidates)
            .map(|position| self.labels[position].as_str())
    }
}

/// Resolve `candidates` against `labels`, returning the label as it appears
/// in the header. `field` names the quantity in the `MissingColumn` error.
pub fn resolve(labels: &[String], field: &'static str, candidates: &[&str]) -> Result<String> {
    LabelLookup::new(labels)
        .resolve(candidates)
        .map(str::to_string)
        .ok_or_else(|| missing(labels, field, candidates))
}

fn missing(labels: &[String], field: &'static str, candidates: &[&str]) -> StatsError {
    error!(available = %labels.join(", "), "available columns in source");
    StatsError::MissingColumn {
        field,
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Logical fields
// ---------------------------------------------------------------------------

/// Every raw column the metric engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Season,
    Player,
    GamesPlayed,
    Minutes,
    FieldGoalsMade,
    FieldGoalsAttempted,
    ThreePointersMade,
    ThreePointersAttempted,
    FreeThrowsMade,
    FreeThrowsAttempted,
    Points,
    Blocks,
    Steals,
}

impl StatField {
    /// Resolution order.
    pub const ALL: [StatField; 13] = [
        StatField::Season,
        StatField::Player,
        StatField::GamesPlayed,
        StatField::Minutes,
        StatField::FieldGoalsMade,
        StatField::FieldGoalsAttempted,
        StatField::ThreePointersMade,
        StatField::ThreePointersAttempted,
        StatField::FreeThrowsMade,
        StatField::FreeThrowsAttempted,
        StatField::Points,
        StatField::Blocks,
        StatField::Steals,
    ];

    /// Accepted header names, most common first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            StatField::Season => &["Season"],
            StatField::Player => &["Player"],
            StatField::GamesPlayed => &["GP"],
            StatField::Minutes => &["MIN"],
            StatField::FieldGoalsMade => &["FGM"],
            StatField::FieldGoalsAttempted => &["FGA"],
            StatField::ThreePointersMade => &["3PM", "FG3M", "3PM_per_game"],
            StatField::ThreePointersAttempted => &["3PA", "FG3A", "3PA_per_game"],
            StatField::FreeThrowsMade => &["FTM"],
            StatField::FreeThrowsAttempted => &["FTA"],
            StatField::Points => &["PTS"],
            StatField::Blocks => &["BLK"],
            StatField::Steals => &["STL"],
        }
    }

    /// Human-readable name used in diagnostics.
    pub fn description(self) -> &'static str {
        match self {
            StatField::Season => "season",
            StatField::Player => "player",
            StatField::GamesPlayed => "games played",
            StatField::Minutes => "minutes",
            StatField::FieldGoalsMade => "field-goal makes",
            StatField::FieldGoalsAttempted => "field-goal attempts",
            StatField::ThreePointersMade => "three-point makes",
            StatField::ThreePointersAttempted => "three-point attempts",
            StatField::FreeThrowsMade => "free-throw makes",
            StatField::FreeThrowsAttempted => "free-throw attempts",
            StatField::Points => "points",
            StatField::Blocks => "blocks",
            StatField::Steals => "steals",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved column map
// ---------------------------------------------------------------------------

/// Header position of every `StatField`, resolved once per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: HashMap<StatField, usize>,
}

impl ColumnMap {
    /// Resolve every field against the table header. Fails on the first field
    /// with no matching column, after logging the available labels.
    pub fn resolve(table: &RawTable) -> Result<Self> {
        let lookup = LabelLookup::new(table.labels());
        let mut positions = HashMap::with_capacity(StatField::ALL.len());

        for field in StatField::ALL {
            let position = lookup
                .position_of(field.candidates())
                .ok_or_else(|| missing(table.labels(), field.description(), field.candidates()))?;
            positions.insert(field, position);
        }

        Ok(ColumnMap { positions })
    }

    pub fn position(&self, field: StatField) -> usize {
        self.positions[&field]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::load_table_from_reader;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize_label("  Player   Name "), "player_name");
        assert_eq!(normalize_label("PLAYER_NAME"), "player_name");
        assert_eq!(normalize_label("3PM"), "3pm");
    }

    #[test]
    fn case_and_whitespace_variants_resolve() {
        for header in ["Player Name", "player_name", "PLAYER_NAME"] {
            let found = resolve(&labels(&["GP", header]), "player", &["Player Name"]).unwrap();
            assert_eq!(found, header);
        }
    }

    #[test]
    fn marker_prefixed_label_resolves() {
        let found = resolve(&labels(&["f3PM", "PTS"]), "three-point makes", &["3PM"]).unwrap();
        assert_eq!(found, "f3PM");
    }

    #[test]
    fn percent_becomes_pct() {
        let found = resolve(&labels(&["FGpct"]), "field-goal percentage", &["FG%"]).unwrap();
        assert_eq!(found, "FGpct");
    }

    #[test]
    fn marker_prefixed_pct_resolves() {
        let found = resolve(&labels(&["f3Ppct"]), "three-point percentage", &["3P%"]).unwrap();
        assert_eq!(found, "f3Ppct");
    }

    #[test]
    fn later_candidate_used_when_first_absent() {
        let found = resolve(
            &labels(&["FG3M", "FG3A"]),
            "three-point makes",
            &["3PM", "FG3M", "3PM_per_game"],
        )
        .unwrap();
        assert_eq!(found, "FG3M");
    }

    #[test]
    fn exact_match_beats_prefixed_match_of_same_candidate() {
        let found = resolve(&labels(&["f3PM", "3PM"]), "three-point makes", &["3PM"]).unwrap();
        assert_eq!(found, "3PM");
    }

    #[test]
    fn first_duplicate_label_wins() {
        let lookup_labels = labels(&["Player Name", "player_name"]);
        let lookup = LabelLookup::new(&lookup_labels);
        assert_eq!(lookup.position_of(&["player name"]), Some(0));
    }

    #[test]
    fn unresolved_candidates_are_reported() {
        let err = resolve(&labels(&["Player", "PTS"]), "three-point attempts", &["3PA", "FG3A"])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required column for three-point attempts; tried candidates: 3PA, FG3A"
        );
        match err {
            StatsError::MissingColumn { field, candidates } => {
                assert_eq!(field, "three-point attempts");
                assert_eq!(candidates, vec!["3PA", "FG3A"]);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn column_map_resolves_full_header() {
        let data = "Player,Season,GP,MIN,FGM,FGA,f3PM,FG3A,FTM,FTA,PTS,BLK,STL\n";
        let (table, _) = load_table_from_reader(data.as_bytes(), b',').unwrap();
        let map = ColumnMap::resolve(&table).unwrap();
        assert_eq!(map.position(StatField::Player), 0);
        assert_eq!(map.position(StatField::Season), 1);
        assert_eq!(table.labels()[map.position(StatField::ThreePointersMade)], "f3PM");
        assert_eq!(table.labels()[map.position(StatField::ThreePointersAttempted)], "FG3A");
        assert_eq!(map.position(StatField::Steals), 12);
    }

    #[test]
    fn column_map_fails_without_three_point_columns() {
        let data = "Player,Season,GP,MIN,FGM,FGA,FTM,FTA,PTS,BLK,STL\n";
        let (table, _) = load_table_from_reader(data.as_bytes(), b',').unwrap();
        let err = ColumnMap::resolve(&table).unwrap_err();
        match err {
            StatsError::MissingColumn { field, candidates } => {
                assert_eq!(field, "three-point makes");
                assert_eq!(candidates, vec!["3PM", "FG3M", "3PM_per_game"]);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
