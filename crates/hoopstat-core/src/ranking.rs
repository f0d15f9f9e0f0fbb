// Leaderboards: top-N player-season rows for a single metric.

use crate::metrics::{MetricField, MetricsTable, PlayerSeasonMetrics};

/// Default leaderboard length.
pub const DEFAULT_TOP_N: usize = 100;

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player: String,
    pub season: String,
    pub value: f64,
}

/// Rows ordered by `field`, highest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub field: MetricField,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Row indices ordered by `field` descending.
///
/// Indices are stably sorted ascending and then reversed, so among equal
/// values the row that comes later in the source is listed first.
pub fn descending_order(rows: &[PlayerSeasonMetrics], field: MetricField) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        field
            .value(&rows[a])
            .partial_cmp(&field.value(&rows[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.reverse();
    order
}

/// The top `n` rows of `metrics` by `field`. Returns every row when `n`
/// exceeds the table length.
pub fn top_n(metrics: &MetricsTable, field: MetricField, n: usize) -> Leaderboard {
    let rows = metrics.rows();
    let entries = descending_order(rows, field)
        .into_iter()
        .take(n)
        .map(|i| {
            let row = &rows[i];
            LeaderboardEntry {
                player: row.player.clone(),
                season: row.season.clone(),
                value: field.value(row),
            }
        })
        .collect();
    Leaderboard { field, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, fg_acc: f64) -> PlayerSeasonMetrics {
        PlayerSeasonMetrics {
            player: player.into(),
            season: "2020-21".into(),
            gp: 10.0,
            min: 100.0,
            fg_acc,
            tp_acc: 0.0,
            ft_acc: 0.0,
            pts_per_min: 0.0,
            pts_per_game: 0.0,
            overall_acc: 0.0,
            blk_per_game: 0.0,
            stl_per_game: 0.0,
        }
    }

    fn table(values: &[(&str, f64)]) -> MetricsTable {
        MetricsTable::new(values.iter().map(|(p, v)| row(p, *v)).collect())
    }

    fn players(board: &Leaderboard) -> Vec<&str> {
        board.entries.iter().map(|e| e.player.as_str()).collect()
    }

    #[test]
    fn sorted_descending() {
        let metrics = table(&[("a", 0.3), ("b", 0.9), ("c", 0.5)]);
        let board = top_n(&metrics, MetricField::FieldGoalAccuracy, 10);
        assert_eq!(players(&board), vec!["b", "c", "a"]);
        assert!((board.entries[0].value - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn truncates_to_n() {
        let metrics = table(&[("a", 0.3), ("b", 0.9), ("c", 0.5), ("d", 0.1)]);
        let board = top_n(&metrics, MetricField::FieldGoalAccuracy, 2);
        assert_eq!(board.len(), 2);
        assert_eq!(players(&board), vec!["b", "c"]);
    }

    #[test]
    fn ties_list_later_source_rows_first() {
        let metrics = table(&[("first", 0.5), ("top", 0.8), ("second", 0.5), ("third", 0.5)]);
        let board = top_n(&metrics, MetricField::FieldGoalAccuracy, 10);
        assert_eq!(players(&board), vec!["top", "third", "second", "first"]);
    }

    #[test]
    fn large_n_is_a_permutation_of_all_rows() {
        let metrics = table(&[("a", 0.3), ("b", 0.9), ("c", 0.5)]);
        let board = top_n(&metrics, MetricField::FieldGoalAccuracy, DEFAULT_TOP_N);
        assert_eq!(board.len(), metrics.len());
        let mut seen = players(&board);
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn zero_n_and_empty_table() {
        let metrics = table(&[("a", 0.3)]);
        assert!(top_n(&metrics, MetricField::FieldGoalAccuracy, 0).is_empty());
        assert!(top_n(&MetricsTable::default(), MetricField::PointsPerGame, 5).is_empty());
    }

    #[test]
    fn leaderboard_carries_field_values() {
        let metrics = table(&[("a", 0.3)]);
        let board = top_n(&metrics, MetricField::GamesPlayed, 1);
        assert_eq!(board.field, MetricField::GamesPlayed);
        assert!((board.entries[0].value - 10.0).abs() < f64::EPSILON);
    }
}
