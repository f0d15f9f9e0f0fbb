// Metric engine: per player-season efficiency rates derived from raw counts.
//
// Every numeric input is coerced tolerantly (empty or malformed text is 0.0)
// and every ratio goes through `safe_divide`, so output values are always
// finite. Row order follows the source table; nothing is aggregated.

use crate::columns::{ColumnMap, StatField};
use crate::table::RawTable;
use tracing::info;

// ---------------------------------------------------------------------------
// Numeric primitives
// ---------------------------------------------------------------------------

/// Parse a cell as `f64`, yielding 0.0 for empty, malformed or non-finite text.
pub fn parse_number_or_zero(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// `numer / denom`, or 0.0 when the denominator is zero or the quotient is not finite.
pub fn safe_ratio(numer: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        return 0.0;
    }
    let ratio = numer / denom;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Element-wise `safe_ratio` over two equal-length slices.
pub fn safe_divide(numer: &[f64], denom: &[f64]) -> Vec<f64> {
    debug_assert_eq!(numer.len(), denom.len());
    numer
        .iter()
        .zip(denom)
        .map(|(&n, &d)| safe_ratio(n, d))
        .collect()
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// Derived metrics for one player-season row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeasonMetrics {
    pub player: String,
    pub season: String,
    pub gp: f64,
    pub min: f64,
    pub fg_acc: f64,
    pub tp_acc: f64,
    pub ft_acc: f64,
    pub pts_per_min: f64,
    pub pts_per_game: f64,
    pub overall_acc: f64,
    pub blk_per_game: f64,
    pub stl_per_game: f64,
}

/// All metric rows, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    rows: Vec<PlayerSeasonMetrics>,
}

impl MetricsTable {
    pub fn new(rows: Vec<PlayerSeasonMetrics>) -> Self {
        MetricsTable { rows }
    }

    pub fn rows(&self) -> &[PlayerSeasonMetrics] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Ranking fields
// ---------------------------------------------------------------------------

/// A numeric column of `MetricsTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    GamesPlayed,
    Minutes,
    FieldGoalAccuracy,
    ThreePointAccuracy,
    FreeThrowAccuracy,
    PointsPerMinute,
    PointsPerGame,
    OverallAccuracy,
    BlocksPerGame,
    StealsPerGame,
}

impl MetricField {
    /// Numeric output columns, in output order.
    pub const ALL: [MetricField; 10] = [
        MetricField::GamesPlayed,
        MetricField::Minutes,
        MetricField::FieldGoalAccuracy,
        MetricField::ThreePointAccuracy,
        MetricField::FreeThrowAccuracy,
        MetricField::PointsPerMinute,
        MetricField::PointsPerGame,
        MetricField::OverallAccuracy,
        MetricField::BlocksPerGame,
        MetricField::StealsPerGame,
    ];

    /// Column name in exported tables.
    pub fn column_name(self) -> &'static str {
        match self {
            MetricField::GamesPlayed => "gp",
            MetricField::Minutes => "min",
            MetricField::FieldGoalAccuracy => "fg_acc",
            MetricField::ThreePointAccuracy => "tp_acc",
            MetricField::FreeThrowAccuracy => "ft_acc",
            MetricField::PointsPerMinute => "pts_per_min",
            MetricField::PointsPerGame => "pts_per_game",
            MetricField::OverallAccuracy => "overall_acc",
            MetricField::BlocksPerGame => "blk_per_game",
            MetricField::StealsPerGame => "stl_per_game",
        }
    }

    pub fn value(self, row: &PlayerSeasonMetrics) -> f64 {
        match self {
            MetricField::GamesPlayed => row.gp,
            MetricField::Minutes => row.min,
            MetricField::FieldGoalAccuracy => row.fg_acc,
            MetricField::ThreePointAccuracy => row.tp_acc,
            MetricField::FreeThrowAccuracy => row.ft_acc,
            MetricField::PointsPerMinute => row.pts_per_min,
            MetricField::PointsPerGame => row.pts_per_game,
            MetricField::OverallAccuracy => row.overall_acc,
            MetricField::BlocksPerGame => row.blk_per_game,
            MetricField::StealsPerGame => row.stl_per_game,
        }
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

fn text_column(table: &RawTable, columns: &ColumnMap, field: StatField) -> Vec<String> {
    table
        .column_at(columns.position(field))
        .map(<[String]>::to_vec)
        .unwrap_or_else(|| vec![String::new(); table.row_count()])
}

fn numeric_column(table: &RawTable, columns: &ColumnMap, field: StatField) -> Vec<f64> {
    match table.column_at(columns.position(field)) {
        Some(cells) => cells.iter().map(|c| parse_number_or_zero(c)).collect(),
        None => vec![0.0; table.row_count()],
    }
}

fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Compute the metrics table from a loaded table and its resolved columns.
pub fn compute(table: &RawTable, columns: &ColumnMap) -> MetricsTable {
    let season = text_column(table, columns, StatField::Season);
    let player = text_column(table, columns, StatField::Player);

    let gp = numeric_column(table, columns, StatField::GamesPlayed);
    let mins = numeric_column(table, columns, StatField::Minutes);
    let fgm = numeric_column(table, columns, StatField::FieldGoalsMade);
    let fga = numeric_column(table, columns, StatField::FieldGoalsAttempted);
    let pm3 = numeric_column(table, columns, StatField::ThreePointersMade);
    let pa3 = numeric_column(table, columns, StatField::ThreePointersAttempted);
    let ftm = numeric_column(table, columns, StatField::FreeThrowsMade);
    let fta = numeric_column(table, columns, StatField::FreeThrowsAttempted);
    let pts = numeric_column(table, columns, StatField::Points);
    let blk = numeric_column(table, columns, StatField::Blocks);
    let stl = numeric_column(table, columns, StatField::Steals);

    let fg_acc = safe_divide(&fgm, &fga);
    let tp_acc = safe_divide(&pm3, &pa3);
    let ft_acc = safe_divide(&ftm, &fta);
    let pts_per_min = safe_divide(&pts, &mins);
    let pts_per_game = safe_divide(&pts, &gp);
    // (FGM + FTM) / (FGA + FTA)
    let overall_acc = safe_divide(&add(&fgm, &ftm), &add(&fga, &fta));
    let blk_per_game = safe_divide(&blk, &gp);
    let stl_per_game = safe_divide(&stl, &gp);

    let rows: Vec<PlayerSeasonMetrics> = player
        .into_iter()
        .zip(season)
        .enumerate()
        .map(|(i, (player, season))| PlayerSeasonMetrics {
            player,
            season,
            gp: gp[i],
            min: mins[i],
            fg_acc: fg_acc[i],
            tp_acc: tp_acc[i],
            ft_acc: ft_acc[i],
            pts_per_min: pts_per_min[i],
            pts_per_game: pts_per_game[i],
            overall_acc: overall_acc[i],
            blk_per_game: blk_per_game[i],
            stl_per_game: stl_per_game[i],
        })
        .collect();

    info!(rows = rows.len(), "computed player-season metrics");
    MetricsTable::new(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
