// TSV export of the metrics table and the fixed leaderboard set.
//
// Numbers are written with six decimals, text exactly as it appears in the
// source (no quoting or escaping).

use crate::error::{Result, StatsError};
use crate::metrics::{MetricField, MetricsTable};
use crate::ranking::{top_n, Leaderboard, DEFAULT_TOP_N};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const METRICS_FILE: &str = "metrics_by_player_season.tsv";

/// Leaderboards written by `export_all`, as (file name, ranking field).
pub const LEADERBOARD_EXPORTS: [(&str, MetricField); 7] = [
    ("top100_fg_accuracy.tsv", MetricField::FieldGoalAccuracy),
    ("top100_3pt_accuracy.tsv", MetricField::ThreePointAccuracy),
    ("top100_ft_accuracy.tsv", MetricField::FreeThrowAccuracy),
    ("top100_points_per_game.tsv", MetricField::PointsPerGame),
    ("top100_overall_accuracy.tsv", MetricField::OverallAccuracy),
    ("top100_blocks_per_game.tsv", MetricField::BlocksPerGame),
    ("top100_steals_per_game.tsv", MetricField::StealsPerGame),
];

/// What `export_all` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub rows: usize,
}

fn format_number(value: f64) -> String {
    format!("{value:.6}")
}

// ---------------------------------------------------------------------------
// Writer-based serialization
// ---------------------------------------------------------------------------

fn tsv_writer<W: Write>(wtr: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(wtr)
}

/// Serialize the full metrics table.
pub fn write_metrics<W: Write>(wtr: W, metrics: &MetricsTable) -> std::result::Result<(), csv::Error> {
    let mut out = tsv_writer(wtr);

    let mut header = vec!["player", "season"];
    header.extend(MetricField::ALL.iter().map(|f| f.column_name()));
    out.write_record(&header)?;

    for row in metrics.rows() {
        let mut record = vec![row.player.clone(), row.season.clone()];
        record.extend(MetricField::ALL.iter().map(|f| format_number(f.value(row))));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// Serialize a leaderboard as player, season and the ranked metric.
pub fn write_leaderboard<W: Write>(
    wtr: W,
    board: &Leaderboard,
) -> std::result::Result<(), csv::Error> {
    let mut out = tsv_writer(wtr);
    out.write_record(["player", "season", board.field.column_name()])?;
    for entry in &board.entries {
        out.write_record([
            entry.player.as_str(),
            entry.season.as_str(),
            format_number(entry.value).as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Path-based export
// ---------------------------------------------------------------------------

fn write_file<F>(path: &Path, serialize: F) -> Result<()>
where
    F: FnOnce(&mut Vec<u8>) -> std::result::Result<(), csv::Error>,
{
    let mut buf = Vec::new();
    serialize(&mut buf).map_err(|e| StatsError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, &buf).map_err(|e| StatsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = buf.len(), "wrote table");
    Ok(())
}

/// Write the metrics table and every leaderboard in `LEADERBOARD_EXPORTS`
/// into `out_dir`, creating it if needed and overwriting existing files.
pub fn export_all(metrics: &MetricsTable, out_dir: &Path) -> Result<ExportSummary> {
    std::fs::create_dir_all(out_dir).map_err(|e| StatsError::Io {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::with_capacity(LEADERBOARD_EXPORTS.len() + 1);

    let metrics_path = out_dir.join(METRICS_FILE);
    write_file(&metrics_path, |buf| write_metrics(buf, metrics))?;
    files.push(metrics_path);

    for (file_name, field) in LEADERBOARD_EXPORTS {
        let board = top_n(metrics, field, DEFAULT_TOP_N);
        let path = out_dir.join(file_name);
        write_file(&path, |buf| write_leaderboard(buf, &board))?;
        files.push(path);
    }

    info!(
        dir = %out_dir.display(),
        files = files.len(),
        rows = metrics.len(),
        "exported metrics"
    );

    Ok(ExportSummary {
        output_dir: out_dir.to_path_buf(),
        files,
        rows: metrics.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PlayerSeasonMetrics;
    use crate::ranking::LeaderboardEntry;

    fn sample() -> MetricsTable {
        MetricsTable::new(vec![PlayerSeasonMetrics {
            player: "J. Doe".into(),
            season: "2020-21".into(),
            gp: 10.0,
            min: 200.0,
            fg_acc: 0.5,
            tp_acc: 1.0 / 3.0,
            ft_acc: 0.8,
            pts_per_min: 0.55,
            pts_per_game: 11.0,
            overall_acc: 60.0 / 105.0,
            blk_per_game: 0.5,
            stl_per_game: 0.8,
        }])
    }

    #[test]
    fn metrics_table_tsv_layout() {
        let mut buf = Vec::new();
        write_metrics(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "player\tseason\tgp\tmin\tfg_acc\ttp_acc\tft_acc\tpts_per_min\tpts_per_game\toverall_acc\tblk_per_game\tstl_per_game\n\
             J. Doe\t2020-21\t10.000000\t200.000000\t0.500000\t0.333333\t0.800000\t0.550000\t11.000000\t0.571429\t0.500000\t0.800000\n"
        );
    }

    #[test]
    fn empty_table_writes_header_only() {
        let mut buf = Vec::new();
        write_metrics(&mut buf, &MetricsTable::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("player\tseason\tgp"));
    }

    #[test]
    fn leaderboard_tsv_layout() {
        let board = Leaderboard {
            field: MetricField::PointsPerGame,
            entries: vec![LeaderboardEntry {
                player: "J. Doe".into(),
                season: "2020-21".into(),
                value: 11.0,
            }],
        };
        let mut buf = Vec::new();
        write_leaderboard(&mut buf, &board).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "player\tseason\tpts_per_game\nJ. Doe\t2020-21\t11.000000\n"
        );
    }

    #[test]
    fn text_with_quotes_is_written_unchanged() {
        let board = Leaderboard {
            field: MetricField::BlocksPerGame,
            entries: vec![LeaderboardEntry {
                player: "Ron \"Metta\" Artest".into(),
                season: "2004-05".into(),
                value: 1.0,
            }],
        };
        let mut buf = Vec::new();
        write_leaderboard(&mut buf, &board).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "player\tseason\tblk_per_game\nRon \"Metta\" Artest\t2004-05\t1.000000\n"
        );
    }

    #[test]
    fn unwritable_output_file_is_an_io_error() {
        let dir = std::env::temp_dir().join("hoopstat_export_unwritable");
        let _ = std::fs::remove_dir_all(&dir);
        // A directory squatting on the output file name makes the write fail.
        std::fs::create_dir_all(dir.join(METRICS_FILE)).unwrap();

        let err = export_all(&sample(), &dir).unwrap_err();
        match err {
            StatsError::Io { path, .. } => assert_eq!(path, dir.join(METRICS_FILE)),
            other => panic!("expected Io, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn leaderboard_file_names_are_unique() {
        let mut names: Vec<&str> = LEADERBOARD_EXPORTS.iter().map(|(n, _)| *n).collect();
        names.push(METRICS_FILE);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), LEADERBOARD_EXPORTS.len() + 1);
    }
}
