// Player-season efficiency metrics: tolerant CSV loading, header resolution,
// metric computation, leaderboards and TSV export.

pub mod columns;
pub mod error;
pub mod export;
pub mod metrics;
pub mod pipeline;
pub mod ranking;
pub mod table;

pub use error::{Result, StatsError};
