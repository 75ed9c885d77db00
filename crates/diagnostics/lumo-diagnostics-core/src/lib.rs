//! Lumo diagnostics core
//!
//! Render cost tracking for composition players: named segments, running
//! means and a slowest-first report.

pub mod aggregator;
pub mod running_stat;

pub use aggregator::{FrameListenerId, StatsAggregator, FRAME_SEGMENT};
pub use running_stat::RunningStat;
