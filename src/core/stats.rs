use serde::{Serialize, Deserialize};
use crate::query::cache::CacheStats;

/// Engine statistics for the `stats` view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    // Dataset
    pub total_events: usize,
    pub countries: usize,
    pub disaster_types: usize,
    pub distinct_years: usize,
    pub year_bounds: Option<(i32, i32)>,

    // Session
    pub selected: usize,
    pub undo_depth: usize,
    pub can_redo: bool,

    // Query metrics
    pub cache_stats: CacheStats,
}
