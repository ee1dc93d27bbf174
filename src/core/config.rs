use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub history_limit: usize,          // Max undo snapshots kept, 0 = unbounded
    pub query_cache_size: usize,       // Parsed expressions kept, 0 = no cache
    pub record_sort_in_history: bool,  // Sort is undoable like a filter
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_limit: 100,
            query_cache_size: 64,
            record_sort_in_history: true,
        }
    }
}
