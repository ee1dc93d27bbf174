use std::sync::Arc;
use tracing::debug;
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::history::History;
use crate::core::selection::Selection;
use crate::core::stats::EngineStats;
use crate::core::store::RecordStore;
use crate::core::types::{Event, EventId};
use crate::index::field_index::FieldIndices;
use crate::query::cache::QueryCache;
use crate::query::matcher::compile;
use crate::schema::schema::Field;
use crate::search::sort::{sort_events, SortKey, SortOrder};
use crate::search::topk::top_k;

/// One exploration session over a loaded dataset.
///
/// Store and indices are shared read-only; the selection and its history belong
/// to this value alone. Every operation either replaces the selection and records
/// the previous one, or fails and leaves both untouched.
pub struct Engine {
    config: EngineConfig,
    store: Arc<RecordStore>,
    indices: Arc<FieldIndices>,
    selection: Selection,
    history: History,
    query_cache: QueryCache,
}

impl Engine {
    pub fn load(records: Vec<Event>) -> Result<Self> {
        Self::with_config(records, EngineConfig::default())
    }

    pub fn with_config(records: Vec<Event>, config: EngineConfig) -> Result<Self> {
        let store = Arc::new(RecordStore::new(records)?);
        let indices = Arc::new(FieldIndices::build(&store));
        Ok(Self::from_shared(store, indices, config))
    }

    /// Start a fresh session over a store and indices built elsewhere
    pub fn from_shared(store: Arc<RecordStore>, indices: Arc<FieldIndices>, config: EngineConfig) -> Self {
        debug!(
            events = store.len(),
            countries = indices.by_country.len(),
            types = indices.by_type.len(),
            "engine loaded"
        );
        Engine {
            selection: Selection::all(store.len()),
            history: History::new(config.history_limit),
            query_cache: QueryCache::new(config.query_cache_size),
            config,
            store,
            indices,
        }
    }

    fn commit(&mut self, label: String, next: Selection) -> &Selection {
        let before = std::mem::replace(&mut self.selection, next);
        debug!(
            command = %label,
            before = before.len(),
            after = self.selection.len(),
            "selection updated"
        );
        self.history.record(&label, before);
        &self.selection
    }

    /// Narrow to events whose categorical `field` equals `value` exactly
    pub fn filter_equals(&mut self, field: &str, value: &str) -> Result<&Selection> {
        let resolved = Field::from_name(field)
            .ok_or_else(|| Error::filter(format!("unknown field '{}'", field.trim())))?;
        let matching = self.indices.lookup(resolved, value)?;
        let next = self.selection.intersect(&matching);
        Ok(self.commit(format!("filter {} {:?}", resolved, value), next))
    }

    /// Narrow to events with `low <= start_year <= high`
    pub fn filter_year_range(&mut self, low: i32, high: i32) -> Result<&Selection> {
        if low > high {
            return Err(Error::filter(format!(
                "year range is empty: {} is after {}", low, high
            )));
        }
        let matching = self.indices.year_range(low, high);
        let next = self.selection.intersect(&matching);
        Ok(self.commit(format!("filter year {} {}", low, high), next))
    }

    /// Narrow to events matching a boolean expression, e.g.
    /// `country == 'India' and start_year >= 2000`
    pub fn query(&mut self, expression: &str) -> Result<&Selection> {
        let expr = self.query_cache.get_or_parse(expression)?;
        let compiled = compile(&expr)?;

        let ids: Vec<EventId> = self.selection
            .ids()
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|event| compiled.matches(event)))
            .collect();

        Ok(self.commit(format!("where {}", expression.trim()), Selection::from_ids(ids)))
    }

    /// Reorder the selection by `field` and return it as events
    pub fn sort(&mut self, field: &str, order: SortOrder) -> Result<Vec<&Event>> {
        let key = SortKey::from_name(field)?;
        let ids: Vec<EventId> = {
            let mut events = self.store.resolve(self.selection.ids());
            sort_events(&mut events, key, order);
            events.iter().map(|e| e.id).collect()
        };

        let next = Selection::from_ids(ids);
        if self.config.record_sort_in_history {
            self.commit(format!("sort {} {}", key, order), next);
        } else {
            debug!(key = %key, order = %order, "selection reordered");
            self.selection = next;
        }
        Ok(self.events())
    }

    /// The `k` selected events with the largest numeric `field`, best first.
    /// Events with a blank value are skipped. The selection is not changed.
    pub fn topk(&self, field: &str, k: usize) -> Result<Vec<&Event>> {
        let resolved = Field::from_name(field)
            .ok_or_else(|| Error::filter(format!("unknown field '{}'", field.trim())))?;
        if !resolved.is_numeric() {
            return Err(Error::filter(format!("top-k needs a numeric field, '{}' is text", resolved)));
        }

        let candidates = self.selection.ids().iter().filter_map(|id| self.store.get(*id));
        let top = top_k(candidates, resolved, k);
        Ok(top.iter().filter_map(|c| self.store.get(c.id)).collect())
    }

    /// Back to the full dataset; undoable like any filter
    pub fn reset(&mut self) -> &Selection {
        let all = Selection::all(self.store.len());
        self.commit("reset".to_string(), all)
    }

    pub fn undo(&mut self) -> Result<&Selection> {
        let entry = self.history
            .undo(&self.selection)
            .ok_or_else(|| Error::history("nothing to undo"))?;
        debug!(command = %entry.label, size = entry.snapshot.len(), "undo");
        self.selection = entry.snapshot;
        Ok(&self.selection)
    }

    pub fn redo(&mut self) -> Result<&Selection> {
        let entry = self.history
            .redo(&self.selection)
            .ok_or_else(|| Error::history("nothing to redo"))?;
        debug!(command = %entry.label, size = entry.snapshot.len(), "redo");
        self.selection = entry.snapshot;
        Ok(&self.selection)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected events in selection order, for report and export collaborators
    pub fn events(&self) -> Vec<&Event> {
        self.store.resolve(self.selection.ids())
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn indices(&self) -> &Arc<FieldIndices> {
        &self.indices
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Labels of the commands that can be undone, oldest first
    pub fn history(&self) -> Vec<&str> {
        self.history.labels()
    }

    /// Distinct values of a categorical field, optionally by case-insensitive prefix
    pub fn values(&self, field: &str, prefix: &str) -> Result<Vec<&str>> {
        let resolved = Field::from_name(field)
            .ok_or_else(|| Error::filter(format!("unknown field '{}'", field.trim())))?;
        self.indices.values(resolved, prefix)
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_events: self.store.len(),
            countries: self.indices.by_country.len(),
            disaster_types: self.indices.by_type.len(),
            distinct_years: self.indices.years.chunk_by(|a, b| a.0 == b.0).count(),
            year_bounds: self.indices.year_bounds(),
            selected: self.selection.len(),
            undo_depth: self.history.labels().len(),
            can_redo: self.history.can_redo(),
            cache_stats: self.query_cache.stats(),
        }
    }
}
