use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Event, EventId};

/// Immutable, ordered collection of every loaded event.
///
/// The id of an event is its position in load order, so lookups are a plain index.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    events: Vec<Event>,
}

impl RecordStore {
    /// Takes ownership of the loader's records and renumbers them by position.
    /// Fails when there are more records than `u32` ids.
    pub fn new(records: Vec<Event>) -> Result<Self> {
        let events = records
            .into_iter()
            .enumerate()
            .map(|(pos, mut event)| {
                event.id = EventId::from_position(pos).ok_or_else(|| Error::new(
                    ErrorKind::InvalidArgument,
                    format!("event at position {} exceeds the id space", pos),
                ))?;
                Ok(event)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RecordStore { events })
    }

    /// Parse a JSON array of events handed over by a loader
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Event> = serde_json::from_str(json)?;
        RecordStore::new(records)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events.iter().map(|event| event.id)
    }

    /// Materialize ids into events, skipping any id the store does not hold
    pub fn resolve<'a>(&'a self, ids: &[EventId]) -> Vec<&'a Event> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }
}
