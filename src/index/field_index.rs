use std::collections::HashMap;
use roaring::RoaringBitmap;
use crate::core::error::{Error, Result};
use crate::core::store::RecordStore;
use crate::core::types::EventId;
use crate::schema::schema::Field;

/// Precomputed lookup tables, built once at load and only read afterwards
#[derive(Debug, Clone, Default)]
pub struct FieldIndices {
    pub by_country: HashMap<String, RoaringBitmap>,
    pub by_type: HashMap<String, RoaringBitmap>,
    pub by_subtype: HashMap<String, RoaringBitmap>,
    /// Ascending by year, then id. Events without a start year are left out.
    pub years: Vec<(i32, EventId)>,
}

impl FieldIndices {
    pub fn build(store: &RecordStore) -> Self {
        let mut indices = FieldIndices::default();

        for event in store.iter() {
            let id = event.id.value();
            indices.by_country
                .entry(event.country.clone())
                .or_insert_with(RoaringBitmap::new)
                .insert(id);
            indices.by_type
                .entry(event.disaster_type.clone())
                .or_insert_with(RoaringBitmap::new)
                .insert(id);
            indices.by_subtype
                .entry(event.disaster_subtype.clone())
                .or_insert_with(RoaringBitmap::new)
                .insert(id);

            if let Some(year) = event.start_year {
                indices.years.push((year, event.id));
            }
        }

        indices.years.sort_unstable();
        indices
    }

    fn categorical(&self, field: Field) -> Result<&HashMap<String, RoaringBitmap>> {
        match field {
            Field::Country => Ok(&self.by_country),
            Field::DisasterType => Ok(&self.by_type),
            Field::DisasterSubtype => Ok(&self.by_subtype),
            other => Err(Error::filter(format!(
                "field '{}' has no value index; use country, disaster_type or disaster_subtype",
                other
            ))),
        }
    }

    /// Ids whose `field` equals `value` exactly. An unseen value is an empty set.
    pub fn lookup(&self, field: Field, value: &str) -> Result<RoaringBitmap> {
        Ok(self.categorical(field)?
            .get(value)
            .cloned()
            .unwrap_or_default())
    }

    /// Ids with `low <= start_year <= high`, found by binary search on the year array
    pub fn year_range(&self, low: i32, high: i32) -> RoaringBitmap {
        if low > high {
            return RoaringBitmap::new();
        }
        let start = self.years.partition_point(|(year, _)| *year < low);
        let end = self.years.partition_point(|(year, _)| *year <= high);
        self.years[start..end]
            .iter()
            .map(|(_, id)| id.value())
            .collect()
    }

    /// Distinct values of a categorical field, sorted, optionally narrowed by a
    /// case-insensitive prefix
    pub fn values(&self, field: Field, prefix: &str) -> Result<Vec<&str>> {
        let prefix = prefix.to_lowercase();
        let mut values: Vec<&str> = self.categorical(field)?
            .keys()
            .map(String::as_str)
            .filter(|v| v.to_lowercase().starts_with(&prefix))
            .collect();
        values.sort_unstable();
        Ok(values)
    }

    /// Smallest and largest indexed start year
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.years.first()?;
        let last = self.years.last()?;
        Some((first.0, last.0))
    }
}
