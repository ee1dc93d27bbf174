use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use chrono::NaiveDate;
use crate::core::error::{Error, Result};
use crate::core::types::{Event, FieldRef};
use crate::schema::schema::Field;

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,   // Ascending: 0 → 9, A → Z
    Desc,  // Descending: 9 → 0, Z → A
}

impl SortOrder {
    pub fn from_name(name: &str) -> Option<SortOrder> {
        match name.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// What a sort compares: a schema field or the derived start date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Field(Field),
    StartDate,
}

impl SortKey {
    pub fn from_name(name: &str) -> Result<SortKey> {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" | "start_date" => Ok(SortKey::StartDate),
            other => Field::from_name(other)
                .map(SortKey::Field)
                .ok_or_else(|| Error::filter(format!("cannot sort by unknown field '{}'", name.trim()))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortKey::Field(field) => write!(f, "{}", field),
            SortKey::StartDate => f.write_str("start_date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
}

fn key_of(event: &Event, key: SortKey) -> Option<KeyValue<'_>> {
    match key {
        SortKey::StartDate => event.start_date().map(KeyValue::Date),
        SortKey::Field(field) => event.get(field).map(|v| match v {
            FieldRef::Text(s) => KeyValue::Text(s),
            FieldRef::Number(n) => KeyValue::Number(n),
        }),
    }
}

fn compare_present(a: KeyValue, b: KeyValue) -> Ordering {
    match (a, b) {
        (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
        (KeyValue::Number(a), KeyValue::Number(b)) => a.total_cmp(&b),
        (KeyValue::Date(a), KeyValue::Date(b)) => a.cmp(&b),
        // One key always yields one kind
        _ => Ordering::Equal,
    }
}

/// Blank sorts as the smallest value; the order then flips as a whole for `Desc`
fn compare(a: Option<KeyValue>, b: Option<KeyValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

/// Stable sort of `events` by `key`; equal keys keep their input order
pub fn sort_events(events: &mut [&Event], key: SortKey, order: SortOrder) {
    events.sort_by(|a, b| {
        let ordering = compare(key_of(a, key), key_of(b, key));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
