use serde::{Serialize, Deserialize};
use chrono::NaiveDate;
use crate::schema::schema::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl EventId {
    pub fn new(id: u32) -> Self {
        EventId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The id of the event at load position `pos`; `None` past `u32::MAX`
    pub fn from_position(pos: usize) -> Option<Self> {
        u32::try_from(pos).ok().map(EventId)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        EventId(id)
    }
}

/// A literal or a field value seen through the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Number(_) => "number",
        }
    }
}

/// Borrowed view of a single field on an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Number(f64),
}

/// One disaster record.
///
/// Optional numeric columns keep `None` for blanks; a blank is never read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub dis_no: String,
    pub country: String,
    pub disaster_type: String,
    #[serde(default)]
    pub disaster_subtype: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub start_day: Option<u32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub end_month: Option<u32>,
    #[serde(default)]
    pub end_day: Option<u32>,
    #[serde(default)]
    pub deaths: Option<u64>,
    #[serde(default)]
    pub affected: Option<u64>,
    /// Adjusted damage in US$
    #[serde(default)]
    pub damage: Option<f64>,
}

impl Event {
    pub fn new(id: EventId, country: &str, disaster_type: &str) -> Self {
        Event {
            id,
            dis_no: String::new(),
            country: country.to_string(),
            disaster_type: disaster_type.to_string(),
            disaster_subtype: String::new(),
            start_year: None,
            start_month: None,
            start_day: None,
            end_year: None,
            end_month: None,
            end_day: None,
            deaths: None,
            affected: None,
            damage: None,
        }
    }

    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn with_deaths(mut self, deaths: u64) -> Self {
        self.deaths = Some(deaths);
        self
    }

    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.disaster_subtype = subtype.to_string();
        self
    }

    /// Value of `field` on this record, `None` when the column was blank
    pub fn get(&self, field: Field) -> Option<FieldRef<'_>> {
        let num = |v: Option<f64>| v.map(FieldRef::Number);
        match field {
            Field::DisNo => Some(FieldRef::Text(&self.dis_no)),
            Field::Country => Some(FieldRef::Text(&self.country)),
            Field::DisasterType => Some(FieldRef::Text(&self.disaster_type)),
            Field::DisasterSubtype => Some(FieldRef::Text(&self.disaster_subtype)),
            Field::StartYear => num(self.start_year.map(f64::from)),
            Field::StartMonth => num(self.start_month.map(f64::from)),
            Field::StartDay => num(self.start_day.map(f64::from)),
            Field::EndYear => num(self.end_year.map(f64::from)),
            Field::EndMonth => num(self.end_month.map(f64::from)),
            Field::EndDay => num(self.end_day.map(f64::from)),
            Field::Deaths => num(self.deaths.map(|v| v as f64)),
            Field::Affected => num(self.affected.map(|v| v as f64)),
            Field::Damage => num(self.damage),
        }
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        match self.get(field) {
            Some(FieldRef::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Start date with month and day defaulting to 1
    pub fn start_date(&self) -> Option<NaiveDate> {
        let year = self.start_year?;
        NaiveDate::from_ymd_opt(
            year,
            self.start_month.unwrap_or(1),
            self.start_day.unwrap_or(1),
        )
    }
}
