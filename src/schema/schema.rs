use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
}

/// Every column an event carries, addressable by name from filters and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    DisNo,
    Country,
    DisasterType,
    DisasterSubtype,
    StartYear,
    StartMonth,
    StartDay,
    EndYear,
    EndMonth,
    EndDay,
    Deaths,
    Affected,
    Damage,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::DisNo,
        Field::Country,
        Field::DisasterType,
        Field::DisasterSubtype,
        Field::StartYear,
        Field::StartMonth,
        Field::StartDay,
        Field::EndYear,
        Field::EndMonth,
        Field::EndDay,
        Field::Deaths,
        Field::Affected,
        Field::Damage,
    ];

    /// Resolve a user-supplied name (canonical or alias), ignoring case
    pub fn from_name(name: &str) -> Option<Field> {
        let field = match name.trim().to_ascii_lowercase().as_str() {
            "dis_no" | "disno" => Field::DisNo,
            "country" => Field::Country,
            "disaster_type" | "type" => Field::DisasterType,
            "disaster_subtype" | "subtype" => Field::DisasterSubtype,
            "start_year" | "year" => Field::StartYear,
            "start_month" | "month" => Field::StartMonth,
            "start_day" | "day" => Field::StartDay,
            "end_year" => Field::EndYear,
            "end_month" => Field::EndMonth,
            "end_day" => Field::EndDay,
            "total_deaths" | "deaths" => Field::Deaths,
            "total_affected" | "affected" => Field::Affected,
            "total_damage_adj_usd" | "damage" | "damages" | "total_damage" => Field::Damage,
            _ => return None,
        };
        Some(field)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::DisNo => "dis_no",
            Field::Country => "country",
            Field::DisasterType => "disaster_type",
            Field::DisasterSubtype => "disaster_subtype",
            Field::StartYear => "start_year",
            Field::StartMonth => "start_month",
            Field::StartDay => "start_day",
            Field::EndYear => "end_year",
            Field::EndMonth => "end_month",
            Field::EndDay => "end_day",
            Field::Deaths => "total_deaths",
            Field::Affected => "total_affected",
            Field::Damage => "total_damage_adj_usd",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::DisNo | Field::Country | Field::DisasterType | Field::DisasterSubtype => {
                FieldType::Text
            }
            _ => FieldType::Number,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.field_type() == FieldType::Number
    }

    /// Fields backed by a value -> ids index
    pub fn is_categorical(&self) -> bool {
        matches!(self, Field::Country | Field::DisasterType | Field::DisasterSubtype)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
