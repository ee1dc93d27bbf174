//! Fixtures shared across integration tests.

#![allow(dead_code)]

use odie::core::types::{Event, EventId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNTRIES: [&str; 5] = ["India", "Chile", "Japan", "Peru", "Nepal"];
const TYPES: [&str; 4] = ["Flood", "Earthquake", "Storm", "Drought"];

/// Small hand-written dataset mixing countries, types and blank values
pub fn mixed_events() -> Vec<Event> {
    vec![
        Event::new(EventId(0), "India", "Flood").with_start_year(1998).with_deaths(300),
        Event::new(EventId(0), "India", "Earthquake").with_start_year(2001).with_deaths(20000),
        Event::new(EventId(0), "Chile", "Earthquake").with_start_year(2010).with_deaths(525),
        Event::new(EventId(0), "India", "Flood").with_start_year(2013),
        Event::new(EventId(0), "Japan", "Earthquake").with_start_year(2011).with_deaths(19846),
        Event::new(EventId(0), "India", "Storm").with_start_year(1999).with_damage(2.5e9),
        Event::new(EventId(0), "Peru", "Flood").with_deaths(12),
        Event::new(EventId(0), "India", "Drought").with_start_year(2016).with_deaths(0),
    ]
}

/// Events whose only interesting field is the start year
pub fn events_with_years(years: &[i32]) -> Vec<Event> {
    years.iter()
        .map(|year| Event::new(EventId(0), "X", "Flood").with_start_year(*year))
        .collect()
}

/// Events whose only interesting field is the death toll
pub fn events_with_deaths(deaths: &[Option<u64>]) -> Vec<Event> {
    deaths.iter()
        .map(|d| {
            let mut event = Event::new(EventId(0), "X", "Flood");
            event.deaths = *d;
            event
        })
        .collect()
}

/// Deterministic pseudo-random dataset; roughly one in ten values is blank
pub fn random_events(seed: u64, count: usize) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
            let kind = TYPES[rng.gen_range(0..TYPES.len())];
            let mut event = Event::new(EventId(0), country, kind);
            if rng.gen_bool(0.9) {
                event.start_year = Some(rng.gen_range(1960..2025));
            }
            if rng.gen_bool(0.9) {
                event.deaths = Some(rng.gen_range(0..500));
            }
            if rng.gen_bool(0.5) {
                event.damage = Some(rng.gen_range(0.0..1.0e9));
            }
            event
        })
        .collect()
}

pub fn ids(ids: &[EventId]) -> Vec<u32> {
    ids.iter().map(|id| id.value()).collect()
}

pub fn event_ids(events: &[&Event]) -> Vec<u32> {
    events.iter().map(|e| e.id.value()).collect()
}
