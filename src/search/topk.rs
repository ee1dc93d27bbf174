use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use crate::core::types::{Event, EventId};
use crate::schema::schema::Field;

/// Event id paired with the value it is ranked by.
///
/// Greater means better: a larger value, or the smaller id on equal values.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: EventId,
    pub value: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Up-front heap allocation; `k` beyond this grows on demand
const PREALLOCATE_LIMIT: usize = 1024;

/// Keeps the best `k` candidates seen so far in a min-heap of size `k`
pub struct TopKCollector {
    heap: BinaryHeap<Reverse<Candidate>>,
    pub k: usize,
    pub total_collected: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.min(PREALLOCATE_LIMIT)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, candidate: Candidate) {
        self.total_collected += 1;
        if self.k == 0 {
            return;
        }

        if self.heap.len() < self.k {
            self.heap.push(Reverse(candidate));
            return;
        }

        // Overwrite the root (current minimum); PeekMut sifts it down on drop
        if let Some(mut worst) = self.heap.peek_mut() {
            if candidate > worst.0 {
                *worst = Reverse(candidate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best first
    pub fn into_sorted(self) -> Vec<Candidate> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(candidate)| candidate)
            .collect()
    }
}

/// The `k` events with the largest `field`, best first. Blank values never compete.
pub fn top_k<'a, I>(events: I, field: Field, k: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut collector = TopKCollector::new(k);
    for event in events {
        if let Some(value) = event.number(field) {
            collector.collect(Candidate { id: event.id, value });
        }
    }
    collector.into_sorted()
}
