use roaring::RoaringBitmap;
use crate::core::types::EventId;

/// The working subset of event ids.
///
/// Membership is what filters narrow; the order is what callers see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: Vec<EventId>,
}

impl Selection {
    /// Every id in `0..count`, ascending
    pub fn all(count: usize) -> Self {
        Selection {
            ids: (0..count).map_while(EventId::from_position).collect(),
        }
    }

    pub fn from_ids(ids: Vec<EventId>) -> Self {
        Selection { ids }
    }

    pub fn ids(&self) -> &[EventId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.ids.contains(&id)
    }

    pub fn to_bitmap(&self) -> RoaringBitmap {
        self.ids.iter().map(|id| id.value()).collect()
    }

    /// Keep the ids that are also in `matching`, preserving the current order
    pub fn intersect(&self, matching: &RoaringBitmap) -> Selection {
        Selection {
            ids: self.ids
                .iter()
                .copied()
                .filter(|id| matching.contains(id.value()))
                .collect(),
        }
    }

    /// Same membership regardless of order
    pub fn same_members(&self, other: &Selection) -> bool {
        self.to_bitmap() == other.to_bitmap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_keeps_order() {
        let selection = Selection::from_ids(vec![EventId(4), EventId(1), EventId(3)]);
        let matching: RoaringBitmap = [1u32, 4, 9].into_iter().collect();
        assert_eq!(selection.intersect(&matching).ids(), &[EventId(4), EventId(1)]);
    }

    #[test]
    fn test_same_members_ignores_order() {
        let a = Selection::from_ids(vec![EventId(2), EventId(0)]);
        let b = Selection::from_ids(vec![EventId(0), EventId(2)]);
        assert!(a.same_members(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_all() {
        let selection = Selection::all(3);
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(EventId(2)));
        assert!(!selection.contains(EventId(3)));
        assert!(Selection::all(0).is_empty());
    }
}
