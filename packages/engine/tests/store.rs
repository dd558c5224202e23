//! Spillable store tests
//!
//! The two-tier list must expose identical get/iterate semantics before
//! and after crossing its spill threshold.

use sarx_engine::store::SpillList;

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn test_in_memory_tier() {
        let mut list: SpillList<String> = SpillList::with_threshold(10);
        for i in 0..5 {
            list.push(format!("entry-{i}")).expect("push");
        }
        assert!(!list.is_spilled());
        assert_eq!(list.len(), 5);
        assert_eq!(list.get(3), Some("entry-3".to_string()));
        assert_eq!(list.get(5), None);
    }

    #[test]
    fn test_threshold_crossing_preserves_entries() {
        let mut list: SpillList<String> = SpillList::with_threshold(2);
        for i in 0..7 {
            list.push(format!("entry-{i}")).expect("push");
        }
        assert!(list.is_spilled());
        assert_eq!(list.len(), 7);
        for i in 0..7 {
            assert_eq!(list.get(i), Some(format!("entry-{i}")));
        }
        assert_eq!(list.get(7), None);
    }

    #[test]
    fn test_iteration_matches_insertion_order_across_tiers() {
        let mut spilled: SpillList<u32> = SpillList::with_threshold(1);
        let mut memory: SpillList<u32> = SpillList::with_threshold(100);
        for i in 0..20 {
            spilled.push(i).expect("push");
            memory.push(i).expect("push");
        }
        let spilled_items: Vec<u32> = spilled.iter().collect();
        let memory_items: Vec<u32> = memory.iter().collect();
        assert_eq!(spilled_items, memory_items);
        assert_eq!(spilled_items, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_structured_entries_round_trip_through_spill() {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Entry {
            id: String,
            score: f64,
        }
        let mut list: SpillList<Entry> = SpillList::with_threshold(1);
        list.push(Entry {
            id: "a".into(),
            score: 1.5,
        })
        .expect("push");
        list.push(Entry {
            id: "b".into(),
            score: -2.0,
        })
        .expect("push");
        assert_eq!(
            list.get(1),
            Some(Entry {
                id: "b".into(),
                score: -2.0
            })
        );
    }
}
