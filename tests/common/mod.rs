extern crate minpq;

use maplit::hashmap;
use minpq::min_pq::{MinPQ, MinPQError};
use minpq::util::{DeterministicRng, F64Rng, Priority};
use rand::SeedableRng;
use std::collections::HashMap;

/// distinct elements `0..size` with random priorities, some of them repeated
fn generate_priorities(size: i32, seed: u64) -> Vec<(i32, Priority)> {
    let mut rng = DeterministicRng::seed_from_u64(seed);
    (0..size)
        .map(|element| {
            let priority = if rng.next_f64() < 0.2 {
                (element % 7) as Priority
            } else {
                rng.next_f64() * 100.
            };
            (element, priority)
        })
        .collect()
}

fn drain_priorities<T: MinPQ<i32>>(heap: &mut T) -> Vec<Priority> {
    let mut priorities = vec![];
    while let Ok(priority) = heap.peek_min_priority() {
        heap.remove_min().unwrap();
        priorities.push(priority);
    }
    priorities
}

pub mod add {
    use super::*;

    pub fn adds_elements_and_tracks_size<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        assert!(heap.is_empty());
        for (index, (element, priority)) in generate_priorities(100, 1).into_iter().enumerate() {
            heap.add(element, priority).unwrap();
            assert_eq!(heap.size(), index + 1);
            assert!(heap.contains(&element));
            assert_eq!(heap.get_priority(&element), Ok(priority));
            heap.sanity_check().unwrap();
        }
        assert!(!heap.contains(&100));
    }

    pub fn rejects_duplicates_without_modification<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        heap.add(1, 3.).unwrap();
        heap.add(2, 4.).unwrap();
        assert_eq!(heap.add(1, 0.), Err(MinPQError::DuplicateElement));
        assert_eq!(heap.size(), 2);
        assert_eq!(heap.get_priority(&1), Ok(3.));
        assert_eq!(heap.peek_min(), Ok(&1));
    }

    pub fn rejects_nan<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        assert_eq!(heap.add(1, f64::NAN), Err(MinPQError::InvalidPriority));
        assert!(heap.is_empty());
        assert!(!heap.contains(&1));
        heap.add(1, f64::INFINITY).unwrap();
        heap.add(2, f64::NEG_INFINITY).unwrap();
        assert_eq!(heap.peek_min(), Ok(&2));
    }
}

pub mod remove_min {
    use super::*;

    pub fn returns_elements_in_non_decreasing_priority<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        let pairs = generate_priorities(1000, 2);
        heap.add_all(pairs.iter().copied()).unwrap();
        let mut expected: Vec<Priority> = pairs.iter().map(|(_, priority)| *priority).collect();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(drain_priorities(&mut heap), expected);
        assert!(heap.is_empty());
    }

    pub fn fails_on_empty<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        assert_eq!(heap.remove_min(), Err(MinPQError::Empty));
        assert_eq!(heap.peek_min(), Err(MinPQError::Empty));
        assert_eq!(heap.peek_min_priority(), Err(MinPQError::Empty));
        heap.add(7, 1.).unwrap();
        assert_eq!(heap.remove_min(), Ok(7));
        assert_eq!(heap.remove_min(), Err(MinPQError::Empty));
        assert!(!heap.contains(&7));
    }

    pub fn round_trip_returns_every_element_once<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        let pairs = generate_priorities(500, 3);
        heap.add_all(pairs.iter().copied()).unwrap();
        let mut elements = heap.into_sorted_elements();
        elements.sort();
        assert_eq!(elements, (0..500).collect::<Vec<_>>());
    }
}

pub mod change_priority {
    use super::*;

    pub fn decrease_key_moves_element_to_front<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        heap.add_all(generate_priorities(200, 4)).unwrap();
        heap.change_priority(&150, -1.).unwrap();
        assert_eq!(heap.peek_min(), Ok(&150));
        assert_eq!(heap.get_priority(&150), Ok(-1.));
        heap.sanity_check().unwrap();
        assert_eq!(heap.remove_min(), Ok(150));
    }

    pub fn increase_key_moves_element_back<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        heap.add_all(generate_priorities(200, 5)).unwrap();
        let first = heap.remove_min().unwrap();
        heap.add(first, -1.).unwrap();
        heap.change_priority(&first, 1000.).unwrap();
        heap.sanity_check().unwrap();
        let elements = heap.into_sorted_elements();
        assert_eq!(elements.last(), Some(&first));
    }

    pub fn random_changes_keep_order<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        let mut priorities: HashMap<i32, Priority> = generate_priorities(300, 6).into_iter().collect();
        heap.add_all(priorities.iter().map(|(&element, &priority)| (element, priority))).unwrap();
        let mut rng = DeterministicRng::seed_from_u64(6);
        for element in 0..300 {
            if rng.next_f64() < 0.5 {
                let priority = rng.next_f64() * 200. - 50.;
                heap.change_priority(&element, priority).unwrap();
                priorities.insert(element, priority);
            }
        }
        heap.sanity_check().unwrap();
        let mut expected: Vec<Priority> = priorities.values().copied().collect();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(drain_priorities(&mut heap), expected);
    }

    pub fn fails_without_modification<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        heap.add(1, 1.).unwrap();
        assert_eq!(heap.change_priority(&2, 0.), Err(MinPQError::NotFound));
        assert_eq!(heap.change_priority(&1, f64::NAN), Err(MinPQError::InvalidPriority));
        assert_eq!(heap.get_priority(&1), Ok(1.));
        assert_eq!(heap.size(), 1);
        assert_eq!(heap.add_or_change_priority(1, f64::NAN), Err(MinPQError::InvalidPriority));
        heap.add_or_change_priority(2, 0.5).unwrap();
        heap.add_or_change_priority(1, 0.25).unwrap();
        assert_eq!(heap.into_sorted_elements(), vec![1, 2]);
    }
}

pub mod remove {
    use super::*;

    pub fn removes_arbitrary_elements<T: MinPQ<i32> + Default>() {
        let mut heap = T::default();
        let pairs = generate_priorities(200, 7);
        heap.add_all(pairs.iter().copied()).unwrap();
        for (element, priority) in pairs.iter().filter(|(element, _)| element % 3 == 0) {
            assert_eq!(heap.remove(element), Ok(*priority));
            assert!(!heap.contains(element));
            heap.sanity_check().unwrap();
        }
        assert_eq!(heap.remove(&0), Err(MinPQError::NotFound));
        let mut remaining = heap.into_sorted_elements();
        remaining.sort();
        assert_eq!(remaining, (0..200).filter(|element| element % 3 != 0).collect::<Vec<_>>());
    }
}

pub mod scenario {
    use super::*;

    pub fn basic<T: MinPQ<&'static str> + Default>() {
        let mut heap = T::default();
        let priorities = hashmap! { "a" => 5., "b" => 2., "c" => 8. };
        heap.add_all(priorities).unwrap();
        assert_eq!(heap.remove_min(), Ok("b"));
        heap.change_priority(&"c", 1.).unwrap();
        assert_eq!(heap.remove_min(), Ok("c"));
        assert_eq!(heap.remove_min(), Ok("a"));
        assert!(heap.is_empty());
    }

    pub fn errors<T: MinPQ<&'static str> + Default>() {
        let mut heap = T::default();
        heap.add("x", 1.).unwrap();
        assert_eq!(heap.add("x", 2.), Err(MinPQError::DuplicateElement));
        assert_eq!(heap.get_priority(&"x"), Ok(1.));
        assert_eq!(heap.get_priority(&"y"), Err(MinPQError::NotFound));
        assert_eq!(heap.remove_min(), Ok("x"));
        assert_eq!(heap.remove_min(), Err(MinPQError::Empty));
    }
}

pub mod differential {
    use minpq::differential::*;
    use minpq::min_pq::MinPQ;
    use minpq::unsorted_list::UnsortedListMinPQ;

    pub fn agrees_with_unsorted_list<T: MinPQ<Element> + Default>() {
        let config = DifferentialConfig {
            max_element: 1000,
            check_all_elements: false,
            ..Default::default()
        };
        run_differential_rounds::<T, UnsortedListMinPQ<Element>>(&config, 4, 5000, 2024).unwrap();
    }

    pub fn agrees_with_unsorted_list_under_ties<T: MinPQ<Element> + Default>() {
        let config = DifferentialConfig {
            max_element: 50,
            priority_levels: Some(3),
            ..Default::default()
        };
        run_differential_rounds::<T, UnsortedListMinPQ<Element>>(&config, 4, 2000, 99).unwrap();
    }
}
