//! Priority Queue Heap
//!
//! The same operation set backed by the `priority-queue` crate, which keeps its
//! own hash index next to a binary heap. It gives a third, independently written
//! implementation to compare the indexed heap with.
//!

use crate::min_pq::*;
use crate::ordered_float::OrderedPriority;
use crate::util::*;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::hash::Hash;

/// `PriorityQueue` pops the maximum, so priorities are stored reversed
pub type MinPriorityQueue<O, T> = PriorityQueue<O, Reverse<T>>;

#[derive(Debug, Clone)]
pub struct PriorityQueueMinPQ<E: Hash + Eq> {
    queue: MinPriorityQueue<E, OrderedPriority>,
}

impl<E: Hash + Eq> Default for PriorityQueueMinPQ<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Hash + Eq> PriorityQueueMinPQ<E> {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
        }
    }

    pub fn from_priorities<I>(pairs: I) -> MinPQResult<Self>
    where
        I: IntoIterator<Item = (E, Priority)>,
    {
        let mut queue = Self::new();
        queue.add_all(pairs)?;
        Ok(queue)
    }
}

impl<E: Hash + Eq> MinPQ<E> for PriorityQueueMinPQ<E> {
    fn add(&mut self, element: E, priority: Priority) -> MinPQResult<()> {
        let priority = OrderedPriority::new(priority)?;
        if self.contains(&element) {
            return Err(MinPQError::DuplicateElement);
        }
        self.queue.push(element, Reverse(priority));
        Ok(())
    }

    fn contains(&self, element: &E) -> bool {
        self.queue.get_priority(element).is_some()
    }

    fn get_priority(&self, element: &E) -> MinPQResult<Priority> {
        self.queue
            .get_priority(element)
            .map(|priority| priority.0.value())
            .ok_or(MinPQError::NotFound)
    }

    fn peek_min(&self) -> MinPQResult<&E> {
        self.queue.peek().map(|(element, _)| element).ok_or(MinPQError::Empty)
    }

    fn remove_min(&mut self) -> MinPQResult<E> {
        self.queue.pop().map(|(element, _)| element).ok_or(MinPQError::Empty)
    }

    fn change_priority(&mut self, element: &E, priority: Priority) -> MinPQResult<()> {
        let priority = OrderedPriority::new(priority)?;
        self.queue
            .change_priority(element, Reverse(priority))
            .map(|_| ())
            .ok_or(MinPQError::NotFound)
    }

    fn remove(&mut self, element: &E) -> MinPQResult<Priority> {
        self.queue
            .remove(element)
            .map(|(_, priority)| priority.0.value())
            .ok_or(MinPQError::NotFound)
    }

    fn size(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn priority_queue_heap_basic_scenario() {
        // cargo test priority_queue_heap_basic_scenario -- --nocapture
        let mut queue = PriorityQueueMinPQ::from_priorities(vec![("a", 5.), ("b", 2.), ("c", 8.)]).unwrap();
        assert_eq!(queue.remove_min(), Ok("b"));
        queue.change_priority(&"c", 1.).unwrap();
        assert_eq!(queue.remove_min(), Ok("c"));
        assert_eq!(queue.remove_min(), Ok("a"));
        assert!(queue.is_empty());
    }

    #[test]
    fn priority_queue_heap_error_scenario() {
        // cargo test priority_queue_heap_error_scenario -- --nocapture
        let mut queue = PriorityQueueMinPQ::new();
        queue.add("x", 1.).unwrap();
        assert_eq!(queue.add("x", 2.), Err(MinPQError::DuplicateElement));
        assert_eq!(queue.get_priority(&"x"), Ok(1.));
        assert_eq!(queue.get_priority(&"y"), Err(MinPQError::NotFound));
        assert_eq!(queue.change_priority(&"x", f64::NAN), Err(MinPQError::InvalidPriority));
        assert_eq!(queue.remove_min(), Ok("x"));
        assert_eq!(queue.remove_min(), Err(MinPQError::Empty));
    }
}
