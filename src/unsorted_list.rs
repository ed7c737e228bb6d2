//! Unsorted List Min Priority Queue
//!
//! Every operation is a linear scan over an unordered vector. It is slow on
//! purpose: simple enough to trust by inspection, so it serves as the reference
//! that the other queues are compared against.
//!

use crate::min_pq::*;
use crate::util::*;

#[derive(Debug, Clone)]
pub struct UnsortedListMinPQ<E: Eq> {
    /// element-priority pairs in insertion order
    nodes: Vec<PriorityNode<E>>,
}

impl<E: Eq> Default for UnsortedListMinPQ<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq> UnsortedListMinPQ<E> {
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    /// repeated `add`, so a repeated element or a NaN priority fails the whole construction
    pub fn from_priorities<I>(pairs: I) -> MinPQResult<Self>
    where
        I: IntoIterator<Item = (E, Priority)>,
    {
        let mut queue = Self::new();
        queue.add_all(pairs)?;
        Ok(queue)
    }

    fn position(&self, element: &E) -> Option<usize> {
        self.nodes.iter().position(|node| &node.element == element)
    }

    /// the first node with the strictly smallest priority
    fn min_position(&self) -> Option<usize> {
        let mut min_position: Option<usize> = None;
        for (position, node) in self.nodes.iter().enumerate() {
            match min_position {
                Some(current) if self.nodes[current].priority <= node.priority => {}
                _ => min_position = Some(position),
            }
        }
        min_position
    }
}

impl<E: Eq> MinPQ<E> for UnsortedListMinPQ<E> {
    fn add(&mut self, element: E, priority: Priority) -> MinPQResult<()> {
        check_priority(priority)?;
        if self.contains(&element) {
            return Err(MinPQError::DuplicateElement);
        }
        self.nodes.push(PriorityNode::new(element, priority));
        Ok(())
    }

    fn contains(&self, element: &E) -> bool {
        self.position(element).is_some()
    }

    fn get_priority(&self, element: &E) -> MinPQResult<Priority> {
        self.position(element)
            .map(|position| self.nodes[position].priority)
            .ok_or(MinPQError::NotFound)
    }

    fn peek_min(&self) -> MinPQResult<&E> {
        self.min_position()
            .map(|position| &self.nodes[position].element)
            .ok_or(MinPQError::Empty)
    }

    fn remove_min(&mut self) -> MinPQResult<E> {
        let position = self.min_position().ok_or(MinPQError::Empty)?;
        Ok(self.nodes.remove(position).element)
    }

    fn change_priority(&mut self, element: &E, priority: Priority) -> MinPQResult<()> {
        check_priority(priority)?;
        let position = self.position(element).ok_or(MinPQError::NotFound)?;
        self.nodes[position].priority = priority;
        Ok(())
    }

    fn remove(&mut self, element: &E) -> MinPQResult<Priority> {
        let position = self.position(element).ok_or(MinPQError::NotFound)?;
        Ok(self.nodes.remove(position).priority)
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }
}
