//! Min Priority Queue
//!
//! The operation set shared by every queue in this crate, so that the same
//! tests and workloads can drive any of them side by side.
//!

use crate::util::*;
use thiserror::Error;

/// misuse of a queue; every error is detected before the queue is modified
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinPQError {
    /// `add` of an element that is already in the queue
    #[error("the element is already in the queue")]
    DuplicateElement,
    /// priority query, priority change or removal of an element not in the queue
    #[error("the element is not in the queue")]
    NotFound,
    /// peek or removal on an empty queue
    #[error("the queue is empty")]
    Empty,
    /// priorities must be comparable, NaN is not
    #[error("priority must not be NaN")]
    InvalidPriority,
}

pub type MinPQResult<T> = Result<T, MinPQError>;

/// a priority queue of unique elements where the lowest priority comes out first
pub trait MinPQ<E> {
    /// insert an element that is not yet present
    fn add(&mut self, element: E, priority: Priority) -> MinPQResult<()>;

    fn contains(&self, element: &E) -> bool;

    fn get_priority(&self, element: &E) -> MinPQResult<Priority>;

    /// the element with the smallest priority, ties broken by the implementation
    fn peek_min(&self) -> MinPQResult<&E>;

    fn remove_min(&mut self) -> MinPQResult<E>;

    fn change_priority(&mut self, element: &E, priority: Priority) -> MinPQResult<()>;

    /// remove an arbitrary element, returning the priority it had
    fn remove(&mut self, element: &E) -> MinPQResult<Priority>;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// decrease-key style update that does not need to know whether the element is present
    fn add_or_change_priority(&mut self, element: E, priority: Priority) -> MinPQResult<()> {
        if self.contains(&element) {
            self.change_priority(&element, priority)
        } else {
            self.add(element, priority)
        }
    }

    fn peek_min_priority(&self) -> MinPQResult<Priority> {
        let element = self.peek_min()?;
        self.get_priority(element)
    }

    /// add every pair in order, stopping at the first failure
    fn add_all<I>(&mut self, pairs: I) -> MinPQResult<()>
    where
        I: IntoIterator<Item = (E, Priority)>,
        Self: Sized,
    {
        for (element, priority) in pairs {
            self.add(element, priority)?;
        }
        Ok(())
    }

    /// drain the queue in non-decreasing priority order
    fn into_sorted_elements(mut self) -> Vec<E>
    where
        Self: Sized,
    {
        let mut elements = Vec::with_capacity(self.size());
        while let Ok(element) = self.remove_min() {
            elements.push(element);
        }
        elements
    }

    /// check the internal invariants of the implementation, if it has any
    fn sanity_check(&self) -> Result<(), String> {
        Ok(())
    }
}
