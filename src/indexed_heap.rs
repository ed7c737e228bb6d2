//! Indexed Min Heap
//!
//! A binary min-heap stored in an array, paired with a map from each element to
//! its slot in that array. The map makes `contains` and `get_priority` O(1) and
//! lets `change_priority` and `remove` find a node without scanning.
//!
//! Slots are 0-based: the children of slot `i` are `2i + 1` and `2i + 2`.
//! Every exchange of two slots goes through [`IndexedMinHeap::swap`], which
//! rewrites both map entries, so the array and the map cannot drift apart.
//!

use crate::min_pq::*;
use crate::util::*;
use derivative::Derivative;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use prettytable::{Cell, Row, Table};
use serde::Serialize;
use std::hash::Hash;

/// Elements are moved in by `add`, but the index map keeps its own clone of every
/// element as a key, so each element is stored twice. Cheap-to-clone keys (integers,
/// `&str`, node indices, `Rc`) keep this negligible.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct IndexedMinHeap<E: Hash + Eq + Clone> {
    /// complete binary tree, minimum priority at slot 0
    nodes: Vec<PriorityNode<E>>,
    /// the current slot of every element in `nodes`
    #[derivative(Debug = "ignore")]
    slots: HashMap<E, SlotIndex>,
}

impl<E: Hash + Eq + Clone> Default for IndexedMinHeap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Hash + Eq + Clone> IndexedMinHeap<E> {
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            slots: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// build a heap from `(element, priority)` pairs in O(n);
    /// fails without building anything if an element repeats or a priority is NaN
    pub fn from_priorities<I>(pairs: I) -> MinPQResult<Self>
    where
        I: IntoIterator<Item = (E, Priority)>,
    {
        let pairs = pairs.into_iter();
        let mut heap = Self::with_capacity(pairs.size_hint().0);
        for (element, priority) in pairs {
            check_priority(priority)?;
            let slot = heap.nodes.len();
            match heap.slots.entry(element) {
                Entry::Occupied(_) => return Err(MinPQError::DuplicateElement),
                Entry::Vacant(vacant) => {
                    let element = vacant.key().clone();
                    vacant.insert(slot);
                    heap.nodes.push(PriorityNode::new(element, priority));
                }
            }
        }
        // leaves are already heaps; sink every internal node, deepest first
        for slot in (0..heap.nodes.len() / 2).rev() {
            heap.sink(slot);
        }
        heap.debug_sanity_check();
        Ok(heap)
    }

    #[inline]
    fn parent(slot: SlotIndex) -> SlotIndex {
        (slot - 1) / 2
    }

    #[inline]
    fn left_child(slot: SlotIndex) -> SlotIndex {
        2 * slot + 1
    }

    /// exchange two slots and both of their index entries
    #[inline]
    fn swap(&mut self, a: SlotIndex, b: SlotIndex) {
        self.nodes.swap(a, b);
        for slot in [a, b] {
            let indexed = self.slots.get_mut(&self.nodes[slot].element);
            debug_assert!(indexed.is_some(), "element at slot {slot} is not indexed");
            if let Some(indexed) = indexed {
                *indexed = slot;
            }
        }
    }

    /// move the node towards the root while it is smaller than its parent, returns its final slot
    fn swim(&mut self, mut slot: SlotIndex) -> SlotIndex {
        while slot > 0 {
            let parent = Self::parent(slot);
            if self.nodes[slot].priority < self.nodes[parent].priority {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    /// move the node towards the leaves while its smaller child is smaller than it, returns its final slot
    fn sink(&mut self, mut slot: SlotIndex) -> SlotIndex {
        let len = self.nodes.len();
        loop {
            let left = Self::left_child(slot);
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.nodes[right].priority < self.nodes[left].priority {
                right
            } else {
                left
            };
            if self.nodes[smaller].priority < self.nodes[slot].priority {
                self.swap(slot, smaller);
                slot = smaller;
            } else {
                break;
            }
        }
        slot
    }

    /// at most one of the two directions actually moves the node
    fn restore(&mut self, slot: SlotIndex) {
        let slot = self.swim(slot);
        self.sink(slot);
    }

    /// take the node at `slot` out of the heap, filling the hole with the last node
    fn remove_slot(&mut self, slot: SlotIndex) -> Option<PriorityNode<E>> {
        if slot >= self.nodes.len() {
            return None;
        }
        let last = self.nodes.len() - 1;
        self.swap(slot, last);
        let node = self.nodes.pop()?;
        self.slots.remove(&node.element);
        if slot < self.nodes.len() {
            self.restore(slot);
        }
        Some(node)
    }

    pub fn peek_min_with_priority(&self) -> Option<(&E, Priority)> {
        self.nodes.first().map(|node| (&node.element, node.priority))
    }

    /// all elements with their priorities, in heap order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = (&E, Priority)> {
        self.nodes.iter().map(|node| (&node.element, node.priority))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.slots.clear();
    }

    /// drain into `(element, priority)` pairs in non-decreasing priority order
    pub fn into_sorted_vec(mut self) -> Vec<(E, Priority)> {
        let mut sorted = Vec::with_capacity(self.nodes.len());
        while let Some(node) = self.remove_slot(0) {
            sorted.push((node.element, node.priority));
        }
        sorted
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(debug_assertions, feature = "strict_sanity_check"))] {
        impl<E: Hash + Eq + Clone> IndexedMinHeap<E> {
            /// full sanity check after every mutation
            #[inline]
            fn debug_sanity_check(&self) {
                if let Err(message) = MinPQ::sanity_check(self) {
                    panic!("indexed heap corrupted: {message}");
                }
            }
        }
    } else {
        impl<E: Hash + Eq + Clone> IndexedMinHeap<E> {
            #[inline(always)]
            fn debug_sanity_check(&self) {}
        }
    }
}

impl<E: Hash + Eq + Clone> MinPQ<E> for IndexedMinHeap<E> {
    fn add(&mut self, element: E, priority: Priority) -> MinPQResult<()> {
        check_priority(priority)?;
        let slot = self.nodes.len();
        match self.slots.entry(element) {
            Entry::Occupied(_) => return Err(MinPQError::DuplicateElement),
            Entry::Vacant(vacant) => {
                let element = vacant.key().clone();
                vacant.insert(slot);
                self.nodes.push(PriorityNode::new(element, priority));
            }
        }
        self.swim(slot);
        self.debug_sanity_check();
        Ok(())
    }

    fn contains(&self, element: &E) -> bool {
        self.slots.contains_key(element)
    }

    fn get_priority(&self, element: &E) -> MinPQResult<Priority> {
        self.slots
            .get(element)
            .map(|&slot| self.nodes[slot].priority)
            .ok_or(MinPQError::NotFound)
    }

    fn peek_min(&self) -> MinPQResult<&E> {
        self.nodes.first().map(|node| &node.element).ok_or(MinPQError::Empty)
    }

    fn remove_min(&mut self) -> MinPQResult<E> {
        let node = self.remove_slot(0).ok_or(MinPQError::Empty)?;
        self.debug_sanity_check();
        Ok(node.element)
    }

    fn change_priority(&mut self, element: &E, priority: Priority) -> MinPQResult<()> {
        check_priority(priority)?;
        let slot = *self.slots.get(element).ok_or(MinPQError::NotFound)?;
        self.nodes[slot].priority = priority;
        self.restore(slot);
        self.debug_sanity_check();
        Ok(())
    }

    fn remove(&mut self, element: &E) -> MinPQResult<Priority> {
        let slot = *self.slots.get(element).ok_or(MinPQError::NotFound)?;
        let node = self.remove_slot(slot).ok_or(MinPQError::NotFound)?;
        self.debug_sanity_check();
        Ok(node.priority)
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn peek_min_priority(&self) -> MinPQResult<Priority> {
        self.nodes.first().map(|node| node.priority).ok_or(MinPQError::Empty)
    }

    /// heap order between every node and its parent, and an index map that
    /// holds exactly the stored elements at their actual slots
    fn sanity_check(&self) -> Result<(), String> {
        if self.slots.len() != self.nodes.len() {
            return Err(format!(
                "index map holds {} elements but the heap holds {}",
                self.slots.len(),
                self.nodes.len()
            ));
        }
        for (slot, node) in self.nodes.iter().enumerate() {
            match self.slots.get(&node.element) {
                Some(&indexed) if indexed == slot => {}
                Some(&indexed) => {
                    return Err(format!("element at slot {slot} is indexed at slot {indexed}"));
                }
                None => return Err(format!("element at slot {slot} is missing from the index map")),
            }
            if node.priority.is_nan() {
                return Err(format!("slot {slot} holds a NaN priority"));
            }
            if slot > 0 {
                let parent = Self::parent(slot);
                if self.nodes[parent].priority > node.priority {
                    return Err(format!(
                        "heap order violated: parent slot {parent} has priority {} but slot {slot} has {}",
                        self.nodes[parent].priority, node.priority
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<E: Hash + Eq + Clone + Serialize> IndexedMinHeap<E> {
    /// dump the array for debugging, slot by slot
    pub fn snapshot(&self) -> serde_json::Value {
        json!({
            "size": self.nodes.len(),
            "nodes": self.nodes.iter().enumerate().map(|(slot, node)| json!({
                "slot": slot,
                "element": node.element,
                "priority": node.priority,
            })).collect::<Vec<_>>(),
        })
    }
}

impl<E: Hash + Eq + Clone + std::fmt::Debug> IndexedMinHeap<E> {
    pub fn display_table(&self) -> Table {
        let mut table = Table::new();
        let mut title = Row::empty();
        for name in ["slot", "parent", "element", "priority"] {
            title.add_cell(Cell::new(name).style_spec("b"));
        }
        table.set_titles(title);
        for (slot, node) in self.nodes.iter().enumerate() {
            let parent = if slot > 0 { Self::parent(slot).to_string() } else { "-".to_string() };
            let mut table_row = Row::empty();
            table_row.add_cell(Cell::new(slot.to_string().as_str()));
            table_row.add_cell(Cell::new(parent.as_str()));
            table_row.add_cell(Cell::new(format!("{:?}", node.element).as_str()));
            table_row.add_cell(Cell::new(node.priority.to_string().as_str()));
            table.add_row(table_row);
        }
        table
    }

    pub fn printstd(&self) {
        self.display_table().printstd();
    }
}
