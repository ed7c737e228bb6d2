//! Differential Testing
//!
//! Drives two queues with the same random operation sequence and checks that
//! they agree after every step. One of them is usually the unsorted list, which
//! is trusted by inspection; the other is the queue under test.
//!
//! Ties are tolerated: when several elements share the minimum priority, the
//! tested queue may return any of them, and the reference queue then removes
//! that same element so both keep holding the same set.
//!

use crate::min_pq::*;
use crate::rayon::prelude::*;
use crate::util::*;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub type Element = usize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DifferentialConfig {
    /// elements are drawn from `0..max_element`
    #[serde(default = "differential_default_configs::max_element")]
    pub max_element: Element,
    /// probability that a step is `remove_min`
    #[serde(default = "differential_default_configs::remove_ratio")]
    pub remove_ratio: f64,
    /// probability that a non-removing step is a query rather than a mutation
    #[serde(default = "differential_default_configs::query_ratio")]
    pub query_ratio: f64,
    /// draw integer priorities from `0..levels` to force ties; real priorities in `[0, 1)` otherwise
    #[serde(default = "differential_default_configs::priority_levels")]
    pub priority_levels: Option<usize>,
    /// compare `contains` and `get_priority` for every possible element after every step
    #[serde(default = "differential_default_configs::check_all_elements")]
    pub check_all_elements: bool,
}

pub mod differential_default_configs {
    use super::*;

    pub fn max_element() -> Element {
        200
    }
    pub fn remove_ratio() -> f64 {
        0.3
    }
    pub fn query_ratio() -> f64 {
        0.2
    }
    pub fn priority_levels() -> Option<usize> {
        None
    }
    pub fn check_all_elements() -> bool {
        true
    }
}

impl Default for DifferentialConfig {
    fn default() -> Self {
        Self {
            max_element: differential_default_configs::max_element(),
            remove_ratio: differential_default_configs::remove_ratio(),
            query_ratio: differential_default_configs::query_ratio(),
            priority_levels: differential_default_configs::priority_levels(),
            check_all_elements: differential_default_configs::check_all_elements(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum QueueOperation {
    Add(Element, Priority),
    AddOrChangePriority(Element, Priority),
    ChangePriority(Element, Priority),
    Remove(Element),
    RemoveMin,
    PeekMin,
    Contains(Element),
    GetPriority(Element),
}

impl QueueOperation {
    /// apply to a single queue, discarding whatever the operation returns
    pub fn apply<T: MinPQ<Element>>(&self, queue: &mut T) -> MinPQResult<()> {
        match *self {
            Self::Add(element, priority) => queue.add(element, priority),
            Self::AddOrChangePriority(element, priority) => queue.add_or_change_priority(element, priority),
            Self::ChangePriority(element, priority) => queue.change_priority(&element, priority),
            Self::Remove(element) => queue.remove(&element).map(|_| ()),
            Self::RemoveMin => queue.remove_min().map(|_| ()),
            Self::PeekMin => queue.peek_min().map(|_| ()),
            Self::Contains(element) => {
                queue.contains(&element);
                Ok(())
            }
            Self::GetPriority(element) => queue.get_priority(&element).map(|_| ()),
        }
    }
}

/// random operations over a fixed element range
pub struct OperationGenerator {
    rng: DeterministicRng,
    config: DifferentialConfig,
}

impl OperationGenerator {
    pub fn new(config: DifferentialConfig, seed: u64) -> Self {
        assert!(config.max_element > 0, "max_element must be positive");
        Self {
            rng: DeterministicRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn next_element(&mut self) -> Element {
        self.rng.gen_range(0..self.config.max_element)
    }

    pub fn next_priority(&mut self) -> Priority {
        match self.config.priority_levels {
            Some(levels) if levels > 0 => self.rng.gen_range(0..levels) as Priority,
            _ => self.rng.next_f64(),
        }
    }

    pub fn next_operation(&mut self) -> QueueOperation {
        if self.rng.next_f64() < self.config.remove_ratio {
            return QueueOperation::RemoveMin;
        }
        let element = self.next_element();
        if self.rng.next_f64() < self.config.query_ratio {
            return match self.rng.gen_range(0..3) {
                0 => QueueOperation::PeekMin,
                1 => QueueOperation::Contains(element),
                _ => QueueOperation::GetPriority(element),
            };
        }
        let priority = self.next_priority();
        match self.rng.gen_range(0..8) {
            0 => QueueOperation::Add(element, priority),
            1 => QueueOperation::ChangePriority(element, priority),
            2 => QueueOperation::Remove(element),
            _ => QueueOperation::AddOrChangePriority(element, priority),
        }
    }
}

/// applies every operation to both queues and reports the first disagreement
pub struct DifferentialTester<T: MinPQ<Element>, R: MinPQ<Element>> {
    pub tested: T,
    pub reference: R,
    pub config: DifferentialConfig,
    /// number of operations applied so far
    pub step: usize,
}

impl<T: MinPQ<Element>, R: MinPQ<Element>> DifferentialTester<T, R> {
    pub fn new(tested: T, reference: R, config: DifferentialConfig) -> Self {
        Self {
            tested,
            reference,
            config,
            step: 0,
        }
    }

    fn reference_min_priority(&self) -> Option<Priority> {
        self.reference.peek_min_priority().ok()
    }

    /// the tested queue returned `element` as a minimum; it must be a minimum of the reference too
    fn check_is_minimum(&self, element: Element, min_priority: Option<Priority>) -> Result<(), String> {
        let min_priority = min_priority.ok_or_else(|| format!("tested queue produced {element} but the reference is empty"))?;
        let priority = self
            .reference
            .get_priority(&element)
            .map_err(|_| format!("tested queue produced {element} which the reference does not hold"))?;
        if priority != min_priority {
            return Err(format!(
                "tested queue produced {element} with priority {priority}, but the minimum priority is {min_priority}"
            ));
        }
        Ok(())
    }

    pub fn apply(&mut self, operation: &QueueOperation) -> Result<(), String> {
        self.step += 1;
        let result = self.apply_inner(operation);
        result.map_err(|message| format!("step {} ({operation:?}): {message}", self.step))
    }

    fn apply_inner(&mut self, operation: &QueueOperation) -> Result<(), String> {
        fn agree<V: PartialEq + std::fmt::Debug>(tested: V, reference: V) -> Result<(), String> {
            if tested == reference {
                Ok(())
            } else {
                Err(format!("tested queue returned {tested:?} but the reference returned {reference:?}"))
            }
        }
        match *operation {
            QueueOperation::Add(element, priority) => {
                agree(self.tested.add(element, priority), self.reference.add(element, priority))?
            }
            QueueOperation::AddOrChangePriority(element, priority) => agree(
                self.tested.add_or_change_priority(element, priority),
                self.reference.add_or_change_priority(element, priority),
            )?,
            QueueOperation::ChangePriority(element, priority) => agree(
                self.tested.change_priority(&element, priority),
                self.reference.change_priority(&element, priority),
            )?,
            QueueOperation::Remove(element) => {
                agree(self.tested.remove(&element), self.reference.remove(&element))?
            }
            QueueOperation::Contains(element) => {
                agree(self.tested.contains(&element), self.reference.contains(&element))?
            }
            QueueOperation::GetPriority(element) => agree(
                self.tested.get_priority(&element),
                self.reference.get_priority(&element),
            )?,
            QueueOperation::PeekMin => {
                let min_priority = self.reference_min_priority();
                match self.tested.peek_min().map(|&element| element) {
                    Ok(element) => self.check_is_minimum(element, min_priority)?,
                    Err(error) => agree(Err(error), self.reference.peek_min().map(|&element| element))?,
                }
            }
            QueueOperation::RemoveMin => {
                let min_priority = self.reference_min_priority();
                match self.tested.remove_min() {
                    Ok(element) => {
                        self.check_is_minimum(element, min_priority)?;
                        self.reference
                            .remove(&element)
                            .map_err(|error| format!("reference failed to remove {element}: {error}"))?;
                    }
                    Err(error) => agree(Err(error), self.reference.remove_min())?,
                }
            }
        }
        self.check_agreement()
    }

    /// sizes, minimum, membership and priorities must match and the tested queue must be internally consistent
    pub fn check_agreement(&self) -> Result<(), String> {
        if self.tested.size() != self.reference.size() {
            return Err(format!(
                "tested queue has size {} but the reference has size {}",
                self.tested.size(),
                self.reference.size()
            ));
        }
        if self.tested.is_empty() != self.reference.is_empty() {
            return Err("is_empty disagrees".to_string());
        }
        match self.tested.peek_min() {
            Ok(&element) => self.check_is_minimum(element, self.reference_min_priority())?,
            Err(error) if self.reference.peek_min().is_ok() => {
                return Err(format!("tested queue failed to peek with {error} while the reference is not empty"));
            }
            Err(_) => {}
        }
        if self.config.check_all_elements {
            for element in 0..self.config.max_element {
                let (tested, reference) = (self.tested.get_priority(&element), self.reference.get_priority(&element));
                if tested != reference {
                    return Err(format!(
                        "element {element}: tested queue has {tested:?} but the reference has {reference:?}"
                    ));
                }
                if self.tested.contains(&element) != self.reference.contains(&element) {
                    return Err(format!("element {element}: contains disagrees"));
                }
            }
        }
        self.tested.sanity_check()
    }

    pub fn run(&mut self, generator: &mut OperationGenerator, steps: usize) -> Result<(), String> {
        for _ in 0..steps {
            let operation = generator.next_operation();
            self.apply(&operation)?;
        }
        Ok(())
    }

    /// remove everything from both queues, checking extraction order on the way
    pub fn drain(&mut self) -> Result<(), String> {
        let mut last_priority = Priority::NEG_INFINITY;
        while !self.reference.is_empty() {
            let priority = self.reference.peek_min_priority().map_err(|error| error.to_string())?;
            if priority < last_priority {
                return Err(format!("extraction order decreased from {last_priority} to {priority}"));
            }
            last_priority = priority;
            self.apply(&QueueOperation::RemoveMin)?;
        }
        self.apply(&QueueOperation::RemoveMin)
    }
}

/// run independent rounds in parallel, each with its own seed derived from `seed`
pub fn run_differential_rounds<T, R>(config: &DifferentialConfig, rounds: usize, steps: usize, seed: u64) -> Result<(), String>
where
    T: MinPQ<Element> + Default,
    R: MinPQ<Element> + Default,
{
    if config.max_element == 0 {
        return Err("max_element must be positive".to_string());
    }
    (0..rounds as u64).into_par_iter().try_for_each(|round| {
        let round_seed = seed.wrapping_add(round);
        let mut generator = OperationGenerator::new(config.clone(), round_seed);
        let mut tester = DifferentialTester::new(T::default(), R::default(), config.clone());
        tester
            .run(&mut generator, steps)
            .and_then(|_| tester.drain())
            .map_err(|message| format!("round {round} (seed {round_seed}): {message}"))
    })
}
