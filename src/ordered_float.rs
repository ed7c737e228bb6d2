//! Ordered Float
//!
//! Some containers require `Ord` priorities; `f64` only offers `PartialOrd`.
//! Once NaN is excluded the partial order is total, which is what this wrapper
//! relies on.
//!

use crate::min_pq::*;
use crate::util::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedPriority(Priority);

impl OrderedPriority {
    pub fn new(value: Priority) -> MinPQResult<Self> {
        check_priority(value).map(Self)
    }
    pub fn value(&self) -> Priority {
        self.0
    }
}

impl TryFrom<Priority> for OrderedPriority {
    type Error = MinPQError;
    fn try_from(value: Priority) -> MinPQResult<Self> {
        Self::new(value)
    }
}

impl From<OrderedPriority> for Priority {
    fn from(priority: OrderedPriority) -> Priority {
        priority.0
    }
}

// `-0.0 == 0.0` here, matching the plain `<` comparisons of the heaps
impl PartialEq for OrderedPriority {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for OrderedPriority {}

impl PartialOrd for OrderedPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OrderedPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN cannot be constructed
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl std::fmt::Display for OrderedPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_float_rejects_nan() {
        // cargo test ordered_float_rejects_nan -- --nocapture
        assert_eq!(OrderedPriority::new(f64::NAN), Err(MinPQError::InvalidPriority));
        assert_eq!(OrderedPriority::try_from(2.5).map(Priority::from), Ok(2.5));
    }

    #[test]
    fn ordered_float_total_order() {
        // cargo test ordered_float_total_order -- --nocapture
        let mut values: Vec<OrderedPriority> = [3., f64::INFINITY, -1., 0., f64::NEG_INFINITY, -0.]
            .into_iter()
            .map(|value| OrderedPriority::new(value).unwrap())
            .collect();
        values.sort();
        let sorted: Vec<Priority> = values.iter().map(OrderedPriority::value).collect();
        assert_eq!(sorted[0], f64::NEG_INFINITY);
        assert_eq!(sorted[1], -1.);
        assert_eq!(sorted[4], 3.);
        assert_eq!(sorted[5], f64::INFINITY);
        assert_eq!(OrderedPriority::new(-0.).unwrap(), OrderedPriority::new(0.).unwrap());
    }
}
