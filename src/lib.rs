extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate cfg_if;
extern crate chrono;
extern crate clap;
extern crate derivative;
extern crate hashbrown;
extern crate itertools;
extern crate more_asserts;
#[cfg(feature = "cli")]
extern crate pbr;
extern crate petgraph;
extern crate prettytable;
extern crate priority_queue;
extern crate rand;
extern crate rand_xoshiro;
extern crate rayon;
extern crate thiserror;

#[cfg(feature = "cli")]
pub mod cli;
pub mod differential;
pub mod indexed_heap;
pub mod min_pq;
pub mod ordered_float;
pub mod priority_queue_heap;
pub mod report_analyzer;
pub mod shortest_paths;
pub mod unsorted_list;
pub mod util;

pub use indexed_heap::IndexedMinHeap;
pub use min_pq::{MinPQ, MinPQError, MinPQResult};
pub use priority_queue_heap::PriorityQueueMinPQ;
pub use unsorted_list::UnsortedListMinPQ;
pub use util::Priority;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
