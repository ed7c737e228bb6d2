//! Utilities
//!
//! Shared type aliases, the node stored by every queue, the deterministic random
//! number generator used by workloads and a simple benchmark profiler.
//!

use crate::derivative::Derivative;
use crate::min_pq::*;
use crate::rand_xoshiro;
use crate::rand_xoshiro::rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::prelude::*;
use std::time::Instant;

/// lower value means higher priority; NaN is never stored
pub type Priority = f64;
/// position of a node in the heap array
pub type SlotIndex = usize;
pub type ElementNum = usize;

/// an element together with its current priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityNode<E> {
    pub element: E,
    pub priority: Priority,
}

impl<E> PriorityNode<E> {
    pub fn new(element: E, priority: Priority) -> Self {
        Self { element, priority }
    }
}

/// every priority entering a queue passes through here
#[inline]
pub fn check_priority(priority: Priority) -> MinPQResult<Priority> {
    if priority.is_nan() {
        Err(MinPQError::InvalidPriority)
    } else {
        Ok(priority)
    }
}

#[allow(dead_code)]
/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct BenchmarkProfiler {
    /// each record corresponds to a different round of operations
    pub records: Vec<BenchmarkProfilerEntry>,
    /// summation of all round time
    pub sum_round_time: f64,
    /// summation of all operations
    pub sum_operations: usize,
    /// the file to output the profiler results
    #[derivative(Debug = "ignore")]
    pub benchmark_profiler_output: Option<File>,
}

impl BenchmarkProfiler {
    pub fn new(header: serde_json::Value, detail_log_file: Option<String>) -> std::io::Result<Self> {
        let benchmark_profiler_output = match detail_log_file {
            Some(filename) => {
                let mut file = File::create(filename)?;
                let mut header = header;
                if let Some(object) = header.as_object_mut() {
                    object.insert("created_at".to_string(), json!(chrono::Local::now().to_rfc3339()));
                }
                file.write_all(serde_json::to_string(&header)?.as_bytes())?;
                file.write_all(b"\n")?;
                Some(file)
            }
            None => None,
        };
        Ok(Self {
            records: vec![],
            sum_round_time: 0.,
            sum_operations: 0,
            benchmark_profiler_output,
        })
    }
    /// record the beginning of a round
    pub fn begin(&mut self, operation_num: usize) {
        // sanity check last entry, if exists, is complete
        if let Some(last_entry) = self.records.last() {
            assert!(
                last_entry.is_complete(),
                "the last benchmark profiler entry is not complete, make sure to call `begin` and `end` in pairs"
            );
        }
        let mut entry = BenchmarkProfilerEntry::new(operation_num);
        entry.record_begin();
        self.records.push(entry);
    }
    pub fn event(&mut self, event_name: String) {
        let last_entry = self
            .records
            .last_mut()
            .expect("last entry not exists, call `begin` before `event`");
        last_entry.record_event(event_name);
    }
    /// record the ending of a round
    pub fn end(&mut self) -> std::io::Result<()> {
        let last_entry = self
            .records
            .last_mut()
            .expect("last entry not exists, call `begin` before `end`");
        let round_time = last_entry.record_end();
        self.sum_round_time += round_time;
        self.sum_operations += last_entry.operation_num;
        if let Some(file) = self.benchmark_profiler_output.as_mut() {
            let mut events = serde_json::Map::new();
            for (event_name, time) in last_entry.events.iter() {
                events.insert(event_name.clone(), json!(time));
            }
            let value = json!({
                "round_time": round_time,
                "operation_num": last_entry.operation_num,
                "events": events,
            });
            file.write_all(serde_json::to_string(&value)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }
    /// print out a brief one-line statistics
    pub fn brief(&self) -> String {
        let total = self.records.len() as f64;
        let time_per_operation = if self.sum_operations > 0 {
            self.sum_round_time / self.sum_operations as f64
        } else {
            0.
        };
        format!(
            "total: {total}, round time: {:.3e}s, time per operation: {time_per_operation:.3e}s",
            self.sum_round_time / total.max(1.),
        )
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkProfilerEntry {
    /// how many queue operations this round performs
    pub operation_num: usize,
    /// the time of beginning a round
    begin_time: Option<Instant>,
    /// record additional events
    pub events: Vec<(String, f64)>,
    /// interval between calling [`Self::record_begin`] to calling [`Self::record_end`]
    pub round_time: Option<f64>,
}

impl BenchmarkProfilerEntry {
    pub fn new(operation_num: usize) -> Self {
        Self {
            operation_num,
            begin_time: None,
            events: vec![],
            round_time: None,
        }
    }
    pub fn record_begin(&mut self) {
        assert_eq!(self.begin_time, None, "do not call `record_begin` twice on the same entry");
        self.begin_time = Some(Instant::now());
    }
    pub fn record_end(&mut self) -> f64 {
        let begin_time = self
            .begin_time
            .as_ref()
            .expect("make sure to call `record_begin` before calling `record_end`");
        let round_time = begin_time.elapsed().as_secs_f64();
        self.round_time = Some(round_time);
        round_time
    }
    pub fn record_event(&mut self, event_name: String) {
        let begin_time = self
            .begin_time
            .as_ref()
            .expect("make sure to call `record_begin` before calling `record_event`");
        self.events.push((event_name, begin_time.elapsed().as_secs_f64()));
    }
    pub fn is_complete(&self) -> bool {
        self.round_time.is_some()
    }
}
