use crate::differential::*;
use crate::indexed_heap::*;
use crate::min_pq::*;
use crate::priority_queue_heap::*;
use crate::report_analyzer::*;
use crate::unsorted_list::*;
use crate::util::*;
use clap::builder::{RangedU64ValueParser, StringValueParser, TypedValueParser, ValueParser};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand, ValueEnum};
use more_asserts::assert_le;
use pbr::ProgressBar;
use prettytable::{Cell, Row, Table};
use rand::{thread_rng, Rng};
use serde::Serialize;
use serde_variant::to_variant_name;
use std::env;

const TEST_EACH_ROUNDS: usize = 20;

#[derive(Parser, Clone)]
#[clap(author = clap::crate_authors!(", "))]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Indexed min-priority queue with decrease-key, plus its benchmark and differential test drivers")]
#[clap(color = clap::ColorChoice::Auto)]
#[clap(propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
#[allow(clippy::large_enum_variant)]
enum Commands {
    /// benchmark the speed of random operation workloads
    Benchmark(BenchmarkParameters),
    /// built-in tests
    Test {
        #[clap(subcommand)]
        command: TestCommands,
    },
    /// print the most commonly reported WCAG recommendations
    Report(ReportParameters),
}

#[derive(Parser, Clone)]
pub struct BenchmarkParameters {
    /// elements are drawn from `0..elements`
    #[clap(short = 'n', long, default_value_t = 1000, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    elements: usize,
    /// operations applied in each round
    #[clap(short = 'o', long, default_value_t = 10000)]
    operations: usize,
    /// the number of rounds to run
    #[clap(short = 'r', long, default_value_t = 100)]
    total_rounds: usize,
    /// select the queue implementation
    #[clap(short = 'q', long, value_enum, default_value_t = QueueType::IndexedHeap)]
    queue_type: QueueType,
    /// the operation mix, see `DifferentialConfig`; `max_element` is overwritten by `--elements`
    #[clap(long, default_value_t = json!({}), value_parser = ValueParser::new(SerdeJsonParser))]
    config: serde_json::Value,
    /// message on the progress bar
    #[clap(long, default_value_t = format!(""))]
    pb_message: String,
    /// use a deterministic seed instead of a random one
    #[clap(long)]
    seed: Option<u64>,
    /// the benchmark profile output file path
    #[clap(long)]
    benchmark_profiler_output: Option<String>,
    /// do not show the progress bar, also enabled by the `DISABLE_PROGRESS_BAR` environment variable
    #[clap(long, action)]
    disable_progress_bar: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum TestCommands {
    /// test common cases
    Common,
    /// compare a queue against the unsorted list on random operations
    Differential {
        /// print out the command to test
        #[clap(short = 'c', long, action)]
        print_command: bool,
        /// the number of independent rounds
        #[clap(short = 'r', long, default_value_t = 100)]
        rounds: usize,
        /// operations in each round before draining
        #[clap(short = 's', long, default_value_t = 1000)]
        steps: usize,
        /// the seed of the first round, random if not provided
        #[clap(long)]
        seed: Option<u64>,
        /// select the queue implementation
        #[clap(short = 'q', long, value_enum, default_value_t = QueueType::IndexedHeap)]
        queue_type: QueueType,
        /// the configuration of the operation generator
        #[clap(long, default_value_t = json!({}), value_parser = ValueParser::new(SerdeJsonParser))]
        config: serde_json::Value,
    },
}

#[derive(Parser, Clone)]
pub struct ReportParameters {
    /// tab-separated file of `<dotted index>\t<title>` lines
    #[clap(long, default_value_t = format!("data/wcag.tsv"))]
    definitions: String,
    /// directory of reports, walked recursively
    #[clap(long, default_value_t = format!("data/reports"))]
    reports: String,
    /// how many tags to print
    #[clap(short = 'k', long, default_value_t = 3)]
    top: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum QueueType {
    /// binary heap with an element-to-slot index
    IndexedHeap,
    /// linear scans over an unordered vector
    UnsortedList,
    /// the `priority-queue` crate
    PriorityQueue,
}

#[derive(Clone)]
struct SerdeJsonParser;
impl TypedValueParser for SerdeJsonParser {
    type Value = serde_json::Value;
    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let inner = StringValueParser::new();
        let val = inner.parse_ref(cmd, arg, value)?;
        match serde_json::from_str::<serde_json::Value>(&val) {
            Ok(vector) => Ok(vector),
            Err(error) => {
                let mut err = clap::Error::new(ErrorKind::ValueValidation).with_cmd(cmd);
                if let Some(arg) = arg {
                    err.insert(ContextKind::InvalidArg, ContextValue::String(arg.to_string()));
                }
                err.insert(
                    ContextKind::InvalidValue,
                    ContextValue::String(format!("should be like {{\"a\":1}}, parse error: {error}")),
                );
                Err(err)
            }
        }
    }
}

impl QueueType {
    fn run_benchmark(&self, workload: &mut BenchmarkWorkload) {
        match self {
            Self::IndexedHeap => workload.run::<IndexedMinHeap<Element>>(),
            Self::UnsortedList => workload.run::<UnsortedListMinPQ<Element>>(),
            Self::PriorityQueue => workload.run::<PriorityQueueMinPQ<Element>>(),
        }
    }

    fn run_differential(&self, config: &DifferentialConfig, rounds: usize, steps: usize, seed: u64) -> Result<(), String> {
        match self {
            Self::IndexedHeap => {
                run_differential_rounds::<IndexedMinHeap<Element>, UnsortedListMinPQ<Element>>(config, rounds, steps, seed)
            }
            Self::UnsortedList => {
                run_differential_rounds::<UnsortedListMinPQ<Element>, UnsortedListMinPQ<Element>>(config, rounds, steps, seed)
            }
            Self::PriorityQueue => {
                run_differential_rounds::<PriorityQueueMinPQ<Element>, UnsortedListMinPQ<Element>>(config, rounds, steps, seed)
            }
        }
    }

    fn run_common_scenarios(&self) {
        match self {
            Self::IndexedHeap => common_scenarios::<IndexedMinHeap<&'static str>>(),
            Self::UnsortedList => common_scenarios::<UnsortedListMinPQ<&'static str>>(),
            Self::PriorityQueue => common_scenarios::<PriorityQueueMinPQ<&'static str>>(),
        }
    }
}

/// the two concrete scenarios every queue must pass
pub fn common_scenarios<T: MinPQ<&'static str> + Default>() {
    let mut queue = T::default();
    queue.add_all([("a", 5.), ("b", 2.), ("c", 8.)]).unwrap();
    assert_eq!(queue.remove_min(), Ok("b"));
    queue.change_priority(&"c", 1.).unwrap();
    assert_eq!(queue.remove_min(), Ok("c"));
    assert_eq!(queue.remove_min(), Ok("a"));
    assert!(queue.is_empty());
    let mut queue = T::default();
    queue.add("x", 1.).unwrap();
    assert_eq!(queue.add("x", 2.), Err(MinPQError::DuplicateElement));
    assert_eq!(queue.get_priority(&"x"), Ok(1.));
    assert_eq!(queue.get_priority(&"y"), Err(MinPQError::NotFound));
    assert_eq!(queue.remove_min(), Ok("x"));
    assert_eq!(queue.remove_min(), Err(MinPQError::Empty));
    queue.sanity_check().unwrap();
}

struct BenchmarkWorkload {
    config: DifferentialConfig,
    operations: usize,
    total_rounds: usize,
    seed: u64,
    benchmark_profiler: BenchmarkProfiler,
    pb: Option<ProgressBar<std::io::Stderr>>,
    pb_message: String,
    /// operations that returned an error, e.g. adding an element already present
    failed_operations: usize,
}

impl BenchmarkWorkload {
    fn run<T: MinPQ<Element> + Default>(&mut self) {
        let mut generator = OperationGenerator::new(self.config.clone(), self.seed);
        for round in 0..self.total_rounds as u64 {
            if let Some(pb) = self.pb.as_mut() {
                pb.set(round);
            }
            // generate first so that only queue operations are timed
            let operations: Vec<QueueOperation> = (0..self.operations).map(|_| generator.next_operation()).collect();
            let mut queue = T::default();
            self.benchmark_profiler.begin(operations.len());
            for operation in operations.iter() {
                if operation.apply(&mut queue).is_err() {
                    self.failed_operations += 1;
                }
            }
            self.benchmark_profiler.event("applied".to_string());
            let remaining = queue.size();
            let drained = queue.into_sorted_elements();
            self.benchmark_profiler.event("drained".to_string());
            self.benchmark_profiler
                .end()
                .expect("failed to write the benchmark profiler output");
            assert_eq!(drained.len(), remaining, "bug: draining lost elements || the seed is {}", self.seed);
            if let Some(pb) = self.pb.as_mut() {
                if self.pb_message.is_empty() {
                    pb.message(format!("{} ", self.benchmark_profiler.brief()).as_str());
                }
            }
        }
    }
}

impl Cli {
    pub fn run(self) {
        match self.command {
            Commands::Benchmark(BenchmarkParameters {
                elements,
                operations,
                total_rounds,
                queue_type,
                config,
                pb_message,
                seed,
                benchmark_profiler_output,
                disable_progress_bar,
            }) => {
                // whether to disable progress bar, useful when running jobs in background
                let disable_progress_bar = disable_progress_bar || env::var("DISABLE_PROGRESS_BAR").is_ok();
                let mut config: DifferentialConfig = serde_json::from_value(config).expect("invalid workload config");
                config.max_element = elements;
                let seed = seed.unwrap_or_else(|| thread_rng().gen());
                let header = json!({
                    "queue_type": to_variant_name(&queue_type).unwrap(),
                    "elements": elements,
                    "operations": operations,
                    "total_rounds": total_rounds,
                    "seed": seed,
                    "config": config,
                });
                let benchmark_profiler =
                    BenchmarkProfiler::new(header, benchmark_profiler_output).expect("cannot create the benchmark profiler output");
                // prepare progress bar display
                let pb = if !disable_progress_bar {
                    let mut pb = ProgressBar::on(std::io::stderr(), total_rounds as u64);
                    pb.message(format!("{pb_message} ").as_str());
                    Some(pb)
                } else {
                    if !pb_message.is_empty() {
                        print!("{pb_message} ");
                    }
                    None
                };
                let mut workload = BenchmarkWorkload {
                    config,
                    operations,
                    total_rounds,
                    seed,
                    benchmark_profiler,
                    pb,
                    pb_message,
                    failed_operations: 0,
                };
                queue_type.run_benchmark(&mut workload);
                if disable_progress_bar {
                    // always print out brief
                    println!("{}", workload.benchmark_profiler.brief());
                } else {
                    if let Some(pb) = workload.pb.as_mut() {
                        pb.finish()
                    }
                    println!();
                }
                assert_le!(workload.failed_operations, workload.benchmark_profiler.sum_operations);
                eprintln!("total round time {:?}", workload.benchmark_profiler.sum_round_time);
                eprintln!("failed operations {}", workload.failed_operations);
            }
            Commands::Test { command } => match command {
                TestCommands::Common => {
                    for queue_type in QueueType::value_variants() {
                        println!("[Common Test] scenarios on {}", to_variant_name(queue_type).unwrap());
                        queue_type.run_common_scenarios();
                    }
                    for queue_type in [QueueType::IndexedHeap, QueueType::PriorityQueue] {
                        for priority_levels in [None, Some(4)] {
                            let config = json!({ "priority_levels": priority_levels });
                            println!(
                                "[Common Test] differential on {} with {}",
                                to_variant_name(&queue_type).unwrap(),
                                config
                            );
                            execute_in_cli(
                                [
                                    "".to_owned(),
                                    "test".to_owned(),
                                    "differential".to_owned(),
                                    "--rounds".to_owned(),
                                    format!("{TEST_EACH_ROUNDS}"),
                                    "--queue-type".to_owned(),
                                    to_variant_name(&queue_type).unwrap().to_owned(),
                                    "--config".to_owned(),
                                    serde_json::to_string(&config).unwrap(),
                                ]
                                .iter(),
                                true,
                            );
                        }
                    }
                }
                TestCommands::Differential {
                    print_command,
                    rounds,
                    steps,
                    seed,
                    queue_type,
                    config,
                } => {
                    let config: DifferentialConfig = serde_json::from_value(config).expect("invalid differential config");
                    let seed = seed.unwrap_or_else(|| thread_rng().gen());
                    if print_command {
                        println!(
                            "[differential] {} rounds of {steps} steps starting from seed {seed}, config {}",
                            rounds,
                            serde_json::to_string(&config).unwrap()
                        );
                    }
                    if let Err(message) = queue_type.run_differential(&config, rounds, steps, seed) {
                        panic!("bug: {} disagrees with the unsorted list: {message}", to_variant_name(&queue_type).unwrap());
                    }
                    println!("[differential] {rounds} rounds passed");
                }
            },
            Commands::Report(ReportParameters {
                definitions,
                reports,
                top,
            }) => {
                let definitions = load_definitions(&definitions).expect("cannot read the definitions file");
                let tags = load_report_tags(&reports).expect("cannot read the reports directory");
                let frequencies = most_common(&tags, top).expect("tags are unique keys with finite priorities");
                let mut table = Table::new();
                let mut title = Row::empty();
                for name in ["rank", "tag", "count", "title"] {
                    title.add_cell(Cell::new(name).style_spec("b"));
                }
                table.set_titles(title);
                for (rank, TagFrequency { tag, count }) in frequencies.iter().enumerate() {
                    let description = definitions
                        .iter()
                        .find(|(index, _)| index == tag)
                        .map(|(_, title)| title.as_str())
                        .unwrap_or("");
                    let mut row = Row::empty();
                    row.add_cell(Cell::new(&format!("{}", rank + 1)));
                    row.add_cell(Cell::new(tag));
                    row.add_cell(Cell::new(&format!("{count}")));
                    row.add_cell(Cell::new(description));
                    table.add_row(row);
                }
                println!("{} tags found in {reports}", tags.len());
                table.printstd();
            }
        }
    }
}

pub fn execute_in_cli<'a>(iter: impl Iterator<Item = &'a String> + Clone, print_command: bool) {
    if print_command {
        print!("[command]");
        for word in iter.clone() {
            if word.contains(char::is_whitespace) {
                print!("'{word}' ")
            } else {
                print!("{word} ")
            }
        }
        println!();
    }
    Cli::parse_from(iter).run();
}
