use criterion::{black_box, criterion_group, criterion_main, BatchSize, Bencher, Criterion};
use minpq::differential::{DifferentialConfig, OperationGenerator, QueueOperation};
use minpq::util::{DeterministicRng, F64Rng, Priority};
use minpq::{IndexedMinHeap, MinPQ, PriorityQueueMinPQ, UnsortedListMinPQ};
use rand::SeedableRng;

const SIZE: usize = 1000;

fn random_priorities(seed: u64) -> Vec<(usize, Priority)> {
    let mut rng = DeterministicRng::seed_from_u64(seed);
    (0..SIZE).map(|element| (element, rng.next_f64())).collect()
}

fn filled<T: MinPQ<usize> + Default>() -> T {
    let mut heap = T::default();
    heap.add_all(random_priorities(1)).unwrap();
    heap
}

fn add_benchmark<T: MinPQ<usize> + Default>(b: &mut Bencher) {
    let pairs = random_priorities(1);
    b.iter_batched(
        T::default,
        |mut heap| {
            pairs
                .iter()
                .for_each(|&(element, priority)| heap.add(black_box(element), black_box(priority)).unwrap())
        },
        BatchSize::SmallInput,
    );
}

fn remove_min_benchmark<T: MinPQ<usize> + Default>(b: &mut Bencher) {
    b.iter_batched(
        filled::<T>,
        |mut heap| {
            while let Ok(element) = heap.remove_min() {
                black_box(element);
            }
        },
        BatchSize::SmallInput,
    );
}

fn decrease_key_benchmark<T: MinPQ<usize> + Default>(b: &mut Bencher) {
    b.iter_batched(
        filled::<T>,
        |mut heap| {
            for element in 0..SIZE {
                heap.change_priority(&element, black_box(-(element as Priority))).unwrap();
            }
        },
        BatchSize::SmallInput,
    );
}

fn mixed_workload_benchmark<T: MinPQ<usize> + Default>(b: &mut Bencher) {
    let config = DifferentialConfig {
        max_element: SIZE,
        ..Default::default()
    };
    let mut generator = OperationGenerator::new(config, 7);
    let operations: Vec<QueueOperation> = (0..10 * SIZE).map(|_| generator.next_operation()).collect();
    b.iter_batched(
        T::default,
        |mut heap| {
            for operation in operations.iter() {
                let _ = operation.apply(&mut heap);
            }
        },
        BatchSize::SmallInput,
    );
}

fn indexed_heap_from_priorities_benchmark(b: &mut Bencher) {
    let pairs = random_priorities(1);
    b.iter_batched(
        || pairs.clone(),
        |pairs| IndexedMinHeap::from_priorities(pairs).unwrap(),
        BatchSize::SmallInput,
    );
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("IndexedMinHeap.add", add_benchmark::<IndexedMinHeap<usize>>);
    c.bench_function("IndexedMinHeap.remove_min", remove_min_benchmark::<IndexedMinHeap<usize>>);
    c.bench_function("IndexedMinHeap.change_priority", decrease_key_benchmark::<IndexedMinHeap<usize>>);
    c.bench_function("IndexedMinHeap.mixed", mixed_workload_benchmark::<IndexedMinHeap<usize>>);
    c.bench_function("IndexedMinHeap.from_priorities", indexed_heap_from_priorities_benchmark);
    c.bench_function("PriorityQueueMinPQ.add", add_benchmark::<PriorityQueueMinPQ<usize>>);
    c.bench_function("PriorityQueueMinPQ.remove_min", remove_min_benchmark::<PriorityQueueMinPQ<usize>>);
    c.bench_function("PriorityQueueMinPQ.change_priority", decrease_key_benchmark::<PriorityQueueMinPQ<usize>>);
    c.bench_function("PriorityQueueMinPQ.mixed", mixed_workload_benchmark::<PriorityQueueMinPQ<usize>>);
    c.bench_function("UnsortedListMinPQ.remove_min", remove_min_benchmark::<UnsortedListMinPQ<usize>>);
    c.bench_function("UnsortedListMinPQ.mixed", mixed_workload_benchmark::<UnsortedListMinPQ<usize>>);
}

criterion_group!(indexed_heap, criterion_benchmark);
criterion_main!(indexed_heap);
