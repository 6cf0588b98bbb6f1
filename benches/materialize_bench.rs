// Benchmarks for the derived sequence operations.
//
// Each group compares a `Vec` baseline against the same work done through
// the skeletal primitives:
// - to_vec: snapshotting through the materializer
// - traversal: borrowing iterator vs detached cursor
// - sort: fallible merge sort written back through a list cursor
// - random_edits: inserts and removals at random positions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skeletal::{ArraySeq, InlineSeq, Sequence, SequenceExt};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn random_values(size: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    return (0..size).map(|_| rng.gen_range(0..1_000_000)).collect();
}

// =============================================================================
// Snapshots
// =============================================================================

fn bench_to_vec(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_vec");

    for size in SIZES {
        let values = random_values(size, 7);
        let array = ArraySeq::from(values.clone());
        let inline: InlineSeq<[u64; 16]> = values.iter().copied().collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &values, |b, values| {
            b.iter(|| black_box(values.clone()));
        });
        group.bench_with_input(BenchmarkId::new("ArraySeq", size), &array, |b, array| {
            b.iter(|| black_box(array.to_vec()));
        });
        group.bench_with_input(BenchmarkId::new("InlineSeq", size), &inline, |b, inline| {
            b.iter(|| black_box(inline.to_vec()));
        });
    }

    group.finish();
}

// =============================================================================
// Traversal
// =============================================================================

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for size in SIZES {
        let array = ArraySeq::from(random_values(size, 11));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("slice_iter", size), &array, |b, array| {
            b.iter(|| black_box(array.as_slice().iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("Iter", size), &array, |b, array| {
            b.iter(|| black_box(array.iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("Cursor", size), &array, |b, array| {
            b.iter(|| {
                let mut cursor = array.cursor();
                let mut sum = 0u64;
                while cursor.has_next(array) {
                    if let Ok(x) = cursor.next(array) {
                        sum += x;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Sorting
// =============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in SIZES {
        let values = random_values(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &values, |b, values| {
            b.iter(|| {
                let mut v = values.clone();
                v.sort();
                black_box(v)
            });
        });
        group.bench_with_input(BenchmarkId::new("ArraySeq", size), &values, |b, values| {
            b.iter(|| {
                let mut seq = ArraySeq::from(values.clone());
                let _ = seq.sort();
                black_box(seq)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Random edits
// =============================================================================

fn apply_random_edits<S: Sequence<Item = u64> + ?Sized>(seq: &mut S, count: usize, rng: &mut StdRng) {
    for i in 0..count {
        let len = seq.len();
        if len == 0 || rng.gen_bool(0.6) {
            let pos = rng.gen_range(0..=len);
            let _ = seq.insert(pos, i as u64);
        } else {
            let pos = rng.gen_range(0..len);
            let _ = seq.remove_at(pos);
        }
    }
}

fn bench_random_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_edits");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ArraySeq", size), &size, |b, &size| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let mut seq = ArraySeq::new();
                apply_random_edits(&mut seq, size, &mut rng);
                black_box(seq.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("InlineSeq", size), &size, |b, &size| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let mut seq: InlineSeq<[u64; 16]> = InlineSeq::new();
                apply_random_edits(&mut seq, size, &mut rng);
                black_box(seq.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_to_vec, bench_traversal, bench_sort, bench_random_edits);

criterion_main!(benches);
