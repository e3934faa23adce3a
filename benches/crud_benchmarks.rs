use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use garnet_tree::{TreeMap, TreeSet};
use std::collections::{BTreeMap, BTreeSet};

const N: usize = 10_000;

type Compare = fn(&[u8], &[u8]) -> std::cmp::Ordering;

fn new_set() -> TreeSet<Compare> {
    TreeSet::new(8, |a, b| a.cmp(b))
}

fn new_map() -> TreeMap<Compare> {
    TreeMap::new(8, 8, |a, b| a[..8].cmp(&b[..8]))
}

fn entry(key: u64, value: u64) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&key.to_be_bytes());
    bytes[8..].copy_from_slice(&value.to_be_bytes());
    bytes
}

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<u64> {
    (0..n as u64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<u64> {
    (0..n as u64).rev().collect()
}

fn random_keys(n: usize) -> Vec<u64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push(x >> 33);
    }
    keys
}

fn filled_set(keys: &[u64]) -> TreeSet<Compare> {
    let mut set = new_set();
    for &k in keys {
        let _ = set.insert(&k.to_be_bytes());
    }
    set
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion, name: &str, keys: &[u64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("TreeSet", N), |b| {
        b.iter(|| {
            let mut set = new_set();
            for &k in keys {
                let _ = set.insert(&k.to_be_bytes());
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_set_insert_ordered(c: &mut Criterion) {
    bench_set_insert(c, "set_insert_ordered", &ordered_keys(N));
}

fn bench_set_insert_reverse(c: &mut Criterion) {
    bench_set_insert(c, "set_insert_reverse", &reverse_ordered_keys(N));
}

fn bench_set_insert_random(c: &mut Criterion) {
    bench_set_insert(c, "set_insert_random", &random_keys(N));
}

fn bench_set_contains_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_set = filled_set(&keys);
    let bt_set: BTreeSet<u64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_contains_random");

    group.bench_function(BenchmarkId::new("TreeSet", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &k in &keys {
                if tree_set.contains(&k.to_be_bytes()) {
                    count += 1;
                }
            }
            count
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &k in &keys {
                if bt_set.contains(&k) {
                    count += 1;
                }
            }
            count
        });
    });

    group.finish();
}

fn bench_set_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("set_remove_random");

    group.bench_function(BenchmarkId::new("TreeSet", N), |b| {
        b.iter_batched(
            || filled_set(&keys),
            |mut set| {
                for &k in &keys {
                    let _ = set.remove(&k.to_be_bytes());
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<u64>>(),
            |mut set| {
                for &k in &keys {
                    set.remove(&k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_random");

    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter(|| {
            let mut map = new_map();
            for &k in &keys {
                let _ = map.insert(&entry(k, k));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut tree_map = new_map();
    for &k in &keys {
        let _ = tree_map.insert(&entry(k, k));
    }
    let bt_map: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &k in &keys {
                if let Ok(v) = tree_map.get(&k.to_be_bytes()) {
                    sum = sum.wrapping_add(u64::from_be_bytes(v.try_into().unwrap()));
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_set_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("map_set_random");

    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = new_map();
                for &k in &keys {
                    let _ = map.insert(&entry(k, k));
                }
                map
            },
            |mut map| {
                for &k in &keys {
                    let _ = map.set(&entry(k, 0));
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<u64, u64>>(),
            |mut map| {
                for &k in &keys {
                    map.insert(k, 0);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    set_insert_benches,
    bench_set_insert_ordered,
    bench_set_insert_reverse,
    bench_set_insert_random,
);

criterion_group!(set_lookup_benches, bench_set_contains_random, bench_set_remove_random,);

criterion_group!(map_benches, bench_map_insert_random, bench_map_get_random, bench_map_set_random,);

criterion_main!(set_insert_benches, set_lookup_benches, map_benches);
