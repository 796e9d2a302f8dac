use core::hash::Hash;
use core::hash::Hasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use mad_hash::BoundedHashMap;
use mad_hash::HashTable as MadHashTable;
use mad_hash::hash_table::Entry as MadEntry;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

trait KeyValuePair: Clone {
    fn new(key: u64) -> Self;

    fn hash_key(&self) -> u64;
    fn eq_key(&self, other: &Self) -> bool;
}

fn sip_hash(value: impl Hash) -> u64 {
    let mut hasher = SipHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[derive(Clone)]
struct SmallItem {
    key: u64,
}

impl KeyValuePair for SmallItem {
    fn new(key: u64) -> Self {
        black_box(Self { key })
    }

    fn hash_key(&self) -> u64 {
        sip_hash(self.key)
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

#[derive(Clone)]
struct StringItem {
    key: String,
    _value: u64,
}

impl KeyValuePair for StringItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key: format!("key_{key:016X}"),
            _value: key,
        })
    }

    fn hash_key(&self) -> u64 {
        sip_hash(&self.key)
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

const SIZES: &[usize] = &[
    (1 << 8),
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

fn random_items<Item: KeyValuePair>(count: usize) -> Vec<(u64, Item)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let item = Item::new(rng.try_next_u64().unwrap());
            (item.hash_key(), item)
        })
        .collect()
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut SmallRng::from_os_rng());
    items
}

fn fill_mad<Item: KeyValuePair>(items: &[(u64, Item)], reserve: bool) -> MadHashTable<Item> {
    let mut table = MadHashTable::new();
    if reserve {
        table.reserve(items.len());
    }
    for (hash, item) in items {
        match table.entry(*hash, |v: &Item| v.eq_key(item)) {
            MadEntry::Vacant(entry) => {
                black_box(entry.insert(item.clone()));
            }
            MadEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn fill_hashbrown<Item: KeyValuePair>(
    items: &[(u64, Item)],
    reserve: bool,
) -> HashbrownHashTable<Item> {
    let mut table = HashbrownHashTable::with_capacity(if reserve { items.len() } else { 0 });
    for (hash, item) in items {
        match table.entry(*hash, |v: &Item| v.eq_key(item), |v| v.hash_key()) {
            HashbrownEntry::Vacant(entry) => {
                black_box(entry.insert(item.clone()));
            }
            HashbrownEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn bench_insert<Item: KeyValuePair, const RESERVE: bool>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_{}_{}",
        if RESERVE { "reserved" } else { "growing" },
        core::any::type_name::<Item>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_items::<Item>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mad_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&items),
                |items| black_box(fill_mad(&items, RESERVE)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&items),
                |items| black_box(fill_hashbrown(&items, RESERVE)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find<Item: KeyValuePair, const HIT: bool>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_{}_{}",
        if HIT { "hit" } else { "miss" },
        core::any::type_name::<Item>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_items::<Item>(size);
        let probes = if HIT {
            shuffled(&items)
        } else {
            random_items::<Item>(size)
        };

        let mad = fill_mad(&items, false);
        let hashbrown = fill_hashbrown(&items, false);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mad_hash/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &probes {
                    black_box(mad.find(*hash, |v| v.eq_key(item)));
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &probes {
                    black_box(hashbrown.find(*hash, |v| v.eq_key(item)));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<Item: KeyValuePair>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_items::<Item>(size);
        let order = shuffled(&items);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mad_hash/{size}"), |b| {
            b.iter_batched(
                || fill_mad(&items, false),
                |mut table| {
                    for (hash, item) in &order {
                        black_box(table.remove(*hash, |v| v.eq_key(item)));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || fill_hashbrown(&items, false),
                |mut table| {
                    for (hash, item) in &order {
                        let removed = table
                            .find_entry(*hash, |v| v.eq_key(item))
                            .ok()
                            .map(|entry| entry.remove().0);
                        black_box(removed);
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<Item: KeyValuePair>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_items::<Item>(size);
        let mad = fill_mad(&items, false);
        let hashbrown = fill_hashbrown(&items, false);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mad_hash/{size}"), |b| {
            b.iter(|| {
                for item in mad.iter() {
                    black_box(item);
                }
            })
        });

        group.bench_function(format!("mad_hash_cursor/{size}"), |b| {
            b.iter(|| {
                let mut cursor = mad.cursor_front();
                while let Some(item) = cursor.get() {
                    black_box(item);
                    cursor.move_next();
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for item in hashbrown.iter() {
                    black_box(item);
                }
            })
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Find,
    Remove,
}

fn bench_mixed_zipf<Item: KeyValuePair>(c: &mut Criterion) {
    const KEY_SPACE_MULTIPLIER: f32 = 2.0;

    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let mut rng = SmallRng::from_os_rng();
        let op_distr = Zipf::new(3.0, 1.0).unwrap();
        let key_distr = Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER - 1.0, 1.0).unwrap();

        let workload = (0..size * 3)
            .map(|_| {
                let op: f64 = rng.sample(op_distr);
                let op = if op <= 1.0 {
                    Operation::Find
                } else if op <= 2.0 {
                    Operation::Insert
                } else {
                    Operation::Remove
                };
                let item = Item::new(rng.sample(key_distr) as u64);
                (op, item.hash_key(), item)
            })
            .collect::<Vec<_>>();
        group.throughput(Throughput::Elements(workload.len() as u64));

        group.bench_function(format!("mad_hash/{size}"), |b| {
            b.iter(|| {
                let mut table = MadHashTable::<Item>::new();
                for (op, hash, item) in &workload {
                    match op {
                        Operation::Insert => match table.entry(*hash, |v| v.eq_key(item)) {
                            MadEntry::Vacant(entry) => {
                                black_box(entry.insert(item.clone()));
                            }
                            MadEntry::Occupied(mut entry) => {
                                *entry.get_mut() = item.clone();
                            }
                        },
                        Operation::Find => {
                            black_box(table.find(*hash, |v| v.eq_key(item)));
                        }
                        Operation::Remove => {
                            black_box(table.remove(*hash, |v| v.eq_key(item)));
                        }
                    }
                }
                black_box(table)
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut table = HashbrownHashTable::<Item>::with_capacity(0);
                for (op, hash, item) in &workload {
                    match op {
                        Operation::Insert => {
                            match table.entry(*hash, |v| v.eq_key(item), |v| v.hash_key()) {
                                HashbrownEntry::Vacant(entry) => {
                                    black_box(entry.insert(item.clone()));
                                }
                                HashbrownEntry::Occupied(mut entry) => {
                                    *entry.get_mut() = item.clone();
                                }
                            }
                        }
                        Operation::Find => {
                            black_box(table.find(*hash, |v| v.eq_key(item)));
                        }
                        Operation::Remove => {
                            let removed = table
                                .find_entry(*hash, |v| v.eq_key(item))
                                .ok()
                                .map(|entry| entry.remove().0);
                            black_box(removed);
                        }
                    }
                }
                black_box(table)
            })
        });
    }

    group.finish();
}

fn bench_bounded_lookup(c: &mut Criterion) {
    const KEYWORDS: [&str; 24] = [
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
        "return", "struct",
    ];

    let mut group = c.benchmark_group("keyword_lookup");

    let bounded: BoundedHashMap<&str, usize, 32> = KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, &word)| (word, i))
        .collect();
    let growable: mad_hash::HashMap<&str, usize> = KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, &word)| (word, i))
        .collect();
    let std_map: std::collections::HashMap<&str, usize> = KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, &word)| (word, i))
        .collect();
    let hashbrown: hashbrown::HashMap<&str, usize> = KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, &word)| (word, i))
        .collect();

    let tokens = shuffled(
        &KEYWORDS
            .iter()
            .copied()
            .chain(["x", "y", "value", "self_", "foo", "bar"])
            .collect::<Vec<_>>(),
    );
    group.throughput(Throughput::Elements(tokens.len() as u64));

    group.bench_function("mad_hash_bounded", |b| {
        b.iter(|| {
            for token in &tokens {
                black_box(bounded.get(token));
            }
        })
    });
    group.bench_function("mad_hash", |b| {
        b.iter(|| {
            for token in &tokens {
                black_box(growable.get(token));
            }
        })
    });
    group.bench_function("std", |b| {
        b.iter(|| {
            for token in &tokens {
                black_box(std_map.get(token));
            }
        })
    });
    group.bench_function("hashbrown", |b| {
        b.iter(|| {
            for token in &tokens {
                black_box(hashbrown.get(token));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert::<SmallItem, false>,
    bench_insert::<StringItem, false>,
    bench_insert::<SmallItem, true>,
    bench_insert::<StringItem, true>,
    bench_find::<SmallItem, true>,
    bench_find::<StringItem, true>,
    bench_find::<SmallItem, false>,
    bench_find::<StringItem, false>,
    bench_remove::<SmallItem>,
    bench_remove::<StringItem>,
    bench_iteration::<SmallItem>,
    bench_iteration::<StringItem>,
    bench_mixed_zipf::<SmallItem>,
    bench_mixed_zipf::<StringItem>,
    bench_bounded_lookup,
);

criterion_main!(benches);
