use std::hash::BuildHasher;

use clap::Parser;
use mad_hash::GrowthPolicy;
use mad_hash::HashMap;
use mad_hash::HashTable;
use mad_hash::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    #[arg(short = 'l', long = "max_load", default_value_t = 70)]
    max_load_percent: usize,

    #[arg(short = 'r', long = "growth_ratio", default_value_t = 2.0)]
    growth_ratio: f64,
}

fn main() {
    let args = Args::parse();
    let policy = GrowthPolicy::new(args.max_load_percent, args.growth_ratio);
    let hasher = std::hash::RandomState::new();

    println!(
        "Filling a HashTable with {} u64 values ({}% max load, x{} growth)",
        args.entries, args.max_load_percent, args.growth_ratio
    );

    let mut table: HashTable<u64> = HashTable::with_policy(policy);
    let mut grow_events = 0;
    for value in 0..args.entries as u64 {
        let capacity = table.capacity();
        let hash = hasher.hash_one(value);
        match table.entry(hash, |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => panic!("Value already exists in table: {value}"),
        }
        if table.capacity() != capacity {
            grow_events += 1;
        }
    }

    println!(
        "Inserted {} values, {} slots after {} grow events",
        table.len(),
        table.capacity(),
        grow_events
    );
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.probe_histogram().print();
    table.debug_stats().print();

    println!("Removing every third value...");
    for value in (0..args.entries as u64).step_by(3) {
        table.remove(hasher.hash_one(value), |&v| v == value);
    }
    table.debug_stats().print();

    let words: HashMap<String, usize> = (0..args.entries)
        .map(|i| (format!("word_{i}"), i))
        .collect();
    println!("String-keyed map with the default hasher:");
    words.debug_stats().print();
}
