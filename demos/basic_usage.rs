//! Basic usage: build, query, dump, and persist an index.
//!
//! Run with `RUST_LOG=debug` to see the library's tracing events.

use s2ds::{Config, Index, RandomSource, Record, Time};
use tracing_subscriber::EnvFilter;

fn main() -> s2ds::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    example_manual()?;
    example_generated()?;
    Ok(())
}

fn example_manual() -> s2ds::Result<()> {
    println!("=== Manual inserts ===\n");

    let mut index = Index::new();
    index.insert(&Record::new("Alice Smith", 1))?;
    index.insert(&Record::new("Bob Smith", 2).with_time(Time::new(9, 30, 0)))?;

    println!("Alice Smith = {:?}", index.find("Alice Smith"));
    println!("Count: {}", index.len());

    match index.insert(&Record::new("Alice Smith", 3)) {
        Ok(()) => println!("unexpected: duplicate accepted"),
        Err(err) => println!("Second insert: {err}"),
    }
    match index.insert(&Record::new("Alice", 4)) {
        Ok(()) => println!("unexpected: malformed id accepted"),
        Err(err) => println!("Malformed insert: {err}"),
    }

    index.remove("Alice Smith")?;
    println!("After remove: {} record(s)\n{index}", index.len());
    Ok(())
}

fn example_generated() -> s2ds::Result<()> {
    println!("=== Generated index ===\n");

    let mut source = RandomSource::seeded(2024);
    let index = Index::generate(20, &mut source, &Config::default())?;
    println!("Groups: {}", index.letters().collect::<String>());
    print!("{index}");

    let path = std::env::temp_dir().join("s2ds-demo.bin");
    index.write(&path)?;
    let back = Index::from_file(&path)?;
    println!("\nRound trip through {}: equal = {}", path.display(), back == index);
    std::fs::remove_file(&path)?;
    Ok(())
}
