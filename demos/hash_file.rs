//! File hashing example.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example hash_file -- /path/to/file [parallelism]

use std::env;
use std::fs::File;
use std::time::Instant;

use vsohash::{HasherConfig, hash_reader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let config = match args.next() {
        Some(n) => HasherConfig::new(n.parse()?)?,
        None => HasherConfig::default(),
    };

    let file = File::open(&path)?;
    let size = file.metadata()?.len();

    let start = Instant::now();
    let id = hash_reader(file, &config)?;
    let elapsed = start.elapsed();

    println!("{id}  {path}");
    println!(
        "{} bytes with {} workers in {:.2?} ({:.1} MiB/s)",
        size,
        config.parallelism(),
        elapsed,
        size as f64 / (1024.0 * 1024.0) / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}
