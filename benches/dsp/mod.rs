//! Benchmarks for low-level numerics.

mod edge;
mod equalizer;

pub use edge::bench_edge;
pub use equalizer::bench_equalizer;
