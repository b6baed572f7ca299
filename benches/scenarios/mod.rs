//! End-to-end channel rendering benchmarks.

mod pulse;

pub use pulse::bench_pulse;
