//! arbgen - render the demo channel set to AWG sample files
//!
//! Run with: cargo run -- --out-dir ./out

use std::path::PathBuf;

use arbgen::{Arbgen, ArbgenConfig, EdgeShape, Pulse, Sinusoid};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;

#[derive(Parser)]
#[command(about = "Render the demo waveforms as raw 8-bit AWG sample files")]
struct Args {
    /// Output sample rate in samples/second
    #[arg(long, default_value_t = 100e6)]
    sample_rate: f64,

    /// Number of waveform repetitions per file
    #[arg(long, default_value_t = 1)]
    cycles: usize,

    /// Directory receiving chan0.dat, chan1.dat and chan2.dat
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Pre-emphasize against the DAC's zero-order-hold roll-off
    #[arg(long, default_value_t = false)]
    pre_equalize: bool,

    /// Tap count of the pre-equalizer (odd)
    #[arg(long, default_value_t = 7)]
    taps: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let args = Args::parse();

    let config = ArbgenConfig::default()
        .with_channels(3)
        .with_pre_equalize(args.pre_equalize)
        .with_equalization_taps(args.taps);
    let mut arb = Arbgen::new(config)?;

    // 400 ns Gaussian-edged pulse with 100 ns transitions
    arb.channel(0)?
        .value(0.0)
        .delay(200e-9)?
        .pos_pulse(Pulse::new(EdgeShape::Gaussian, 100e-9, 100e-9, 400e-9, 1.0))?
        .delay(200e-9)?;

    // 20 ns square pulse on a 0.1 pedestal
    arb.channel(1)?
        .value(0.1)
        .delay(300e-9)?
        .pos_pulse(Pulse::new(EdgeShape::Square, 100e-9, 100e-9, 20e-9, 1.0))?
        .delay(200e-9)?;

    // two sine cycles across the shared period, landing on the sample grid
    let period = arb.find_period()?;
    let samples = args.sample_rate * period;
    let frequency = 2.0 * (samples - 1.0) / samples / period;
    arb.channel(2)?.sine(Sinusoid::new(frequency, 0.0, 0.5, 0.5));

    std::fs::create_dir_all(&args.out_dir)
        .wrap_err_with(|| format!("creating {}", args.out_dir.display()))?;

    for channel in 0..arb.channel_count() {
        let path = args.out_dir.join(format!("chan{channel}.dat"));
        arb.save(&path, channel, args.sample_rate, args.cycles)
            .wrap_err_with(|| format!("rendering channel {channel}"))?;
    }

    info!(
        "period {:.1} ns at {:.0} S/s, {} cycle(s)",
        period * 1e9,
        args.sample_rate,
        args.cycles
    );
    Ok(())
}
