use std::io;

use clap::Parser;
use parabolic_aim::core::{AngleWindow, STANDARD_GRAVITY_MPS2};
use parabolic_aim::logging;
use parabolic_aim::sweep::{GridAxis, SummarySweep, write_summary_table};
use parabolic_aim::table::{TableFormat, TableWriter};
use tracing::info;

/// Per-dx relative-angle and time statistics over randomly sampled muzzle speeds.
#[derive(Parser, Debug)]
#[command(name = "sweep_table", version)]
struct Args {
    /// Number of muzzle-speed samples per (dx, dy).
    #[arg(long, short = 'n', default_value_t = 100)]
    samples: usize,

    #[arg(long, default_value_t = 76.0)]
    vm_min: f64,

    #[arg(long, default_value_t = 99.0)]
    vm_max: f64,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    dx_min: f64,

    #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
    dx_max: f64,

    #[arg(long, default_value_t = 5.0)]
    dx_step: f64,

    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    dy_min: f64,

    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    dy_max: f64,

    #[arg(long, default_value_t = 1.0)]
    dy_step: f64,

    #[arg(long, default_value_t = STANDARD_GRAVITY_MPS2)]
    gravity: f64,

    /// Seed for muzzle-speed sampling; a random seed is logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Only count low arcs with 0 < theta < 90 degrees.
    #[arg(long)]
    ascending_only: bool,

    #[arg(long, short = 'f', value_enum, default_value_t = TableFormat::Csv)]
    format: TableFormat,
}

fn run(args: Args) -> anyhow::Result<()> {
    let dx = GridAxis::new("dx", args.dx_min, args.dx_max, args.dx_step)?;
    let dy = GridAxis::new("dy", args.dy_min, args.dy_max, args.dy_step)?;
    let mut sweep = SummarySweep::new(args.samples, args.vm_min, args.vm_max, dx, dy)?
        .with_gravity(args.gravity)?;
    if args.ascending_only {
        sweep = sweep.with_window(AngleWindow::ASCENDING_FORWARD);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "sampling muzzle speeds");
    let rows = sweep.run(seed);

    let mut table = TableWriter::new(args.format, io::stdout().lock());
    write_summary_table(&rows, &mut table)?;
    Ok(())
}

fn main() {
    logging::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
