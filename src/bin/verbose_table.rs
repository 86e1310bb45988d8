use std::io;

use clap::Parser;
use parabolic_aim::core::{AngleWindow, STANDARD_GRAVITY_MPS2};
use parabolic_aim::logging;
use parabolic_aim::sweep::{GridAxis, VerboseSweep, write_verbose_table};
use parabolic_aim::table::{TableFormat, TableWriter};

/// Low-arc solution for every (dx, dy, Vm) grid point.
#[derive(Parser, Debug)]
#[command(name = "verbose_table", version)]
struct Args {
    #[arg(long, default_value_t = 76.0)]
    vm_min: f64,

    #[arg(long, default_value_t = 99.0)]
    vm_max: f64,

    #[arg(long, default_value_t = 1.0)]
    vm_step: f64,

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

    /// Treat low arcs outside 0 < theta < 90 degrees as NA.
    #[arg(long)]
    ascending_only: bool,

    #[arg(long, short = 'f', value_enum, default_value_t = TableFormat::Csv)]
    format: TableFormat,
}

fn run(args: Args) -> anyhow::Result<()> {
    let sweep = VerboseSweep::new(
        GridAxis::new("dx", args.dx_min, args.dx_max, args.dx_step)?,
        GridAxis::new("dy", args.dy_min, args.dy_max, args.dy_step)?,
        GridAxis::new("vm", args.vm_min, args.vm_max, args.vm_step)?,
    )?
    .with_gravity(args.gravity)?;
    let sweep = if args.ascending_only {
        sweep.with_window(AngleWindow::ASCENDING_FORWARD)
    } else {
        sweep
    };

    let rows = sweep.run();
    let mut table = TableWriter::new(args.format, io::stdout().lock());
    write_verbose_table(&rows, &mut table)?;
    Ok(())
}

fn main() {
    logging::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
