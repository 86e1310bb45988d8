use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use parabolic_aim::core::ballistics::sample_trajectory;
use parabolic_aim::core::window::PlotWindow;
use parabolic_aim::core::{Displacement, STANDARD_GRAVITY_MPS2, solve};
use parabolic_aim::logging;
use plotters::prelude::*;
use tracing::info;

const TRAJECTORY_SAMPLES: usize = 320;
const PLOT_SIZE: (u32, u32) = (1280, 640);

/// Render the low and high arcs that reach a target to an SVG file.
#[derive(Parser, Debug)]
#[command(name = "plot_arcs", version)]
struct Args {
    #[arg(long, default_value_t = 90.0)]
    speed: f64,

    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    dx: f64,

    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    dy: f64,

    #[arg(long, default_value_t = STANDARD_GRAVITY_MPS2)]
    gravity: f64,

    /// Output path; defaults to a timestamped `arcs_*.svg` in the working directory.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn run(args: Args) -> anyhow::Result<()> {
    let target = Displacement::new(args.dx, args.dy);
    let arcs = solve(target, args.speed, args.gravity)?.into_arcs()?;

    let mut paths = Vec::with_capacity(arcs.len());
    for solution in &arcs {
        let points = sample_trajectory(
            args.speed,
            solution.theta_rad,
            solution.time_s,
            args.gravity,
            TRAJECTORY_SAMPLES,
        )?;
        paths.push((solution, points));
    }
    let window = PlotWindow::fit(paths.iter().flat_map(|(_, points)| points.iter()));

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("arcs_{}.svg", Local::now().format("%Y%m%d_%H%M%S")))
    });

    let root = SVGBackend::new(&output, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Vm = {:.1} m/s, target ({:.1}, {:.1}) m, g = {:.2} m/s²",
                args.speed, args.dx, args.dy, args.gravity
            ),
            ("sans-serif", 22),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)?;

    chart
        .configure_mesh()
        .x_desc("Δx (m)")
        .y_desc("Δy (m)")
        .draw()?;

    for ((solution, points), color) in paths.iter().zip([BLUE, MAGENTA]) {
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(format!(
                "{:?} arc: {:.2}°, {:.2} s",
                solution.arc,
                solution.theta_deg(),
                solution.time_s
            ))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart.draw_series(std::iter::once(Circle::new((args.dx, args.dy), 5, RED.filled())))?;
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = %output.display(), "wrote arc plot");
    Ok(())
}

fn main() {
    logging::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
