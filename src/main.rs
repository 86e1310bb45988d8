use std::fmt::Write as _;

use clap::Parser;
use parabolic_aim::core::{
    DEFAULT_TOLERANCE_M, Displacement, STANDARD_GRAVITY_MPS2, Verifier, solve,
};
use parabolic_aim::logging;

/// Solve launch angles for a target and verify them by forward simulation.
#[derive(Parser, Debug)]
#[command(name = "parabolic_aim", version)]
struct Cli {
    /// Muzzle velocity (m/s).
    #[arg(long, default_value_t = 90.0)]
    speed: f64,

    /// Horizontal displacement to the target (m).
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    dx: f64,

    /// Vertical displacement to the target, positive up (m).
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    dy: f64,

    /// Gravitational acceleration (m/s^2).
    #[arg(long, default_value_t = STANDARD_GRAVITY_MPS2)]
    gravity: f64,

    /// Largest accepted per-axis miss when re-simulating a solution (m).
    #[arg(long, default_value_t = DEFAULT_TOLERANCE_M)]
    tolerance: f64,
}

fn report(cli: &Cli) -> anyhow::Result<String> {
    let target = Displacement::new(cli.dx, cli.dy);
    let verifier = Verifier::new(cli.tolerance)?;
    let solutions = solve(target, cli.speed, cli.gravity)?;

    let mut out = String::new();
    writeln!(out, "Forward-solve and verify for:")?;
    writeln!(
        out,
        "  Vm = {} m/s, Δx = {} m, Δy = {} m, g = {} m/s^2\n",
        cli.speed, cli.dx, cli.dy, cli.gravity
    )?;

    if solutions.is_empty() {
        writeln!(out, "No real solutions for the given parameters.")?;
        return Ok(out);
    }

    for (i, solution) in solutions.iter().enumerate() {
        let check = verifier.verify(target, cli.speed, cli.gravity, solution)?;
        writeln!(out, "Solution #{} ({:?} arc):", i + 1, solution.arc)?;
        writeln!(out, "  theta (deg) = {:.6}", solution.theta_deg())?;
        writeln!(out, "  time        = {:.6} s", solution.time_s)?;
        writeln!(out, "  → Δx = {:.6} (target {:.6})", check.computed.dx, cli.dx)?;
        writeln!(out, "  → Δy = {:.6} (target {:.6})", check.computed.dy, cli.dy)?;
        writeln!(
            out,
            "  verified    = {}",
            if check.within_tolerance { "yes" } else { "no" }
        )?;
        writeln!(out)?;
    }

    Ok(out)
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match report(&cli) {
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
