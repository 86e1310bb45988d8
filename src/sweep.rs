use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{AngleWindow, Displacement, LaunchSolution, STANDARD_GRAVITY_MPS2, solve};
use crate::table::{NA, TableError, TableWriter, fixed4};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got min={min}, max={max}, step={step}")]
    NonFinite {
        name: &'static str,
        min: f64,
        max: f64,
        step: f64,
    },
    #[error("{name} step must be positive and non-zero, got {step}")]
    NonPositiveStep { name: &'static str, step: f64 },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("muzzle speeds must be positive, got [{min}, {max}]")]
    NonPositiveSpeed { min: f64, max: f64 },
    #[error("gravity must be positive and finite, got {0}")]
    InvalidGravity(f64),
    #[error("samples per grid point must be at least 1")]
    NoSamples,
    #[error("{name} axis would hold {count} points, more than {MAX_AXIS_POINTS}")]
    TooManyPoints { name: &'static str, count: f64 },
}

pub const MAX_AXIS_POINTS: usize = 10_000_000;

/// Inclusive float range; `max` is always the last value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridAxis {
    name: &'static str,
    min: f64,
    max: f64,
    step: f64,
}

impl GridAxis {
    pub fn new(name: &'static str, min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(ConfigError::NonFinite {
                name,
                min,
                max,
                step,
            });
        }
        if step <= 0.0 {
            return Err(ConfigError::NonPositiveStep { name, step });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { name, min, max });
        }
        // Stepped points plus a possibly appended `max`.
        let count = ((max - min) / step).floor() + 2.0;
        if !count.is_finite() || count > MAX_AXIS_POINTS as f64 {
            return Err(ConfigError::TooManyPoints { name, count });
        }
        Ok(Self {
            name,
            min,
            max,
            step,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn values(&self) -> Vec<f64> {
        let steps = ((self.max - self.min) / self.step).floor() as usize;
        let mut values: Vec<f64> = (0..=steps)
            .map(|i| self.min + i as f64 * self.step)
            .collect();
        let last = values[values.len() - 1];
        if (last - self.max).abs() > 1e-9 * self.max.abs().max(1.0) {
            values.push(self.max);
        }
        values
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub stdev: f64,
    pub count: usize,
}

/// `None` for an empty slice; stdev is 0 for a single value.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let stdev = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        0.0
    };
    Some(Summary { mean, stdev, count })
}

pub fn relative_angle_deg(solution: &LaunchSolution, target: Displacement) -> f64 {
    solution.theta_deg() - target.dy.atan2(target.dx).to_degrees()
}

fn low_arc(
    target: Displacement,
    speed_mps: f64,
    gravity_mps2: f64,
    window: &AngleWindow,
) -> Option<LaunchSolution> {
    match solve(target, speed_mps, gravity_mps2) {
        Ok(set) if set.len() == 2 => set.low().filter(|low| low.is_physical(window)),
        Ok(_) => None,
        Err(err) => {
            debug!(dx = target.dx, dy = target.dy, speed_mps, %err, "grid point rejected");
            None
        }
    }
}

// One RNG per dx row so rows can run in parallel and output does not
// depend on thread count.
fn row_seed(seed: u64, row: usize) -> u64 {
    seed.wrapping_add((row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn check_speeds(min: f64, max: f64) -> Result<(), ConfigError> {
    if !(min > 0.0 && max.is_finite()) {
        return Err(ConfigError::NonPositiveSpeed { min, max });
    }
    if min > max {
        return Err(ConfigError::InvertedRange {
            name: "vm",
            min,
            max,
        });
    }
    Ok(())
}

fn check_gravity(gravity_mps2: f64) -> Result<(), ConfigError> {
    if gravity_mps2.is_finite() && gravity_mps2 > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidGravity(gravity_mps2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummarySweep {
    pub samples: usize,
    pub vm_min: f64,
    pub vm_max: f64,
    pub dx: GridAxis,
    pub dy: GridAxis,
    pub gravity_mps2: f64,
    pub window: AngleWindow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowStats {
    pub relative_angle_deg: Summary,
    pub time_s: Summary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryRow {
    pub dx: f64,
    pub stats: Option<RowStats>,
}

impl SummaryRow {
    /// Rows without data keep `NA` in every statistic column; they are never dropped.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.dx.to_string()];
        match self.stats {
            Some(stats) => cells.extend([
                fixed4(stats.relative_angle_deg.mean),
                fixed4(stats.relative_angle_deg.stdev),
                fixed4(stats.time_s.mean),
                fixed4(stats.time_s.stdev),
            ]),
            None => cells.extend(std::iter::repeat_n(NA.to_string(), 4)),
        }
        cells
    }
}

impl SummarySweep {
    pub const HEADERS: [&'static str; 5] = [
        "Dx",
        "Relative Theta (Deg)",
        "Stdev Theta (Deg)",
        "Mean Time (s)",
        "Stdev Time (s)",
    ];

    pub fn new(
        samples: usize,
        vm_min: f64,
        vm_max: f64,
        dx: GridAxis,
        dy: GridAxis,
    ) -> Result<Self, ConfigError> {
        if samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        check_speeds(vm_min, vm_max)?;
        Ok(Self {
            samples,
            vm_min,
            vm_max,
            dx,
            dy,
            gravity_mps2: STANDARD_GRAVITY_MPS2,
            window: AngleWindow::UNRESTRICTED,
        })
    }

    pub fn with_gravity(mut self, gravity_mps2: f64) -> Result<Self, ConfigError> {
        check_gravity(gravity_mps2)?;
        self.gravity_mps2 = gravity_mps2;
        Ok(self)
    }

    pub fn with_window(mut self, window: AngleWindow) -> Self {
        self.window = window;
        self
    }

    pub fn run(&self, seed: u64) -> Vec<SummaryRow> {
        let dx_values = self.dx.values();
        let dy_values = self.dy.values();
        info!(
            seed,
            rows = dx_values.len(),
            dy_points = dy_values.len(),
            samples = self.samples,
            "running summary sweep"
        );

        dx_values
            .par_iter()
            .enumerate()
            .map(|(row, &dx)| {
                let mut rng = StdRng::seed_from_u64(row_seed(seed, row));
                self.row(dx, &dy_values, &mut rng)
            })
            .collect()
    }

    fn row(&self, dx: f64, dy_values: &[f64], rng: &mut impl Rng) -> SummaryRow {
        let mut angles = Vec::new();
        let mut times = Vec::new();

        for &dy in dy_values {
            let target = Displacement::new(dx, dy);
            for _ in 0..self.samples {
                let speed = rng.random_range(self.vm_min..=self.vm_max);
                if let Some(low) = low_arc(target, speed, self.gravity_mps2, &self.window) {
                    angles.push(relative_angle_deg(&low, target));
                    times.push(low.time_s);
                }
            }
        }

        let stats = summarize(&angles)
            .zip(summarize(&times))
            .map(|(relative_angle_deg, time_s)| RowStats {
                relative_angle_deg,
                time_s,
            });
        if stats.is_none() {
            debug!(dx, "no reachable samples, emitting NA row");
        }
        SummaryRow { dx, stats }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerboseSweep {
    pub dx: GridAxis,
    pub dy: GridAxis,
    pub vm: GridAxis,
    pub gravity_mps2: f64,
    pub window: AngleWindow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerboseRow {
    pub dx: f64,
    pub dy: f64,
    pub vm: f64,
    /// Relative angle in degrees and time of flight of the low arc.
    pub low: Option<(f64, f64)>,
}

impl VerboseRow {
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![fixed4(self.dx), fixed4(self.dy), fixed4(self.vm)];
        match self.low {
            Some((relative_angle_deg, time_s)) => {
                cells.extend([fixed4(relative_angle_deg), fixed4(time_s)])
            }
            None => cells.extend([NA.to_string(), NA.to_string()]),
        }
        cells
    }
}

impl VerboseSweep {
    pub const HEADERS: [&'static str; 5] = ["Dx", "Dy", "Vm", "Relative Theta (Deg)", "Time (s)"];

    pub fn new(dx: GridAxis, dy: GridAxis, vm: GridAxis) -> Result<Self, ConfigError> {
        check_speeds(vm.min(), vm.max())?;
        Ok(Self {
            dx,
            dy,
            vm,
            gravity_mps2: STANDARD_GRAVITY_MPS2,
            window: AngleWindow::UNRESTRICTED,
        })
    }

    pub fn with_gravity(mut self, gravity_mps2: f64) -> Result<Self, ConfigError> {
        check_gravity(gravity_mps2)?;
        self.gravity_mps2 = gravity_mps2;
        Ok(self)
    }

    pub fn with_window(mut self, window: AngleWindow) -> Self {
        self.window = window;
        self
    }

    pub fn run(&self) -> Vec<VerboseRow> {
        let dx_values = self.dx.values();
        let dy_values = self.dy.values();
        let vm_values = self.vm.values();
        info!(
            dx_points = dx_values.len(),
            dy_points = dy_values.len(),
            vm_points = vm_values.len(),
            "running verbose sweep"
        );

        let per_dx: Vec<Vec<VerboseRow>> = dx_values
            .par_iter()
            .map(|&dx| {
                let mut rows = Vec::with_capacity(dy_values.len() * vm_values.len());
                for &dy in &dy_values {
                    let target = Displacement::new(dx, dy);
                    for &vm in &vm_values {
                        let low = low_arc(target, vm, self.gravity_mps2, &self.window)
                            .map(|s| (relative_angle_deg(&s, target), s.time_s));
                        rows.push(VerboseRow { dx, dy, vm, low });
                    }
                }
                rows
            })
            .collect();
        per_dx.into_iter().flatten().collect()
    }
}

pub fn write_summary_table<W: Write>(
    rows: &[SummaryRow],
    table: &mut TableWriter<W>,
) -> Result<(), TableError> {
    table.write_header(&SummarySweep::HEADERS)?;
    for row in rows {
        table.write_row(&row.cells())?;
    }
    table.flush()
}

pub fn write_verbose_table<W: Write>(
    rows: &[VerboseRow],
    table: &mut TableWriter<W>,
) -> Result<(), TableError> {
    table.write_header(&VerboseSweep::HEADERS)?;
    for row in rows {
        table.write_row(&row.cells())?;
    }
    table.flush()
}
