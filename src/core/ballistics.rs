use crate::core::error::{BallisticsError, ensure_finite, ensure_positive};

pub const STANDARD_GRAVITY_MPS2: f64 = 9.81;

/// Horizontal and vertical offset from the muzzle, in meters.
/// Positive `dy` is above launch height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

pub fn velocity_components(speed_mps: f64, theta_rad: f64) -> (f64, f64) {
    (speed_mps * theta_rad.cos(), speed_mps * theta_rad.sin())
}

fn displacement_at(speed_mps: f64, theta_rad: f64, time_s: f64, gravity_mps2: f64) -> Displacement {
    let (vx, vy) = velocity_components(speed_mps, theta_rad);
    Displacement {
        dx: vx * time_s,
        dy: (vy * time_s) - (0.5 * gravity_mps2 * time_s * time_s),
    }
}

fn validate_launch(
    speed_mps: f64,
    theta_rad: f64,
    time_s: f64,
    gravity_mps2: f64,
) -> Result<(), BallisticsError> {
    ensure_finite(&[
        ("speed", speed_mps),
        ("angle", theta_rad),
        ("time", time_s),
        ("gravity", gravity_mps2),
    ])?;
    ensure_positive("speed", speed_mps)?;
    ensure_positive("gravity", gravity_mps2)?;
    if time_s < 0.0 {
        return Err(BallisticsError::DegenerateInput(format!(
            "time cannot be negative, got {time_s}"
        )));
    }
    Ok(())
}

pub fn simulate(
    speed_mps: f64,
    theta_rad: f64,
    time_s: f64,
    gravity_mps2: f64,
) -> Result<Displacement, BallisticsError> {
    validate_launch(speed_mps, theta_rad, time_s, gravity_mps2)?;
    Ok(displacement_at(speed_mps, theta_rad, time_s, gravity_mps2))
}

pub fn sample_trajectory(
    speed_mps: f64,
    theta_rad: f64,
    time_of_flight_s: f64,
    gravity_mps2: f64,
    samples: usize,
) -> Result<Vec<(f64, f64)>, BallisticsError> {
    validate_launch(speed_mps, theta_rad, time_of_flight_s, gravity_mps2)?;

    let sample_count = samples.max(2);
    Ok((0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            let point = displacement_at(speed_mps, theta_rad, t, gravity_mps2);
            (point.dx, point.dy)
        })
        .collect())
}
