use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::ballistics::Displacement;
use crate::core::error::{BallisticsError, ensure_finite, ensure_positive};

/// `|disc| <= GRAZING_RELATIVE_EPSILON · Vm⁴` counts as a grazing target.
pub const GRAZING_RELATIVE_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arc {
    Low,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchSolution {
    pub theta_rad: f64,
    pub time_s: f64,
    pub arc: Arc,
}

impl LaunchSolution {
    pub fn theta_deg(&self) -> f64 {
        self.theta_rad.to_degrees()
    }

    pub fn is_physical(&self, window: &AngleWindow) -> bool {
        self.time_s.is_finite() && self.time_s > 0.0 && window.contains(self.theta_rad)
    }
}

/// Open interval of accepted launch angles. `solve` never filters on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleWindow {
    pub min_rad: f64,
    pub max_rad: f64,
}

impl AngleWindow {
    pub const UNRESTRICTED: Self = Self {
        min_rad: f64::NEG_INFINITY,
        max_rad: f64::INFINITY,
    };

    pub const ASCENDING_FORWARD: Self = Self {
        min_rad: 0.0,
        max_rad: FRAC_PI_2,
    };

    pub fn contains(&self, theta_rad: f64) -> bool {
        theta_rad > self.min_rad && theta_rad < self.max_rad
    }
}

impl Default for AngleWindow {
    fn default() -> Self {
        Self::UNRESTRICTED
    }
}

/// Low arc first. A grazing target (`disc == 0`) still yields two coinciding entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolutionSet {
    discriminant: f64,
    arcs: Option<[LaunchSolution; 2]>,
}

impl SolutionSet {
    fn unreachable(discriminant: f64) -> Self {
        Self {
            discriminant,
            arcs: None,
        }
    }

    fn pair(discriminant: f64, low: LaunchSolution, high: LaunchSolution) -> Self {
        Self {
            discriminant,
            arcs: Some([low, high]),
        }
    }

    pub fn discriminant(&self) -> f64 {
        self.discriminant
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_none()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_grazing(&self) -> bool {
        self.arcs.is_some() && self.discriminant == 0.0
    }

    pub fn as_slice(&self) -> &[LaunchSolution] {
        match &self.arcs {
            Some(arcs) => arcs,
            None => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchSolution> {
        self.as_slice().iter()
    }

    pub fn low(&self) -> Option<LaunchSolution> {
        self.arcs.map(|[low, _]| low)
    }

    pub fn high(&self) -> Option<LaunchSolution> {
        self.arcs.map(|[_, high]| high)
    }

    pub fn physical<'a>(
        &'a self,
        window: &'a AngleWindow,
    ) -> impl Iterator<Item = &'a LaunchSolution> + 'a {
        self.iter().filter(move |s| s.is_physical(window))
    }

    pub fn into_arcs(self) -> Result<[LaunchSolution; 2], BallisticsError> {
        self.arcs.ok_or(BallisticsError::NoRealSolution {
            discriminant: self.discriminant,
        })
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a LaunchSolution;
    type IntoIter = std::slice::Iter<'a, LaunchSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn checked(theta_rad: f64, time_s: f64, arc: Arc) -> Result<LaunchSolution, BallisticsError> {
    if !theta_rad.is_finite() || !time_s.is_finite() {
        return Err(BallisticsError::NumericInstability(format!(
            "{arc:?} arc produced theta={theta_rad}, t={time_s}"
        )));
    }
    Ok(LaunchSolution {
        theta_rad,
        time_s,
        arc,
    })
}

/// Mirror a forward-firing angle into the backward half-plane, kept in (−π, π].
fn reflect_backward(theta_rad: f64) -> f64 {
    if theta_rad >= 0.0 {
        PI - theta_rad
    } else {
        -PI - theta_rad
    }
}

/// Empty set when out of range. `dx < 0` is solved as a mirrored forward
/// shot; `dx == 0` fires straight up (straight down for the low arc when the
/// target is below the muzzle).
pub fn solve(
    target: Displacement,
    speed_mps: f64,
    gravity_mps2: f64,
) -> Result<SolutionSet, BallisticsError> {
    let Displacement { dx, dy } = target;
    ensure_finite(&[
        ("dx", dx),
        ("dy", dy),
        ("speed", speed_mps),
        ("gravity", gravity_mps2),
    ])?;
    ensure_positive("speed", speed_mps)?;
    ensure_positive("gravity", gravity_mps2)?;
    if dx == 0.0 && dy == 0.0 {
        return Err(BallisticsError::DegenerateInput(
            "target coincides with the launch point".to_string(),
        ));
    }

    let v2 = speed_mps * speed_mps;
    let v4 = v2 * v2;
    let mut disc = v4 - gravity_mps2 * (gravity_mps2 * dx * dx + 2.0 * dy * v2);
    if !disc.is_finite() {
        return Err(BallisticsError::NumericInstability(format!(
            "discriminant overflowed for speed={speed_mps}, dx={dx}, dy={dy}"
        )));
    }
    if disc.abs() <= GRAZING_RELATIVE_EPSILON * v4 {
        disc = 0.0;
    }
    if disc < 0.0 {
        return Ok(SolutionSet::unreachable(disc));
    }

    let root = disc.sqrt();

    if dx == 0.0 {
        // ½g·t² ∓ Vm·t + dy = 0; root / Vm is sqrt(Vm² − 2g·dy).
        let r = root / speed_mps;
        let low_theta = if dy >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        let low = checked(low_theta, 2.0 * dy.abs() / (speed_mps + r), Arc::Low)?;
        let high = checked(FRAC_PI_2, (speed_mps + r) / gravity_mps2, Arc::High)?;
        return Ok(SolutionSet::pair(disc, low, high));
    }

    // Roots of (g·dx²/2Vm²)·u² − dx·u + (dy + g·dx²/2Vm²) = 0 with u = tan(theta).
    // The low root comes from the product of roots so Vm² − sqrt(disc) is never
    // formed; t = |dx|·sqrt(1 + u²)/Vm avoids dividing by a vanishing cosine.
    let reach = dx.abs();
    let sum = v2 + root;
    let u_high = sum / (gravity_mps2 * reach);
    let u_low = (2.0 * v2 * dy + gravity_mps2 * dx * dx) / (reach * sum);

    let from_slope = |u: f64, arc: Arc| {
        let theta = u.atan();
        let theta = if dx < 0.0 { reflect_backward(theta) } else { theta };
        checked(theta, reach * u.hypot(1.0) / speed_mps, arc)
    };
    let low = from_slope(u_low, Arc::Low)?;
    let high = from_slope(u_high, Arc::High)?;
    Ok(SolutionSet::pair(disc, low, high))
}
