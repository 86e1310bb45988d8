use crate::core::ballistics::{Displacement, simulate};
use crate::core::error::BallisticsError;
use crate::core::solver::LaunchSolution;

/// Per-axis absolute tolerance, in meters.
pub const DEFAULT_TOLERANCE_M: f64 = 1e-6;

/// A `false` `within_tolerance` is an ordinary outcome near grazing targets,
/// not an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationResult {
    pub computed: Displacement,
    pub target: Displacement,
    pub within_tolerance: bool,
}

impl VerificationResult {
    pub fn dx_error(&self) -> f64 {
        (self.computed.dx - self.target.dx).abs()
    }

    pub fn dy_error(&self) -> f64 {
        (self.computed.dy - self.target.dy).abs()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verifier {
    pub tolerance_m: f64,
}

impl Default for Verifier {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
        }
    }
}

impl Verifier {
    pub fn new(tolerance_m: f64) -> Result<Self, BallisticsError> {
        if !tolerance_m.is_finite() || tolerance_m < 0.0 {
            return Err(BallisticsError::DegenerateInput(format!(
                "tolerance must be a non-negative finite number, got {tolerance_m}"
            )));
        }
        Ok(Self { tolerance_m })
    }

    pub fn verify(
        &self,
        target: Displacement,
        speed_mps: f64,
        gravity_mps2: f64,
        solution: &LaunchSolution,
    ) -> Result<VerificationResult, BallisticsError> {
        let computed = simulate(speed_mps, solution.theta_rad, solution.time_s, gravity_mps2)?;
        let within_tolerance = (computed.dx - target.dx).abs() <= self.tolerance_m
            && (computed.dy - target.dy).abs() <= self.tolerance_m;
        Ok(VerificationResult {
            computed,
            target,
            within_tolerance,
        })
    }
}

pub fn verify(
    target: Displacement,
    speed_mps: f64,
    gravity_mps2: f64,
    solution: &LaunchSolution,
) -> Result<VerificationResult, BallisticsError> {
    Verifier::default().verify(target, speed_mps, gravity_mps2, solution)
}
