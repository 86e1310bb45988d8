use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BallisticsError {
    /// Inputs outside the solvable domain: non-finite values, a non-positive
    /// speed or gravity, a negative time, or a target at the muzzle.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("numerically unstable result: {0}")]
    NumericInstability(String),

    #[error("no real launch angle reaches the target (discriminant {discriminant})")]
    NoRealSolution { discriminant: f64 },
}

pub(crate) fn ensure_finite(values: &[(&str, f64)]) -> Result<(), BallisticsError> {
    for (label, value) in values {
        if !value.is_finite() {
            return Err(BallisticsError::DegenerateInput(format!(
                "{label} must be a finite number, got {value}"
            )));
        }
    }
    Ok(())
}

pub(crate) fn ensure_positive(label: &str, value: f64) -> Result<(), BallisticsError> {
    if value <= 0.0 {
        return Err(BallisticsError::DegenerateInput(format!(
            "{label} must be positive, got {value}"
        )));
    }
    Ok(())
}
