pub mod ballistics;
pub mod error;
pub mod solver;
pub mod verify;
pub mod window;

pub use ballistics::{Displacement, STANDARD_GRAVITY_MPS2, simulate};
pub use error::BallisticsError;
pub use solver::{AngleWindow, Arc, LaunchSolution, SolutionSet, solve};
pub use verify::{DEFAULT_TOLERANCE_M, VerificationResult, Verifier, verify};
