use thiserror::Error;

/// Structural problems detected while setting up a controller.
///
/// The control tick itself never fails; everything that could go wrong is
/// rejected here, once.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetupError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("deadzone must be finite and non-negative, got {0}")]
    InvalidDeadzone(f64),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}
