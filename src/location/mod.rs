pub mod file;
pub mod fixed;

pub use file::FileLocation;
pub use fixed::FixedLocation;

use crate::models::Coordinate;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The platform refused access to the position source.
    #[error("location permission denied")]
    PermissionDenied,

    /// No fix available right now.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// One-shot "get current position". Called off the engine thread, once per
/// refresh cycle.
pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> Result<Coordinate, LocationError>;
}
