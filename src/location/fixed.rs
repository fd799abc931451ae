use crate::location::{LocationError, LocationProvider};
use crate::models::Coordinate;

/// Coordinate pinned in the config file. Unset means the user never
/// granted a location, which reads as unavailable.
pub struct FixedLocation {
    coordinate: Option<Coordinate>,
}

impl FixedLocation {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        self.coordinate
            .ok_or_else(|| LocationError::Unavailable("no coordinate configured".to_string()))
    }
}
