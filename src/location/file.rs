use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::location::{LocationError, LocationProvider};
use crate::models::Coordinate;

/// Latest fix written by an external helper (gpsd hook, geoclue agent, a
/// phone sync script) as `{"latitude": .., "longitude": ..}`. Re-read on
/// every call so moves show up at the next refresh.
pub struct FileLocation {
    path: PathBuf,
}

impl FileLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LocationProvider for FileLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => LocationError::PermissionDenied,
            _ => LocationError::Unavailable(format!("reading {:?}: {}", self.path, e)),
        })?;

        let coordinate: Coordinate = serde_json::from_str(&content).map_err(|e| {
            LocationError::Unavailable(format!("parsing {:?}: {}", self.path, e))
        })?;

        if !coordinate.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "coordinate out of range: {}",
                coordinate
            )));
        }

        debug!("Read location fix {} from {:?}", coordinate, self.path);
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fix_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_fix_from_json() {
        let file = fix_file(r#"{"latitude": 51.5072, "longitude": -0.1276}"#);
        let loc = FileLocation::new(file.path());
        assert_eq!(loc.locate().unwrap(), Coordinate::new(51.5072, -0.1276));
    }

    #[test]
    fn picks_up_new_fix_on_next_call() {
        let file = fix_file(r#"{"latitude": 1.0, "longitude": 2.0}"#);
        let loc = FileLocation::new(file.path());
        assert_eq!(loc.locate().unwrap(), Coordinate::new(1.0, 2.0));

        std::fs::write(file.path(), r#"{"latitude": 3.0, "longitude": 4.0}"#).unwrap();
        assert_eq!(loc.locate().unwrap(), Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let loc = FileLocation::new("/nonexistent/miqat/fix.json");
        assert!(matches!(loc.locate(), Err(LocationError::Unavailable(_))));
    }

    #[test]
    fn garbage_and_out_of_range_are_unavailable() {
        let file = fix_file("not json");
        assert!(matches!(
            FileLocation::new(file.path()).locate(),
            Err(LocationError::Unavailable(_))
        ));

        let file = fix_file(r#"{"latitude": 120.0, "longitude": 0.0}"#);
        assert!(matches!(
            FileLocation::new(file.path()).locate(),
            Err(LocationError::Unavailable(_))
        ));
    }
}
