//! Geographic coordinate value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in signed degrees.
///
/// The type itself does not enforce the [-90, 90] / [-180, 180] ranges;
/// input validation happens at the CLI and HTTP boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Same longitude with the latitude replaced.
    pub fn with_latitude(&self, latitude: f64) -> Self {
        Self { latitude, longitude: self.longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}\u{00B0}, {:.4}\u{00B0}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_latitude_preserves_longitude() {
        let svalbard = Coordinates::new(78.2232, 15.6267);
        let shifted = svalbard.with_latitude(64.5);
        assert_eq!(shifted.latitude, 64.5);
        assert_eq!(shifted.longitude, 15.6267);
        // the source value is untouched
        assert_eq!(svalbard.latitude, 78.2232);
    }

    #[test]
    fn test_display_format() {
        let c = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(format!("{}", c), "-33.8688\u{00B0}, 151.2093\u{00B0}");
    }
}
