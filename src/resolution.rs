//! Polar circle resolution.
//!
//! Beyond the polar circles a calendar date may have no sunrise, no sunset,
//! or neither, which leaves sunrise/sunset-dependent computation without
//! its anchors. The resolvers here search for a substitute: a nearby day
//! with a normal sun cycle (Aqrab Yaum) or a latitude pulled back toward
//! the equator (Aqrab Balad). When no substitute exists the caller still
//! receives the solar times computed at the requested date and place, NaN
//! fields included, so downstream consumers always get the same shape.

use crate::coordinates::Coordinates;
use crate::solar::{SolarTime, SolarTimeProvider};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Degrees stepped toward the equator per Aqrab Balad attempt.
const LATITUDE_VARIATION_STEP: f64 = 0.5;

/// Latitude beyond which midnight sun / polar night effects are expected.
const UNSAFE_LATITUDE: f64 = 65.0;

/// Farthest day offset Aqrab Yaum tries in each direction (half a year).
const MAX_DAYS_SEARCHED: i64 = 183;

/// How undefined sunrise/sunset values are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolarCircleResolution {
    /// Search adjacent days, alternating forward and backward.
    AqrabYaum,
    /// Step the latitude toward the equator until the sun behaves.
    AqrabBalad,
    /// No resolution: report the raw values, NaN and all.
    Unresolved,
}

impl Default for PolarCircleResolution {
    fn default() -> Self {
        Self::Unresolved
    }
}

impl fmt::Display for PolarCircleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AqrabYaum => write!(f, "AqrabYaum"),
            Self::AqrabBalad => write!(f, "AqrabBalad"),
            Self::Unresolved => write!(f, "Unresolved"),
        }
    }
}

impl FromStr for PolarCircleResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aqrabyaum" | "aqrab-yaum" | "aqrab_yaum" => Ok(Self::AqrabYaum),
            "aqrabbalad" | "aqrab-balad" | "aqrab_balad" => Ok(Self::AqrabBalad),
            "unresolved" => Ok(Self::Unresolved),
            _ => Err(format!(
                "Unknown resolution '{}'. Use 'aqrab-yaum', 'aqrab-balad', or 'unresolved'.",
                s
            )),
        }
    }
}

/// The bundle every resolver and the dispatcher return: the reference date
/// and its follower, the coordinates actually used, and the solar time
/// sampled for each of the two days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedValues {
    pub date: NaiveDate,
    pub tomorrow: NaiveDate,
    pub coordinates: Coordinates,
    pub solar_time: SolarTime,
    pub tomorrow_solar_time: SolarTime,
}

/// Resolve undefined sunrise/sunset for `date` at `coordinates`.
///
/// Always returns a bundle. The unresolved default (solar time at the
/// requested date and the day after, at the original coordinates) is
/// computed up front, invalid values included, and is what the caller
/// gets whenever the selected resolver finds nothing.
pub fn resolve<P: SolarTimeProvider>(
    provider: &P,
    resolution: PolarCircleResolution,
    date: NaiveDate,
    coordinates: &Coordinates,
) -> ResolvedValues {
    let tomorrow = date + Duration::days(1);
    let unresolved = ResolvedValues {
        date,
        tomorrow,
        coordinates: *coordinates,
        solar_time: provider.solar_time(date, coordinates),
        tomorrow_solar_time: provider.solar_time(tomorrow, coordinates),
    };

    match resolution {
        PolarCircleResolution::AqrabYaum => {
            // Noon anchor keeps day arithmetic clear of the date boundary.
            let anchor = date.and_hms_opt(12, 0, 0).unwrap();
            aqrab_yaum_resolver(provider, coordinates, anchor).unwrap_or(unresolved)
        }
        PolarCircleResolution::AqrabBalad => {
            let start = toward_equator(coordinates.latitude);
            aqrab_balad_resolver(provider, coordinates, date, start).unwrap_or(unresolved)
        }
        PolarCircleResolution::Unresolved => unresolved,
    }
}

/// One latitude step toward the equator; the equator itself stays put.
fn toward_equator(latitude: f64) -> f64 {
    if latitude > 0.0 {
        latitude - LATITUDE_VARIATION_STEP
    } else if latitude < 0.0 {
        latitude + LATITUDE_VARIATION_STEP
    } else {
        latitude
    }
}

/// Aqrab Yaum: visit days at offsets +1, -1, +2, -2, ... from the anchor,
/// holding coordinates fixed, until a candidate day and the anchor's own
/// next day both have defined sunrise/sunset.
///
/// The returned `date` is the anchor, not the candidate that validated:
/// the outcome communicates the caller's temporal reference together with
/// the solar samples that made it usable. `tomorrow` likewise stays
/// anchored one day after the original date no matter how far the search
/// wanders.
fn aqrab_yaum_resolver<P: SolarTimeProvider>(
    provider: &P,
    coordinates: &Coordinates,
    anchor: NaiveDateTime,
) -> Option<ResolvedValues> {
    let tomorrow = anchor + Duration::days(1);
    let mut days_added: i64 = 1;
    let mut direction: i64 = 1;

    while days_added <= MAX_DAYS_SEARCHED {
        let test_date = anchor + Duration::days(direction * days_added);
        let solar_time = provider.solar_time(test_date.date(), coordinates);
        let tomorrow_solar_time = provider.solar_time(tomorrow.date(), coordinates);

        if solar_time.is_valid() && tomorrow_solar_time.is_valid() {
            return Some(ResolvedValues {
                date: anchor.date(),
                tomorrow: tomorrow.date(),
                coordinates: *coordinates,
                solar_time,
                tomorrow_solar_time,
            });
        }

        // Forward attempt flips backward at the same offset; a backward
        // attempt widens the ring by one day.
        if direction < 0 {
            days_added += 1;
        }
        direction = -direction;
    }

    None
}

/// Aqrab Balad: hold the date fixed and walk the latitude toward the
/// equator in half-degree steps until both the date and its follower have
/// defined sunrise/sunset at the candidate latitude.
///
/// Stepping continues only while the current candidate is still at or
/// beyond the unsafe latitude; once a candidate below it has failed, the
/// search stops rather than marching on to the equator.
fn aqrab_balad_resolver<P: SolarTimeProvider>(
    provider: &P,
    coordinates: &Coordinates,
    date: NaiveDate,
    start_latitude: f64,
) -> Option<ResolvedValues> {
    let tomorrow = date + Duration::days(1);
    let mut latitude = start_latitude;

    loop {
        let candidate = coordinates.with_latitude(latitude);
        let solar_time = provider.solar_time(date, &candidate);
        let tomorrow_solar_time = provider.solar_time(tomorrow, &candidate);

        if solar_time.is_valid() && tomorrow_solar_time.is_valid() {
            return Some(ResolvedValues {
                date,
                tomorrow,
                coordinates: candidate,
                solar_time,
                tomorrow_solar_time,
            });
        }

        if latitude.abs() < UNSAFE_LATITUDE {
            return None;
        }
        latitude = toward_equator(latitude);
    }
}
