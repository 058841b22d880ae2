//! Solar time model based on a simplified SPA (Solar Position Algorithm).
//!
//! Produces sunrise, transit, and sunset for a date and location as
//! fractional hours UTC. When the sun does not cross the horizon on that
//! date the affected field is NaN, which is what the resolution layer
//! keys on. Accuracy: ~0.01° in altitude for dates within ±50 years of
//! J2000, good to well under a minute of event time.

use crate::coordinates::Coordinates;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Refraction-adjusted horizon altitude.
const HORIZON_ALTITUDE: f64 = -0.833;

/// Altitude-curve sampling step in seconds.
const SCAN_STEP: u32 = 60;

/// Sunrise, transit, and sunset for one date at one location, as
/// fractional hours UTC. `sunrise`/`sunset` are NaN when the sun never
/// crosses the horizon that day; `transit` (the altitude peak) always
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarTime {
    pub sunrise: f64,
    pub transit: f64,
    pub sunset: f64,
}

impl SolarTime {
    /// Scan the date's altitude curve and extract the horizon events.
    pub fn new(date: NaiveDate, coordinates: &Coordinates) -> Self {
        let samples = scan_day(date, coordinates);
        let transit = peak_seconds(&samples) / 3600.0;
        let sunrise = horizon_crossing(&samples, true)
            .map(|s| s / 3600.0)
            .unwrap_or(f64::NAN);
        let sunset = horizon_crossing(&samples, false)
            .map(|s| s / 3600.0)
            .unwrap_or(f64::NAN);
        Self { sunrise, transit, sunset }
    }

    /// True iff both horizon events exist on this date.
    pub fn is_valid(&self) -> bool {
        !self.sunrise.is_nan() && !self.sunset.is_nan()
    }
}

/// The seam between the resolution layer and whatever computes solar
/// geometry. Production code uses [`HorizonScan`]; tests inject synthetic
/// skies.
pub trait SolarTimeProvider {
    fn solar_time(&self, date: NaiveDate, coordinates: &Coordinates) -> SolarTime;
}

/// Default provider backed by the altitude-scan model in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizonScan;

impl SolarTimeProvider for HorizonScan {
    fn solar_time(&self, date: NaiveDate, coordinates: &Coordinates) -> SolarTime {
        SolarTime::new(date, coordinates)
    }
}

// ─── Altitude model ─────────────────────────────────────────────

struct Sample {
    seconds: f64,
    altitude: f64,
}

struct SunGeometry {
    declination: f64,
    equation_of_time: f64,
}

fn julian_date(date: NaiveDate, seconds: f64) -> f64 {
    let (mut y, mut m) = (date.year() as f64, date.month() as f64);
    let d = date.day() as f64;
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0_f64).floor();
    let b = 2.0 - a + (a / 4.0_f64).floor();

    (365.25_f64 * (y + 4716.0)).floor()
        + (30.6001_f64 * (m + 1.0)).floor()
        + d
        + seconds / 86400.0
        + b
        - 1524.5
}

fn norm360(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

/// Declination and equation of time for a Julian century `t` past J2000.
fn sun_geometry(t: f64) -> SunGeometry {
    let l0 = norm360(280.46646 + t * (36000.76983 + t * 0.0003032));
    let m = norm360(357.52911 + t * (35999.05029 - t * 0.0001537));
    let ecc = 0.016708634 - t * (0.000042037 + t * 0.0000001267);

    let m_r = m * DEG;
    let center = m_r.sin() * (1.914602 - t * (0.004817 + t * 0.000014))
        + (2.0 * m_r).sin() * (0.019993 - t * 0.000101)
        + (3.0 * m_r).sin() * 0.000289;

    let omega = 125.04 - 1934.136 * t;
    let lambda = l0 + center - 0.00569 - 0.00478 * (omega * DEG).sin();

    let eps0 = 23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let eps = (eps0 + 0.00256 * (omega * DEG).cos()) * DEG;

    let declination = (eps.sin() * (lambda * DEG).sin()).asin() / DEG;

    let y = (eps / 2.0).tan().powi(2);
    let l0_r = l0 * DEG;
    let eot = y * (2.0 * l0_r).sin() - 2.0 * ecc * m_r.sin()
        + 4.0 * ecc * y * m_r.sin() * (2.0 * l0_r).cos()
        - 0.5 * y * y * (4.0 * l0_r).sin()
        - 1.25 * ecc * ecc * (2.0 * m_r).sin();

    SunGeometry { declination, equation_of_time: 4.0 * eot / DEG }
}

/// Solar altitude in degrees at `seconds` past UTC midnight of `date`.
fn altitude_at(date: NaiveDate, seconds: f64, coordinates: &Coordinates) -> f64 {
    let jd = julian_date(date, seconds);
    let t = (jd - 2451545.0) / 36525.0;
    let geo = sun_geometry(t);

    let solar_minutes = seconds / 60.0 + geo.equation_of_time + 4.0 * coordinates.longitude;
    let hour_angle = (solar_minutes / 4.0 - 180.0) * DEG;

    let lat = coordinates.latitude * DEG;
    let dec = geo.declination * DEG;
    (lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos()).asin() / DEG
}

/// Sample the full 24-hour altitude curve.
fn scan_day(date: NaiveDate, coordinates: &Coordinates) -> Vec<Sample> {
    let mut samples = Vec::with_capacity((86400 / SCAN_STEP) as usize);
    let mut sec = 0u32;
    while sec < 86400 {
        let seconds = sec as f64;
        samples.push(Sample { seconds, altitude: altitude_at(date, seconds, coordinates) });
        sec += SCAN_STEP;
    }
    samples
}

/// First horizon crossing in the requested direction, interpolated.
/// None when the curve stays on one side of the horizon all day.
fn horizon_crossing(samples: &[Sample], rising: bool) -> Option<f64> {
    for pair in samples.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let crosses = if rising {
            a.altitude <= HORIZON_ALTITUDE && b.altitude > HORIZON_ALTITUDE
        } else {
            a.altitude >= HORIZON_ALTITUDE && b.altitude < HORIZON_ALTITUDE
        };
        if crosses {
            let frac = (HORIZON_ALTITUDE - a.altitude) / (b.altitude - a.altitude);
            return Some(a.seconds + frac * (b.seconds - a.seconds));
        }
    }
    None
}

fn peak_seconds(samples: &[Sample]) -> f64 {
    samples
        .iter()
        .max_by(|a, b| a.altitude.partial_cmp(&b.altitude).unwrap())
        .map(|s| s.seconds)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_equator_equinox_symmetry() {
        let st = SolarTime::new(day(2024, 3, 20), &Coordinates::new(0.0, 0.0));
        assert!(st.is_valid());
        assert_abs_diff_eq!(st.transit, 12.1, epsilon = 0.3);
        assert_abs_diff_eq!(st.sunrise, 6.05, epsilon = 0.3);
        assert_abs_diff_eq!(st.sunset, 18.15, epsilon = 0.3);
    }

    #[test]
    fn test_mecca_normal_day() {
        let st = SolarTime::new(day(2026, 2, 14), &Coordinates::new(21.4225, 39.8262));
        assert!(st.is_valid());
        // Mecca is UTC+3: sunrise ~06:55 local, sunset ~18:15 local
        assert!(st.sunrise > 3.0 && st.sunrise < 5.0, "sunrise {}", st.sunrise);
        assert!(st.sunset > 14.0 && st.sunset < 17.0, "sunset {}", st.sunset);
        assert!(st.sunrise < st.transit && st.transit < st.sunset);
    }

    #[test]
    fn test_svalbard_polar_night() {
        let st = SolarTime::new(day(2025, 12, 21), &Coordinates::new(78.2232, 15.6267));
        assert!(st.sunrise.is_nan(), "polar night must have no sunrise");
        assert!(st.sunset.is_nan(), "polar night must have no sunset");
        assert!(!st.is_valid());
        // the sun still has an altitude peak
        assert!(st.transit.is_finite());
    }

    #[test]
    fn test_tromso_midnight_sun() {
        let st = SolarTime::new(day(2026, 6, 21), &Coordinates::new(69.6492, 18.9553));
        assert!(st.sunrise.is_nan());
        assert!(st.sunset.is_nan());
        assert!(!st.is_valid());
    }

    #[test]
    fn test_tromso_february_is_normal() {
        // Tromsø in mid-February is out of the polar night again
        let st = SolarTime::new(day(2026, 2, 14), &Coordinates::new(69.6492, 18.9553));
        assert!(st.is_valid());
        assert!(st.sunset - st.sunrise > 4.0, "day length too short: {}", st.sunset - st.sunrise);
        assert!(st.sunset - st.sunrise < 12.0);
    }

    #[test]
    fn test_southern_hemisphere_polar_day() {
        // McMurdo area in late December: sun never sets
        let st = SolarTime::new(day(2025, 12, 21), &Coordinates::new(-77.85, 166.67));
        assert!(!st.is_valid());
    }

    #[test]
    fn test_validity_predicate_cases() {
        let valid = SolarTime { sunrise: 6.0, transit: 12.0, sunset: 18.0 };
        assert!(valid.is_valid());

        let no_rise = SolarTime { sunrise: f64::NAN, transit: 12.0, sunset: 18.0 };
        assert!(!no_rise.is_valid());

        let no_set = SolarTime { sunrise: 6.0, transit: 12.0, sunset: f64::NAN };
        assert!(!no_set.is_valid());
    }

    #[test]
    fn test_provider_matches_direct_construction() {
        let coords = Coordinates::new(21.4225, 39.8262);
        let date = day(2026, 2, 14);
        let via_provider = HorizonScan.solar_time(date, &coords);
        let direct = SolarTime::new(date, &coords);
        assert_eq!(via_provider, direct);
    }
}
