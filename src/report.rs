//! Presentable resolution output shared by the CLI and the HTTP API.

use crate::clock::TimeComponents;
use crate::coordinates::Coordinates;
use crate::resolution::{resolve, PolarCircleResolution, ResolvedValues};
use crate::solar::{SolarTime, SolarTimeProvider};
use chrono::NaiveDate;
use serde::Serialize;

/// Full report: what was asked, what was used, and the solar times for
/// the reference day and its follower.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub resolution: PolarCircleResolution,
    pub date: String,
    pub tomorrow: String,
    pub requested: Coordinates,
    pub used: Coordinates,
    /// True when Aqrab Balad substituted a latitude.
    pub latitude_adjusted: bool,
    /// True when both days carry defined sunrise and sunset.
    pub valid: bool,
    pub day: DayTimes,
    pub next_day: DayTimes,
}

/// One day's events, both as raw fractional hours (null in JSON when the
/// event is missing) and as formatted clock strings.
#[derive(Debug, Clone, Serialize)]
pub struct DayTimes {
    pub hours: SolarTime,
    pub sunrise: Option<String>,
    pub transit: Option<String>,
    pub sunset: Option<String>,
}

impl DayTimes {
    fn from_solar(solar: &SolarTime) -> Self {
        let clock = |h: f64| TimeComponents::from_hours(h).map(|t| t.to_string());
        Self {
            hours: *solar,
            sunrise: clock(solar.sunrise),
            transit: clock(solar.transit),
            sunset: clock(solar.sunset),
        }
    }
}

/// Run the dispatcher and wrap the outcome for presentation.
pub fn build_report<P: SolarTimeProvider>(
    provider: &P,
    resolution: PolarCircleResolution,
    date: NaiveDate,
    coordinates: &Coordinates,
) -> ResolutionReport {
    let outcome: ResolvedValues = resolve(provider, resolution, date, coordinates);

    ResolutionReport {
        resolution,
        date: outcome.date.to_string(),
        tomorrow: outcome.tomorrow.to_string(),
        requested: *coordinates,
        used: outcome.coordinates,
        latitude_adjusted: outcome.coordinates.latitude != coordinates.latitude,
        valid: outcome.solar_time.is_valid() && outcome.tomorrow_solar_time.is_valid(),
        day: DayTimes::from_solar(&outcome.solar_time),
        next_day: DayTimes::from_solar(&outcome.tomorrow_solar_time),
    }
}

// ─── Text rendering ─────────────────────────────────────────────

const MISSING: &str = "--:--:--";

fn row(label: &str, date: &str, times: &DayTimes) -> String {
    format!(
        "  \u{2502} {:<9} {}  rise {:>8}  noon {:>8}  set {:>8} \u{2502}\n",
        label,
        date,
        times.sunrise.as_deref().unwrap_or(MISSING),
        times.transit.as_deref().unwrap_or(MISSING),
        times.sunset.as_deref().unwrap_or(MISSING),
    )
}

/// Plain-text summary for the CLI, in the spirit of the schedule box the
/// engine's interactive output uses elsewhere.
pub fn render_report(report: &ResolutionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("  Resolution: {}", report.resolution));
    if !report.valid {
        out.push_str("  (unresolved: values below may be missing)");
    }
    out.push('\n');

    out.push_str(&format!("  Requested:  {}\n", report.requested));
    if report.latitude_adjusted {
        out.push_str(&format!("  Used:       {}  (latitude adjusted)\n", report.used));
    }

    let width = 66;
    out.push_str(&format!("  \u{250C}{}\u{2510}\n", "\u{2500}".repeat(width)));
    out.push_str(&row("today", &report.date, &report.day));
    out.push_str(&row("tomorrow", &report.tomorrow, &report.next_day));
    out.push_str(&format!("  \u{2514}{}\u{2518}\n", "\u{2500}".repeat(width)));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::SolarTime;
    use chrono::NaiveDate;

    struct FixedSky(SolarTime);

    impl SolarTimeProvider for FixedSky {
        fn solar_time(&self, _date: NaiveDate, _coordinates: &Coordinates) -> SolarTime {
            self.0
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 21).unwrap()
    }

    #[test]
    fn test_report_valid_day() {
        let sky = FixedSky(SolarTime { sunrise: 9.25, transit: 11.5, sunset: 13.75 });
        let coords = Coordinates::new(59.3293, 18.0686);

        let report = build_report(&sky, PolarCircleResolution::Unresolved, date(), &coords);

        assert!(report.valid);
        assert!(!report.latitude_adjusted);
        assert_eq!(report.date, "2025-12-21");
        assert_eq!(report.tomorrow, "2025-12-22");
        assert_eq!(report.day.sunrise.as_deref(), Some("09:15:00"));
        assert_eq!(report.day.sunset.as_deref(), Some("13:45:00"));
    }

    #[test]
    fn test_report_missing_events() {
        let sky = FixedSky(SolarTime { sunrise: f64::NAN, transit: 11.5, sunset: f64::NAN });
        let coords = Coordinates::new(78.2232, 15.6267);

        let report = build_report(&sky, PolarCircleResolution::Unresolved, date(), &coords);

        assert!(!report.valid);
        assert!(report.day.sunrise.is_none());
        assert!(report.day.sunset.is_none());
        assert!(report.day.transit.is_some());

        // NaN hours serialize as null, not as a number
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"sunrise\":null"));
    }

    #[test]
    fn test_render_contains_rows() {
        let sky = FixedSky(SolarTime { sunrise: 9.25, transit: 11.5, sunset: 13.75 });
        let coords = Coordinates::new(59.3293, 18.0686);
        let report = build_report(&sky, PolarCircleResolution::AqrabYaum, date(), &coords);

        let text = render_report(&report);
        println!("{}", text);
        assert!(text.contains("AqrabYaum"));
        assert!(text.contains("today"));
        assert!(text.contains("tomorrow"));
        assert!(text.contains("09:15:00"));
    }

    #[test]
    fn test_render_marks_missing() {
        let sky = FixedSky(SolarTime { sunrise: f64::NAN, transit: 11.5, sunset: f64::NAN });
        let coords = Coordinates::new(78.2232, 15.6267);
        let report = build_report(&sky, PolarCircleResolution::Unresolved, date(), &coords);

        let text = render_report(&report);
        println!("{}", text);
        assert!(text.contains(MISSING));
        assert!(text.contains("unresolved"));
    }
}
