use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::coordinates::Coordinates;
use crate::report::{build_report, ResolutionReport};
use crate::solar::HorizonScan;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<String>,
    pub resolution: Option<String>,
}

pub async fn resolve_times(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolutionReport>, ApiError> {
    let start = Instant::now();

    if !(-90.0..=90.0).contains(&params.lat) || !(-180.0..=180.0).contains(&params.lon) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates. Lat: -90..90, Lon: -180..180",
        ));
    }

    let date = parse_date(params.date.as_deref())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    // An unrecognized strategy name behaves like no strategy at all: the
    // dispatcher's contract is that anything it does not know yields the
    // unresolved default.
    let resolution = params
        .resolution
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(state.default_resolution);

    let coordinates = Coordinates::new(params.lat, params.lon);
    let report = build_report(&HorizonScan, resolution, date, &coordinates);

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /api/resolve lat={} lon={} date={} resolution={} -> valid={} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        params.lat,
        params.lon,
        date,
        resolution,
        report.valid,
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(report))
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{}': {}", d, e)),
        None => Ok(Utc::now().naive_utc().date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_explicit() {
        let date = parse_date(Some("2025-12-21")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date(Some("21/12/2025")).is_err());
        assert!(parse_date(Some("not-a-date")).is_err());
    }

    #[test]
    fn test_parse_date_defaults_to_today() {
        assert_eq!(parse_date(None).unwrap(), Utc::now().naive_utc().date());
    }
}
