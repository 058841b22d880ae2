//! Aqrab: polar circle resolution for prayer-time astronomy.
//!
//! At latitudes near or beyond the polar circles, a calendar date may
//! have no sunrise, no sunset, or neither. Downstream sunrise/sunset
//! consumers need a definite pair for every date and location, so this
//! crate searches for a substitute when the real sky provides none:
//!
//! - [`resolution::PolarCircleResolution::AqrabYaum`] shifts the
//!   reference date to the nearest day with a normal sun cycle;
//! - [`resolution::PolarCircleResolution::AqrabBalad`] pulls the
//!   latitude back toward the equator in half-degree steps;
//! - [`resolution::PolarCircleResolution::Unresolved`] reports the raw
//!   values, NaN fields included.
//!
//! Solar geometry lives behind [`solar::SolarTimeProvider`]; the shipped
//! implementation ([`solar::HorizonScan`]) scans the day's altitude
//! curve with a simplified SPA model. The `aqrab` binary wraps the
//! engine as a CLI and as a small HTTP API.

pub mod clock;
pub mod coordinates;
pub mod report;
pub mod resolution;
pub mod server;
pub mod solar;

pub use coordinates::Coordinates;
pub use resolution::{resolve, PolarCircleResolution, ResolvedValues};
pub use solar::{HorizonScan, SolarTime, SolarTimeProvider};
