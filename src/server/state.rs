use crate::resolution::PolarCircleResolution;

pub struct AppState {
    /// Strategy applied when a request does not name one.
    pub default_resolution: PolarCircleResolution,
}
