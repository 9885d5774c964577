/// Per-frame rotation increment around the X-axis
const ANGLE_A_STEP: f64 = 0.04;
/// Per-frame rotation increment around the Z-axis
const ANGLE_B_STEP: f64 = 0.02;

/// Application state
pub struct AppState {
    /// Current rotation angle around the X-axis, in radians (unbounded)
    pub angle_a: f64,
    /// Current rotation angle around the Z-axis, in radians (unbounded)
    pub angle_b: f64,
    /// Simulation paused
    pub paused: bool,
    /// Enable debug mode
    pub debug: bool,
}

impl AppState {
    pub fn new(debug: bool) -> Self {
        AppState {
            angle_a: 0.0,
            angle_b: 0.0,
            paused: false,
            debug,
        }
    }

    /// Advances the rotation by one frame, after that frame has rendered.
    pub fn advance(&mut self) {
        self.angle_a += ANGLE_A_STEP;
        self.angle_b += ANGLE_B_STEP;
    }
}
