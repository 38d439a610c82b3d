//! Signal Processing Constants
//!
//! Parameters for turning accelerometer and PPG series into vitals.

/// Moving-average window applied to chest-movement signals (samples).
///
/// Suppresses sensor noise without flattening individual breaths at 50 Hz.
pub const SMOOTHING_WINDOW_SAMPLES: usize = 5;

/// Minimum spacing between two detected peaks (seconds).
///
/// At sampling rate `fs` this is `fs / 2` samples, capping detectable rates
/// at 120 per minute for breathing and beats alike.
pub const MIN_PEAK_SPACING_S: f64 = 0.5;

/// Smoothed samples needed before respiratory peaks are searched.
pub const MIN_SMOOTHED_SAMPLES: usize = 2;

/// Peaks needed to form at least one inter-beat interval.
pub const MIN_HEART_RATE_PEAKS: usize = 2;

/// Seconds in one minute, for per-minute rates.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

// ===== PULSE OXIMETRY =====

/// Intercept of the empirical ratio-of-ratios calibration line (%).
///
/// SpO2 = 110 - 25 * R
///
/// Source: linear approximation of the Beer-Lambert derived calibration curve
/// used by low-cost reflective oximeters (MAX3010x application notes)
pub const SPO2_INTERCEPT_PCT: f64 = 110.0;

/// Slope of the ratio-of-ratios calibration line (% per unit R).
pub const SPO2_SLOPE_PCT: f64 = 25.0;

/// Lowest SpO2 the calibration line is trusted for (%).
pub const SPO2_CLAMP_MIN_PCT: f64 = 85.0;

/// Highest reportable SpO2 (%).
pub const SPO2_CLAMP_MAX_PCT: f64 = 100.0;
