//! Vital-Sign Extraction from Raw Biosignals
//!
//! ## Overview
//!
//! Wearables deliver two kinds of raw series:
//!
//! - **Accelerometer** on the chest: each breath lifts and drops the chest wall,
//!   so breathing shows up as a slow oscillation (0.1 - 1 Hz).
//! - **Photoplethysmogram (PPG)** in red and infrared: each heartbeat pushes a
//!   pulse of blood under the sensor, so the pulse shows up as a faster
//!   oscillation (1 - 3 Hz) riding on a large constant (DC) level.
//!
//! [`SignalProcessor`] turns these into scalar vitals:
//!
//! | Vital              | Input           | Method                                   |
//! |--------------------|-----------------|------------------------------------------|
//! | Respiratory rate   | accelerometer   | moving average, peak count per minute    |
//! | Heart rate         | PPG (infrared)  | mean inter-peak interval                 |
//! | Oxygen saturation  | PPG red + IR    | ratio of AC/DC ratios, linear calibration|
//!
//! ## Failure Policy
//!
//! A rate that cannot be measured is an error. A window with one visible beat
//! does not become "probably 80 bpm": it becomes
//! [`AssessmentError::InsufficientSignal`] and the caller re-acquires.
//!
//! ## Peak Spacing
//!
//! Peaks closer than half a second are merged into the tallest one. At 50 Hz
//! that is 25 samples, which caps both rates at 120 per minute and stops noise
//! ripples on one breath from being counted twice.

mod peaks;

pub use peaks::{find_peaks, local_maxima, moving_average, select_by_distance};

use alloc::{string::ToString, vec::Vec};

use crate::{
    constants::signal::{
        MIN_HEART_RATE_PEAKS, MIN_PEAK_SPACING_S, MIN_SMOOTHED_SAMPLES, SECONDS_PER_MINUTE,
        SMOOTHING_WINDOW_SAMPLES, SPO2_CLAMP_MAX_PCT, SPO2_CLAMP_MIN_PCT, SPO2_INTERCEPT_PCT,
        SPO2_SLOPE_PCT,
    },
    errors::{AssessmentError, AssessmentResult},
    vitals::{Vital, VitalSigns},
};

/// Sampled series with its sampling rate; immutable once captured
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate: f64,
}

impl Signal {
    /// Capture a series sampled at `sampling_rate` Hz
    ///
    /// Rejects non-positive or non-finite rates and non-finite samples.
    pub fn new(samples: Vec<f64>, sampling_rate: f64) -> AssessmentResult<Self> {
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(AssessmentError::InvalidValue {
                variable: "sampling_rate".to_string(),
            });
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(AssessmentError::InvalidValue {
                variable: "signal sample".to_string(),
            });
        }

        Ok(Self {
            samples,
            sampling_rate,
        })
    }

    /// Raw samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Covered time span in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate
    }

    /// Peak-to-peak amplitude (AC component)
    fn peak_to_peak(&self) -> f64 {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        max - min
    }

    /// Mean level (DC component)
    fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Whether the mean is indistinguishable from summation round-off
    fn has_zero_dc(&self) -> bool {
        let largest = self
            .samples
            .iter()
            .fold(0.0, |acc: f64, &s| acc.max(libm::fabs(s)));
        let tolerance = f64::EPSILON * largest * self.samples.len() as f64;
        libm::fabs(self.mean()) <= tolerance
    }
}

/// Everything the wearable and the bedside chart deliver for one assessment
#[derive(Debug, Clone)]
pub struct RawSignals {
    /// Chest accelerometer series
    pub accelerometer: Signal,
    /// Red-light PPG channel
    pub ppg_red: Signal,
    /// Infrared PPG channel, also used for heart rate
    pub ppg_ir: Signal,
    /// Body temperature, °C
    pub temperature: f64,
    /// Coughs in the observation window
    pub cough_count: f64,
    /// Sleep interruptions in the night
    pub sleep_interruptions: f64,
}

/// Extracts vitals from raw biosignals
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    /// Moving-average width for accelerometer smoothing (samples)
    smoothing_window: usize,
    /// Minimum time between peaks (seconds)
    min_peak_spacing_s: f64,
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self {
            smoothing_window: SMOOTHING_WINDOW_SAMPLES,
            min_peak_spacing_s: MIN_PEAK_SPACING_S,
        }
    }
}

impl SignalProcessor {
    /// Processor with a custom smoothing window (at least one sample)
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window.max(1);
        self
    }

    /// Processor with a custom minimum peak spacing in seconds
    pub fn with_min_peak_spacing(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.min_peak_spacing_s = seconds;
        }
        self
    }

    /// Minimum peak distance in samples for a given sampling rate
    fn min_peak_distance(&self, sampling_rate: f64) -> f64 {
        sampling_rate * self.min_peak_spacing_s
    }

    /// Breaths per minute from a chest accelerometer series
    pub fn respiratory_rate(&self, signal: &Signal) -> AssessmentResult<f64> {
        let smoothed = moving_average(signal.samples(), self.smoothing_window);
        if smoothed.len() < MIN_SMOOTHED_SAMPLES {
            return Err(AssessmentError::InsufficientSignal {
                vital: Vital::RespiratoryRate,
                what: "smoothed samples",
                required: MIN_SMOOTHED_SAMPLES,
                available: smoothed.len(),
            });
        }

        let duration = signal.duration_secs();
        if duration <= 0.0 {
            return Err(AssessmentError::InsufficientSignal {
                vital: Vital::RespiratoryRate,
                what: "seconds of signal",
                required: 1,
                available: 0,
            });
        }

        let peaks = find_peaks(&smoothed, self.min_peak_distance(signal.sampling_rate()));
        Ok(peaks.len() as f64 / duration * SECONDS_PER_MINUTE)
    }

    /// Beats per minute from a PPG series
    pub fn heart_rate(&self, ppg: &Signal) -> AssessmentResult<f64> {
        let peaks = find_peaks(ppg.samples(), self.min_peak_distance(ppg.sampling_rate()));
        if peaks.len() < MIN_HEART_RATE_PEAKS {
            return Err(AssessmentError::InsufficientSignal {
                vital: Vital::HeartRate,
                what: "peaks",
                required: MIN_HEART_RATE_PEAKS,
                available: peaks.len(),
            });
        }

        let intervals = peaks.len() - 1;
        let total_samples: usize = peaks.windows(2).map(|pair| pair[1] - pair[0]).sum();
        let mean_interval_s = total_samples as f64 / intervals as f64 / ppg.sampling_rate();

        Ok(SECONDS_PER_MINUTE / mean_interval_s)
    }

    /// SpO2 percentage from red and infrared PPG channels
    ///
    /// Uses the ratio of ratios `R = (AC_red / DC_red) / (AC_ir / DC_ir)` and
    /// the linear calibration `110 - 25 R`, clamped to [85, 100].
    pub fn oxygen_saturation(&self, ppg_red: &Signal, ppg_ir: &Signal) -> AssessmentResult<f64> {
        for channel in [ppg_red, ppg_ir] {
            if channel.is_empty() {
                return Err(AssessmentError::InsufficientSignal {
                    vital: Vital::OxygenSaturation,
                    what: "samples per channel",
                    required: 1,
                    available: 0,
                });
            }
        }

        if ppg_red.has_zero_dc() || ppg_ir.has_zero_dc() {
            return Err(AssessmentError::DegenerateSignal {
                vital: Vital::OxygenSaturation,
                reason: "zero DC level",
            });
        }
        let (ac_red, dc_red) = (ppg_red.peak_to_peak(), ppg_red.mean());
        let (ac_ir, dc_ir) = (ppg_ir.peak_to_peak(), ppg_ir.mean());

        if ac_ir == 0.0 {
            return Err(AssessmentError::DegenerateSignal {
                vital: Vital::OxygenSaturation,
                reason: "flat infrared channel",
            });
        }

        let ratio = (ac_red / dc_red) / (ac_ir / dc_ir);
        let spo2 = SPO2_INTERCEPT_PCT - SPO2_SLOPE_PCT * ratio;
        if !spo2.is_finite() {
            return Err(AssessmentError::DegenerateSignal {
                vital: Vital::OxygenSaturation,
                reason: "ratio of ratios is not finite",
            });
        }

        Ok(spo2.clamp(SPO2_CLAMP_MIN_PCT, SPO2_CLAMP_MAX_PCT))
    }

    /// Derive a full, validated vital set from raw signals and observations
    pub fn vitals_from(&self, raw: &RawSignals) -> AssessmentResult<VitalSigns> {
        let respiratory_rate = self.respiratory_rate(&raw.accelerometer)?;
        let heart_rate = self.heart_rate(&raw.ppg_ir)?;
        let oxygen_saturation = self.oxygen_saturation(&raw.ppg_red, &raw.ppg_ir)?;

        log_debug!(
            "extracted vitals: rr={:.1} hr={:.1} spo2={:.1}",
            respiratory_rate,
            heart_rate,
            oxygen_saturation
        );

        VitalSigns::new(
            respiratory_rate,
            heart_rate,
            oxygen_saturation,
            raw.temperature,
            raw.cough_count,
            raw.sleep_interruptions,
        )
    }
}
