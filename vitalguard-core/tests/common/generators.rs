//! Synthetic biosignal generators
//!
//! Deterministic stand-ins for wearable recordings:
//! - Chest accelerometer: slow sinusoid at the breathing frequency
//! - PPG: pulse-rate sinusoid riding on a large DC level
//! - Optional seeded noise for robustness checks

use std::f64::consts::PI;

use vitalguard_core::{RawSignals, Signal};

/// Sampling rate used by the reference wearable (Hz)
pub const WEARABLE_RATE_HZ: f64 = 50.0;

/// `amplitude * sin(2π f t) + offset`, sampled for `duration_s` seconds
pub fn sine(frequency_hz: f64, amplitude: f64, offset: f64, duration_s: f64, rate_hz: f64) -> Vec<f64> {
    let n = (duration_s * rate_hz).round() as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / rate_hz;
            offset + amplitude * (2.0 * PI * frequency_hz * t).sin()
        })
        .collect()
}

/// Chest accelerometer for a given breathing rate (breaths/min)
pub fn breathing(breaths_per_min: f64, duration_s: f64) -> Signal {
    let samples = sine(breaths_per_min / 60.0, 1.0, 0.0, duration_s, WEARABLE_RATE_HZ);
    Signal::new(samples, WEARABLE_RATE_HZ).expect("valid breathing signal")
}

/// PPG channel for a given pulse rate (bpm), pulse amplitude and DC level
pub fn ppg(beats_per_min: f64, amplitude: f64, dc_level: f64, duration_s: f64) -> Signal {
    let samples = sine(beats_per_min / 60.0, amplitude, dc_level, duration_s, WEARABLE_RATE_HZ);
    Signal::new(samples, WEARABLE_RATE_HZ).expect("valid ppg signal")
}

/// Full wearable bundle
///
/// The red pulse is half the infrared one at equal DC level, so the ratio of
/// ratios is 0.5 and SpO2 lands near 97.5%.
pub fn wearable_recording(breaths_per_min: f64, beats_per_min: f64) -> RawSignals {
    RawSignals {
        accelerometer: breathing(breaths_per_min, 60.0),
        ppg_red: ppg(beats_per_min, 1.0, 100.0, 10.0),
        ppg_ir: ppg(beats_per_min, 2.0, 100.0, 10.0),
        temperature: 36.9,
        cough_count: 2.0,
        sleep_interruptions: 1.0,
    }
}

/// Deterministic xorshift generator for reproducible noise
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform in [-amplitude, amplitude)
    pub fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// Add seeded uniform noise to a signal
pub fn with_noise(signal: &Signal, amplitude: f64, seed: u32) -> Signal {
    let mut rng = TestRng::new(seed);
    let samples = signal.samples().iter().map(|s| s + rng.noise(amplitude)).collect();
    Signal::new(samples, signal.sampling_rate()).expect("noisy signal stays finite")
}
