//! Vital signs and their physiological domains
//!
//! [`VitalSigns`] is the crisp input to both halves of an assessment. It is
//! validated once at construction (finite, inside the physiological domain of
//! each vital) and immutable afterwards.

use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::clinical::{
        COUGH_COUNT_DOMAIN, HEART_RATE_DOMAIN, OXYGEN_SATURATION_DOMAIN,
        RESPIRATORY_RATE_DOMAIN, SLEEP_INTERRUPTIONS_DOMAIN, TEMPERATURE_DOMAIN,
    },
    errors::{AssessmentError, AssessmentResult},
    fuzzy::CrispInputs,
};

/// Vital sign kinds
///
/// The name of each vital doubles as the fuzzy variable name it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Vital {
    /// Breaths per minute
    RespiratoryRate,
    /// Beats per minute
    HeartRate,
    /// Peripheral oxygen saturation, percent
    OxygenSaturation,
    /// Body temperature, °C
    Temperature,
    /// Coughs in the observation window
    CoughCount,
    /// Sleep interruptions in the night
    SleepInterruptions,
}

impl Vital {
    /// Every vital, in the order they are reported
    pub const ALL: [Vital; 6] = [
        Vital::OxygenSaturation,
        Vital::RespiratoryRate,
        Vital::CoughCount,
        Vital::SleepInterruptions,
        Vital::HeartRate,
        Vital::Temperature,
    ];

    /// Machine name, also the fuzzy variable name
    pub const fn name(&self) -> &'static str {
        match self {
            Vital::RespiratoryRate => "respiratory_rate",
            Vital::HeartRate => "heart_rate",
            Vital::OxygenSaturation => "oxygen_saturation",
            Vital::Temperature => "temperature",
            Vital::CoughCount => "cough_count",
            Vital::SleepInterruptions => "sleep_interruptions",
        }
    }

    /// Unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Vital::RespiratoryRate => "breaths/min",
            Vital::HeartRate => "bpm",
            Vital::OxygenSaturation => "%",
            Vital::Temperature => "°C",
            Vital::CoughCount => "coughs",
            Vital::SleepInterruptions => "interruptions",
        }
    }

    /// Plausible (min, max) for this vital
    pub const fn domain(&self) -> (f64, f64) {
        match self {
            Vital::RespiratoryRate => RESPIRATORY_RATE_DOMAIN,
            Vital::HeartRate => HEART_RATE_DOMAIN,
            Vital::OxygenSaturation => OXYGEN_SATURATION_DOMAIN,
            Vital::Temperature => TEMPERATURE_DOMAIN,
            Vital::CoughCount => COUGH_COUNT_DOMAIN,
            Vital::SleepInterruptions => SLEEP_INTERRUPTIONS_DOMAIN,
        }
    }

    /// Resolve a vital from its machine name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|vital| vital.name() == name)
    }
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check a vital reading against its physiological domain
pub fn check_range(vital: Vital, value: f64) -> AssessmentResult<f64> {
    if !value.is_finite() {
        return Err(AssessmentError::InvalidValue {
            variable: vital.name().to_string(),
        });
    }

    let (min, max) = vital.domain();
    if value < min || value > max {
        Err(AssessmentError::OutOfRange {
            vital,
            value,
            min,
            max,
        })
    } else {
        Ok(value)
    }
}

/// One patient's vitals for one assessment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VitalSigns {
    respiratory_rate: f64,
    heart_rate: f64,
    oxygen_saturation: f64,
    temperature: f64,
    cough_count: f64,
    sleep_interruptions: f64,
}

impl VitalSigns {
    /// Validate and bundle a set of vitals
    pub fn new(
        respiratory_rate: f64,
        heart_rate: f64,
        oxygen_saturation: f64,
        temperature: f64,
        cough_count: f64,
        sleep_interruptions: f64,
    ) -> AssessmentResult<Self> {
        Ok(Self {
            respiratory_rate: check_range(Vital::RespiratoryRate, respiratory_rate)?,
            heart_rate: check_range(Vital::HeartRate, heart_rate)?,
            oxygen_saturation: check_range(Vital::OxygenSaturation, oxygen_saturation)?,
            temperature: check_range(Vital::Temperature, temperature)?,
            cough_count: check_range(Vital::CoughCount, cough_count)?,
            sleep_interruptions: check_range(Vital::SleepInterruptions, sleep_interruptions)?,
        })
    }

    /// Breaths per minute
    pub fn respiratory_rate(&self) -> f64 {
        self.respiratory_rate
    }

    /// Beats per minute
    pub fn heart_rate(&self) -> f64 {
        self.heart_rate
    }

    /// SpO2, percent
    pub fn oxygen_saturation(&self) -> f64 {
        self.oxygen_saturation
    }

    /// Body temperature, °C
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Coughs in the observation window
    pub fn cough_count(&self) -> f64 {
        self.cough_count
    }

    /// Sleep interruptions in the night
    pub fn sleep_interruptions(&self) -> f64 {
        self.sleep_interruptions
    }

    /// Value of one vital
    pub fn get(&self, vital: Vital) -> f64 {
        match vital {
            Vital::RespiratoryRate => self.respiratory_rate,
            Vital::HeartRate => self.heart_rate,
            Vital::OxygenSaturation => self.oxygen_saturation,
            Vital::Temperature => self.temperature,
            Vital::CoughCount => self.cough_count,
            Vital::SleepInterruptions => self.sleep_interruptions,
        }
    }

    /// Crisp inputs keyed by fuzzy variable name
    pub fn crisp_inputs(&self) -> CrispInputs {
        Vital::ALL
            .into_iter()
            .map(|vital| (String::from(vital.name()), self.get(vital)))
            .collect()
    }
}

impl fmt::Display for VitalSigns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Oxygen Saturation: {:.2}%, Respiratory Rate: {:.2} breaths/min, \
             Heart Rate: {:.2} bpm, Body Temperature: {:.2}°C, \
             Cough Count: {}, Sleep Interruptions: {}",
            self.oxygen_saturation,
            self.respiratory_rate,
            self.heart_rate,
            self.temperature,
            self.cough_count,
            self.sleep_interruptions,
        )
    }
}
