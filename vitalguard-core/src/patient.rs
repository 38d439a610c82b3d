//! Patient metadata and age derivation

use alloc::string::String;

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::PatientDirectory;

/// Days per year used for the fractional part of an age
const DAYS_PER_YEAR: f64 = 365.25;

/// Identifier plus optional date of birth
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatientProfile {
    id: String,
    date_of_birth: Option<NaiveDate>,
}

impl PatientProfile {
    /// Profile with a known or unknown date of birth
    pub fn new(id: impl Into<String>, date_of_birth: Option<NaiveDate>) -> Self {
        Self {
            id: id.into(),
            date_of_birth,
        }
    }

    /// Profile whose date of birth comes from a metadata source
    pub fn from_directory<D: PatientDirectory + ?Sized>(id: impl Into<String>, directory: &D) -> Self {
        let id = id.into();
        let date_of_birth = directory.date_of_birth(&id);
        if date_of_birth.is_none() {
            log_debug!("no date of birth on record for patient {}", id);
        }
        Self { id, date_of_birth }
    }

    /// Patient identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Date of birth, when known
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Age in years on `as_of`: whole years plus days since the last birthday
    ///
    /// `None` without a date of birth. A birth date after `as_of` gives a
    /// negative age, which categorizes as unknown.
    pub fn age_years(&self, as_of: NaiveDate) -> Option<f64> {
        let dob = self.date_of_birth?;
        if as_of < dob {
            return Some(-((dob - as_of).num_days() as f64) / DAYS_PER_YEAR);
        }

        let mut years = as_of.year() - dob.year();
        if birthday_in(dob, as_of.year()) > as_of {
            years -= 1;
        }
        let last_birthday = birthday_in(dob, dob.year() + years);
        let days = (as_of - last_birthday).num_days();

        Some(years as f64 + days as f64 / DAYS_PER_YEAR)
    }
}

/// Birthday of `dob` in `year`; Feb 29 falls on Mar 1 in common years
fn birthday_in(dob: NaiveDate, year: i32) -> NaiveDate {
    dob.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(dob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{collections::BTreeMap, string::ToString};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn whole_years_on_birthday() {
        let patient = PatientProfile::new("p", Some(date(2020, 6, 15)));
        assert_eq!(patient.age_years(date(2025, 6, 15)), Some(5.0));

        let day_before = patient.age_years(date(2025, 6, 14)).unwrap();
        assert!(day_before < 5.0 && day_before > 4.99);
    }

    #[test]
    fn leap_day_birthday() {
        let patient = PatientProfile::new("p", Some(date(2020, 2, 29)));
        // Common year: birthday observed on Mar 1
        assert_eq!(patient.age_years(date(2021, 3, 1)), Some(1.0));
        assert!(patient.age_years(date(2021, 2, 28)).unwrap() < 1.0);
        assert_eq!(patient.age_years(date(2024, 2, 29)), Some(4.0));
    }

    #[test]
    fn unknown_or_future_birth() {
        assert_eq!(PatientProfile::new("p", None).age_years(date(2025, 1, 1)), None);

        let unborn = PatientProfile::new("p", Some(date(2026, 1, 1)));
        assert!(unborn.age_years(date(2025, 1, 1)).unwrap() < 0.0);
    }

    #[test]
    fn profile_from_directory() {
        let mut records = BTreeMap::new();
        records.insert("p-1".to_string(), date(2019, 1, 1));
        let lookup = |id: &str| records.get(id).copied();

        let known = PatientProfile::from_directory("p-1", &lookup);
        assert_eq!(known.date_of_birth(), Some(date(2019, 1, 1)));

        let unknown = PatientProfile::from_directory("p-2", &lookup);
        assert_eq!(unknown.id(), "p-2");
        assert_eq!(unknown.date_of_birth(), None);
    }
}
