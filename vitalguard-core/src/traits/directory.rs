//! Patient metadata source

use chrono::NaiveDate;

/// Read-only lookup of patient dates of birth
///
/// Implementations that reach remote stores must resolve failures to `None`;
/// the assessment then proceeds without age-specific thresholds.
pub trait PatientDirectory {
    /// Date of birth on record, if any
    fn date_of_birth(&self, patient_id: &str) -> Option<NaiveDate>;
}

impl<F> PatientDirectory for F
where
    F: Fn(&str) -> Option<NaiveDate>,
{
    fn date_of_birth(&self, patient_id: &str) -> Option<NaiveDate> {
        self(patient_id)
    }
}
