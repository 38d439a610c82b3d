//! In-memory patient directory
//!
//! Suitable for tests, demos and small deployments that load a roster at
//! startup. Lookups of unknown patients return `None`, which the pipeline
//! treats as an unknown age.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use vitalguard_core::traits::PatientDirectory;

use crate::AsyncPatientDirectory;

/// Thread-safe map from patient id to date of birth
#[derive(Debug, Default)]
pub struct InMemoryPatientDirectory {
    records: RwLock<HashMap<String, NaiveDate>>,
}

impl InMemoryPatientDirectory {
    /// Empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record, returning the previous date of birth
    pub fn insert(&self, patient_id: impl Into<String>, date_of_birth: NaiveDate) -> Option<NaiveDate> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(patient_id.into(), date_of_birth)
    }

    /// Remove a record
    pub fn remove(&self, patient_id: &str) -> Option<NaiveDate> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(patient_id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the directory has no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<String>> FromIterator<(K, NaiveDate)> for InMemoryPatientDirectory {
    fn from_iter<I: IntoIterator<Item = (K, NaiveDate)>>(iter: I) -> Self {
        let records = iter.into_iter().map(|(id, dob)| (id.into(), dob)).collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl PatientDirectory for InMemoryPatientDirectory {
    fn date_of_birth(&self, patient_id: &str) -> Option<NaiveDate> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(patient_id)
            .copied()
    }
}

#[async_trait]
impl AsyncPatientDirectory for InMemoryPatientDirectory {
    async fn date_of_birth(&self, patient_id: &str) -> Option<NaiveDate> {
        PatientDirectory::date_of_birth(self, patient_id)
    }
}
