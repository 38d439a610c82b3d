//! Collaborator-side Connectors for VitalGuard Pipelines
//!
//! ## Overview
//!
//! The core pipeline is synchronous and never blocks on I/O. It talks to the
//! outside world through two narrow traits: an [`AlertSink`] that receives
//! threshold alerts and a [`PatientDirectory`] that answers date-of-birth
//! lookups. This crate provides implementations of both for services that
//! run on tokio.
//!
//! ## Handing Alerts to Async Code
//!
//! [`ChannelAlertSink`] is the bridge. The pipeline calls `deliver`, which
//! never blocks: the alert goes into a bounded tokio channel, or is dropped
//! and counted when the channel is full or closed. On the other side an
//! [`AlertReceiver`] forwards alerts to any [`AsyncAlertSink`] (a pager, a
//! message queue, a ward dashboard).
//!
//! ```text
//! pipeline.assess() ──deliver──▶ ChannelAlertSink ══mpsc══▶ AlertReceiver ──send──▶ AsyncAlertSink
//! ```
//!
//! Assessment latency never depends on the consumer. Alerts lost to
//! back-pressure are counted in [`DeliveryStats::dropped`].
//!
//! ## Example Usage
//!
//! ```rust
//! use vitalguard_connectors::{alert_channel, LogAlertSink};
//!
//! # async fn example() {
//! let (sink, receiver) = alert_channel(64);
//! // hand `sink` to RiskAssessmentPipeline::builder(..).build(sink, clock)
//! # drop(sink);
//! let forwarded = receiver.forward_to(&LogAlertSink::default()).await;
//! # assert_eq!(forwarded.delivered, 0);
//! # }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use vitalguard_core::AlertEvent;

pub use vitalguard_core::traits::{AlertSink, PatientDirectory};

pub mod channel;
pub mod directory;
pub mod encoding;
pub mod log_sink;

pub use channel::{alert_channel, AlertReceiver, ChannelAlertSink};
pub use directory::InMemoryPatientDirectory;
pub use encoding::{decode_alert, encode_alert};
pub use log_sink::LogAlertSink;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Channel closed")]
    Closed,

    #[error("Buffer full")]
    BufferFull,

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Async destination for alerts
///
/// Unlike the core [`AlertSink`], delivery is awaited and may fail.
#[async_trait]
pub trait AsyncAlertSink: Send + Sync {
    /// Deliver one alert
    async fn send(&self, alert: AlertEvent) -> Result<(), ConnectorError>;

    /// Get delivery statistics
    fn stats(&self) -> DeliveryStats;
}

/// Async date-of-birth lookup
#[async_trait]
pub trait AsyncPatientDirectory: Send + Sync {
    /// Date of birth on record, if any
    async fn date_of_birth(&self, patient_id: &str) -> Option<NaiveDate>;
}

/// Delivery statistics common to all sinks
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Alerts handed on successfully
    pub delivered: u64,
    /// Alerts lost to a full or closed channel
    pub dropped: u64,
    /// Alerts the downstream sink rejected
    pub failed: u64,
    /// Last error message
    pub last_error: Option<String>,
}

impl DeliveryStats {
    fn record_failure(&mut self, error: &ConnectorError) {
        self.failed += 1;
        self.last_error = Some(error.to_string());
    }
}
