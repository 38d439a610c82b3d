//! Alert delivery

use crate::alerts::AlertEvent;

/// Destination for threshold alerts
///
/// Fire-and-forget: the pipeline hands the alert over and does not observe
/// the outcome. Sinks that can fail must handle (log, retry, drop) failures
/// themselves.
pub trait AlertSink {
    /// Take ownership of one alert
    fn deliver(&self, alert: AlertEvent);
}

impl<F> AlertSink for F
where
    F: Fn(AlertEvent),
{
    fn deliver(&self, alert: AlertEvent) {
        self(alert)
    }
}

/// Sink that drops every alert
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl AlertSink for DiscardSink {
    fn deliver(&self, _alert: AlertEvent) {}
}
