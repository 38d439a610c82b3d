//! Alert sink that writes to the `log` facade

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use vitalguard_core::{traits::AlertSink, AlertEvent};

use crate::{AsyncAlertSink, ConnectorError, DeliveryStats};

/// Logs every alert at `warn` under a configurable target
#[derive(Debug, Clone)]
pub struct LogAlertSink {
    target: String,
    stats: Arc<Mutex<DeliveryStats>>,
}

impl LogAlertSink {
    /// Sink logging under `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            stats: Arc::default(),
        }
    }

    /// Log target
    pub fn target(&self) -> &str {
        &self.target
    }

    fn write(&self, alert: &AlertEvent) {
        log::warn!(target: &self.target, "{alert}");
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .delivered += 1;
    }
}

impl Default for LogAlertSink {
    fn default() -> Self {
        Self::new("vitalguard::alerts")
    }
}

impl AlertSink for LogAlertSink {
    fn deliver(&self, alert: AlertEvent) {
        self.write(&alert);
    }
}

#[async_trait]
impl AsyncAlertSink for LogAlertSink {
    async fn send(&self, alert: AlertEvent) -> Result<(), ConnectorError> {
        self.write(&alert);
        Ok(())
    }

    fn stats(&self) -> DeliveryStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_sync_and_async_deliveries() {
        let sink = LogAlertSink::new("test::alerts");
        assert_eq!(sink.target(), "test::alerts");

        sink.deliver(AlertEvent::emergency("p1", &[], None, 0));
        sink.send(AlertEvent::emergency("p2", &[], None, 0)).await.unwrap();

        assert_eq!(AsyncAlertSink::stats(&sink).delivered, 2);
    }
}
