//! Bounded channel between the synchronous pipeline and async consumers

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use vitalguard_core::{traits::AlertSink, AlertEvent};

use crate::{AsyncAlertSink, ConnectorError, DeliveryStats};

/// Create a sink/receiver pair with room for `capacity` pending alerts
///
/// A capacity of zero is raised to one.
pub fn alert_channel(capacity: usize) -> (ChannelAlertSink, AlertReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let sink = ChannelAlertSink {
        tx,
        stats: Arc::new(Mutex::new(DeliveryStats::default())),
    };
    (sink, AlertReceiver { rx })
}

/// Sending half; cheap to clone and share between pipelines
#[derive(Debug, Clone)]
pub struct ChannelAlertSink {
    tx: mpsc::Sender<AlertEvent>,
    stats: Arc<Mutex<DeliveryStats>>,
}

impl ChannelAlertSink {
    /// Enqueue without waiting
    pub fn try_send(&self, alert: AlertEvent) -> Result<(), ConnectorError> {
        let patient_id = alert.patient_id.clone();
        let result = self.tx.try_send(alert).map_err(|e| match e {
            TrySendError::Full(_) => ConnectorError::BufferFull,
            TrySendError::Closed(_) => ConnectorError::Closed,
        });

        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        match &result {
            Ok(()) => stats.delivered += 1,
            Err(e) => {
                log::warn!("dropped alert for patient {patient_id}: {e}");
                stats.dropped += 1;
                stats.last_error = Some(e.to_string());
            }
        }
        result
    }

    /// Whether the receiving half is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Snapshot of the counters shared by every clone of this sink
    pub fn stats(&self) -> DeliveryStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AlertSink for ChannelAlertSink {
    fn deliver(&self, alert: AlertEvent) {
        // Failure already logged and counted
        let _ = self.try_send(alert);
    }
}

#[async_trait]
impl AsyncAlertSink for ChannelAlertSink {
    async fn send(&self, alert: AlertEvent) -> Result<(), ConnectorError> {
        let result = self.tx.send(alert).await.map_err(|_| ConnectorError::Closed);

        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        match &result {
            Ok(()) => stats.delivered += 1,
            Err(e) => {
                stats.dropped += 1;
                stats.last_error = Some(e.to_string());
            }
        }
        result
    }

    fn stats(&self) -> DeliveryStats {
        ChannelAlertSink::stats(self)
    }
}

/// Receiving half
#[derive(Debug)]
pub struct AlertReceiver {
    rx: mpsc::Receiver<AlertEvent>,
}

impl AlertReceiver {
    /// Next alert; `None` once every sender is dropped and the queue is empty
    pub async fn recv(&mut self) -> Option<AlertEvent> {
        self.rx.recv().await
    }

    /// Next alert if one is already queued
    pub fn try_recv(&mut self) -> Option<AlertEvent> {
        self.rx.try_recv().ok()
    }

    /// Forward every alert to `sink` until the channel closes
    ///
    /// Downstream failures are logged and counted; forwarding continues with
    /// the next alert.
    pub async fn forward_to<S>(mut self, sink: &S) -> DeliveryStats
    where
        S: AsyncAlertSink + ?Sized,
    {
        let mut stats = DeliveryStats::default();
        while let Some(alert) = self.rx.recv().await {
            let patient_id = alert.patient_id.clone();
            match sink.send(alert).await {
                Ok(()) => stats.delivered += 1,
                Err(e) => {
                    log::error!("alert for patient {patient_id} not delivered: {e}");
                    stats.record_failure(&e);
                }
            }
        }
        log::debug!("alert channel closed after {} deliveries", stats.delivered);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str) -> AlertEvent {
        AlertEvent::emergency(id, &[], None, 0)
    }

    #[test]
    fn full_channel_drops_and_counts() {
        let (sink, mut receiver) = alert_channel(1);

        sink.deliver(alert("a"));
        sink.deliver(alert("b"));

        let stats = sink.stats();
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.last_error.as_deref(), Some("Buffer full"));

        assert_eq!(receiver.try_recv().map(|a| a.patient_id), Some("a".to_string()));
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn closed_channel_reports_closed() {
        let (sink, receiver) = alert_channel(4);
        drop(receiver);

        assert!(sink.is_closed());
        assert!(matches!(sink.try_send(alert("a")), Err(ConnectorError::Closed)));
    }

    #[test]
    fn clones_share_counters() {
        let (sink, _receiver) = alert_channel(4);
        let other = sink.clone();

        sink.deliver(alert("a"));
        other.deliver(alert("b"));

        assert_eq!(sink.stats().delivered, 2);
    }

    #[tokio::test]
    async fn async_send_waits_for_room() {
        let (sink, mut receiver) = alert_channel(1);
        AsyncAlertSink::send(&sink, alert("a")).await.unwrap();

        let consumer = tokio::spawn(async move {
            let first = receiver.recv().await.map(|a| a.patient_id);
            let second = receiver.recv().await.map(|a| a.patient_id);
            (first, second)
        });
        AsyncAlertSink::send(&sink, alert("b")).await.unwrap();

        let (first, second) = consumer.await.unwrap();
        assert_eq!(first.as_deref(), Some("a"));
        assert_eq!(second.as_deref(), Some("b"));
    }
}
