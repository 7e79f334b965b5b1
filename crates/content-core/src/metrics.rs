//! Metrics forwarding for the content-share stream
//!
//! The transport periodically reports a raw metrics mapping. This layer does
//! not interpret it: [`MetricsBridge`] hands each snapshot to the session's
//! [`MetricsCollector`] unchanged, and delivers an empty mapping as the reset
//! signal when the stream ends or fails. Aggregation is the collector's
//! concern.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// Raw metrics mapping reported by the transport, opaque to this layer
pub type MetricsSnapshot = HashMap<String, serde_json::Value>;

/// Sink for raw content-share metrics
///
/// An empty mapping means the stream ended and any derived state should be
/// cleared.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Consume one raw metrics mapping from the content-share stream
    async fn process_content_share_metrics(&self, metrics: MetricsSnapshot);
}

/// Stateless pass-through from the transport's metrics callback to the collector
pub struct MetricsBridge {
    collector: Arc<dyn MetricsCollector>,
}

impl MetricsBridge {
    pub fn new(collector: Arc<dyn MetricsCollector>) -> Self {
        Self { collector }
    }

    /// Deliver a snapshot to the collector unchanged
    pub async fn forward(&self, metrics: MetricsSnapshot) {
        self.collector.process_content_share_metrics(metrics).await;
    }

    /// Deliver the reset signal (an empty mapping)
    pub async fn reset(&self) {
        self.collector
            .process_content_share_metrics(MetricsSnapshot::new())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingCollector {
        received: Mutex<Vec<MetricsSnapshot>>,
    }

    #[async_trait]
    impl MetricsCollector for RecordingCollector {
        async fn process_content_share_metrics(&self, metrics: MetricsSnapshot) {
            self.received.lock().unwrap().push(metrics);
        }
    }

    #[tokio::test]
    async fn forward_passes_the_mapping_through_unchanged() {
        let collector = Arc::new(RecordingCollector {
            received: Mutex::new(Vec::new()),
        });
        let bridge = MetricsBridge::new(collector.clone());

        let mut snapshot = MetricsSnapshot::new();
        snapshot.insert("videoSendBitrate".to_string(), serde_json::json!(1800));
        snapshot.insert("videoSendFps".to_string(), serde_json::json!(15));
        bridge.forward(snapshot.clone()).await;

        let received = collector.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], snapshot);
    }

    #[tokio::test]
    async fn reset_delivers_an_empty_mapping() {
        let collector = Arc::new(RecordingCollector {
            received: Mutex::new(Vec::new()),
        });
        let bridge = MetricsBridge::new(collector.clone());

        bridge.reset().await;

        let received = collector.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].is_empty());
    }
}
