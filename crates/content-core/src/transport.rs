//! Trait surface of the underlying network video transport
//!
//! The transport itself — wire protocol, codec pipeline, connection
//! management — lives outside this crate. The controller drives it through
//! [`VideoTransport`] and receives its asynchronous callbacks through
//! [`VideoTransportObserver`]. The transport is assumed internally
//! thread-safe for every operation used here, and its callbacks arrive on its
//! own tasks, never on the caller's.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::{AppInfo, VideoTransportConfig};
use crate::error::Result;
use crate::metrics::MetricsSnapshot;
use crate::turn::TurnSessionResponse;

/// Opaque handle to the frames being shared (screen capture, window, file...)
///
/// Frame production and consumption are out of scope here; the controller
/// only rebinds the current source into the transport.
pub trait VideoSource: Send + Sync {}

/// Rebindable slot the transport reads its outbound frames from
///
/// Handing the binding (rather than the source) to the transport makes source
/// replacement idempotent: a later [`bind`](Self::bind) swaps the source
/// without touching the transport again.
pub struct VideoSourceBinding {
    source: RwLock<Option<Arc<dyn VideoSource>>>,
}

impl VideoSourceBinding {
    pub fn new() -> Self {
        Self {
            source: RwLock::new(None),
        }
    }

    /// Replace the bound source; safe whether or not one was already bound
    pub async fn bind(&self, source: Arc<dyn VideoSource>) {
        *self.source.write().await = Some(source);
    }

    /// The currently bound source, if any
    pub async fn current(&self) -> Option<Arc<dyn VideoSource>> {
        self.source.read().await.clone()
    }

    pub async fn is_bound(&self) -> bool {
        self.source.read().await.is_some()
    }
}

impl Default for VideoSourceBinding {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether in-band TURN handling is enabled when pushing credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFeature {
    Enabled,
    Disabled,
}

/// Severity of a log line forwarded from the transport's native logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportLogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Commands the controller issues to the transport
#[async_trait]
pub trait VideoTransport: Send + Sync {
    /// Connect the transport to the session
    ///
    /// `sending` is the initial send state; the controller always starts with
    /// sending disabled and enables it once the source is bound.
    async fn start(
        &self,
        meeting_id: &str,
        token: &str,
        sending: bool,
        config: &VideoTransportConfig,
        app_info: &AppInfo,
        signaling_url: &str,
    ) -> Result<()>;

    /// Tear the transport down entirely
    async fn stop(&self);

    /// Enable or disable outbound video
    async fn set_sending(&self, sending: bool);

    /// Enable or disable inbound video
    async fn set_receiving(&self, receiving: bool);

    /// Hand the transport the slot it reads outbound frames from
    async fn set_external_video_source(&self, binding: Arc<VideoSourceBinding>);

    /// Tell the transport whether the content stream may run at UHD
    async fn set_content_max_resolution_uhd(&self, uhd: bool);

    /// Cap the outbound bitrate
    async fn set_max_bit_rate_kbps(&self, kbps: u32);

    /// Push freshly negotiated TURN credentials into the transport
    async fn update_turn_credentials(&self, response: TurnSessionResponse, feature: TurnFeature);
}

/// Callbacks the transport delivers, on its own tasks
#[async_trait]
pub trait VideoTransportObserver: Send + Sync {
    /// The transport began connecting
    async fn on_connecting(&self);

    /// The transport is connected; the share stream is live
    async fn on_connected(&self, control_status: i32);

    /// The transport failed; the share stream is gone
    async fn on_failed(&self, status_code: u32, control_status: i32);

    /// The transport stopped normally
    async fn on_stopped(&self);

    /// A raw metrics mapping arrived; `None` carries no information
    async fn on_metrics_received(&self, metrics: Option<MetricsSnapshot>);

    /// The transport needs TURN credentials to proceed
    async fn on_request_turn_credentials(&self);

    /// A log line from the transport's native logging
    async fn on_log_message(&self, level: TransportLogLevel, message: &str);
}
