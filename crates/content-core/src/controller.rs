//! Content-share session controller
//!
//! This is the single authority for whether the process is currently sharing
//! content video. Callers drive it with [`start_video_share`] and
//! [`stop_video_share`] from whatever task they like; the transport calls
//! back on its own tasks with connection lifecycle, metrics and credential
//! requests. The controller serializes caller-driven transport work behind
//! one session lock, keeps the session state behind one `RwLock` that every
//! mutation site goes through, and fans lifecycle transitions out to the
//! observer registry.
//!
//! [`start_video_share`]: ContentShareController::start_video_share
//! [`stop_video_share`]: ContentShareController::stop_video_share
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidshare_content_core::{
//!     config::ShareSessionConfiguration,
//!     controller::ContentShareController,
//!     metrics::MetricsCollector,
//!     transport::{VideoSource, VideoTransport},
//! };
//!
//! # async fn example(
//! #     transport: Arc<dyn VideoTransport>,
//! #     collector: Arc<dyn MetricsCollector>,
//! #     source: Arc<dyn VideoSource>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let configuration = ShareSessionConfiguration::new(
//!     "meeting-1234".to_string(),
//!     "join-token#content".to_string(),
//! );
//! let controller = ContentShareController::new(transport, configuration, collector).await;
//! controller.start_video_share(source).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::config::{
    AppInfo, ContentResolution, ShareConfig, ShareSessionConfiguration, VideoTransportConfig,
    UHD_CONTENT_BITRATE_KBPS,
};
use crate::error::Result;
use crate::metrics::{MetricsBridge, MetricsCollector, MetricsSnapshot};
use crate::observer::{ContentShareObserver, ContentShareStatus, ObserverRegistry};
use crate::transport::{
    TransportLogLevel, TurnFeature, VideoSource, VideoSourceBinding, VideoTransport,
    VideoTransportObserver,
};
use crate::turn::{HttpTurnFetcher, TurnCredentialFetcher, TurnCredentialNegotiator};

/// Whether the session is currently sharing content video
///
/// `Sharing` is entered only once the transport confirms its connection, not
/// when `start_video_share` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sharing,
}

/// Controller for one outbound content-share stream
pub struct ContentShareController {
    configuration: ShareSessionConfiguration,
    transport: Arc<dyn VideoTransport>,
    transport_config: VideoTransportConfig,
    app_info: AppInfo,
    observers: ObserverRegistry,
    metrics: MetricsBridge,
    negotiator: TurnCredentialNegotiator,
    source_binding: Arc<VideoSourceBinding>,
    /// Serializes caller-driven start/stop/reconfigure sequences
    session_lock: Mutex<()>,
    /// Every mutation of the session state goes through this lock, including
    /// the transport callback paths
    state: RwLock<SessionState>,
}

impl ContentShareController {
    /// Create a controller over the given transport, with HTTPS TURN negotiation
    pub async fn new(
        transport: Arc<dyn VideoTransport>,
        configuration: ShareSessionConfiguration,
        metrics_collector: Arc<dyn MetricsCollector>,
    ) -> Arc<Self> {
        Self::with_turn_fetcher(
            transport,
            configuration,
            metrics_collector,
            Arc::new(HttpTurnFetcher::new()),
        )
        .await
    }

    /// Create a controller with a custom TURN credential fetcher
    pub async fn with_turn_fetcher(
        transport: Arc<dyn VideoTransport>,
        configuration: ShareSessionConfiguration,
        metrics_collector: Arc<dyn MetricsCollector>,
        turn_fetcher: Arc<dyn TurnCredentialFetcher>,
    ) -> Arc<Self> {
        let transport_config =
            VideoTransportConfig::content_share(configuration.audio_host_url.clone());

        // Content share is send-only
        transport.set_receiving(false).await;

        Arc::new(Self {
            configuration,
            transport,
            transport_config,
            app_info: AppInfo::default(),
            observers: ObserverRegistry::new(),
            metrics: MetricsBridge::new(metrics_collector),
            negotiator: TurnCredentialNegotiator::new(turn_fetcher),
            source_binding: Arc::new(VideoSourceBinding::new()),
            session_lock: Mutex::new(()),
            state: RwLock::new(SessionState::Idle),
        })
    }

    /// Start sharing from `source` with default options
    pub async fn start_video_share(&self, source: Arc<dyn VideoSource>) -> Result<()> {
        tracing::info!("Starting video share");
        self.start_video_share_with_config(source, ShareConfig::default())
            .await
    }

    /// Start sharing from `source`
    ///
    /// If the session's content resolution is disabled this is a silent
    /// no-op. If a share is already running the transport is not restarted;
    /// the source is rebound and the bitrate policy re-applied. Returns once
    /// the transport has been told to send; the share is live only when
    /// observers receive their started notification.
    pub async fn start_video_share_with_config(
        &self,
        source: Arc<dyn VideoSource>,
        config: ShareConfig,
    ) -> Result<()> {
        if self.configuration.content_max_resolution == ContentResolution::Disabled {
            tracing::info!(
                "Could not start content share because content max resolution is set to disabled"
            );
            return Ok(());
        }

        let _guard = self.session_lock.lock().await;

        if *self.state.read().await != SessionState::Sharing {
            self.start_transport().await?;
        }
        self.source_binding.bind(source).await;

        let is_uhd = self.configuration.content_max_resolution == ContentResolution::Uhd;
        self.transport.set_content_max_resolution_uhd(is_uhd).await;
        self.transport
            .set_external_video_source(self.source_binding.clone())
            .await;
        self.transport.set_sending(true).await;

        // Policy order matters: an explicit caller cap first, then the UHD
        // cap unconditionally on top. UHD always wins.
        if config.max_bit_rate_kbps > 0 {
            tracing::info!(
                "Setting content share max bitrate to {} kbps",
                config.max_bit_rate_kbps
            );
            self.transport
                .set_max_bit_rate_kbps(config.max_bit_rate_kbps)
                .await;
        }
        if is_uhd {
            tracing::info!(
                "Setting content share UHD bitrate cap ({} kbps)",
                UHD_CONTENT_BITRATE_KBPS
            );
            self.transport
                .set_max_bit_rate_kbps(UHD_CONTENT_BITRATE_KBPS)
                .await;
        }

        Ok(())
    }

    /// Stop the share; a no-op when nothing is being shared
    ///
    /// Observers are not notified from here. The stopped notification arrives
    /// through the transport's own stop callback.
    pub async fn stop_video_share(&self) -> Result<()> {
        let _guard = self.session_lock.lock().await;

        if *self.state.read().await != SessionState::Sharing {
            return Ok(());
        }
        self.transport.set_sending(false).await;
        self.transport.stop().await;
        Ok(())
    }

    /// Register an observer for share lifecycle transitions
    pub fn subscribe_to_state_change(&self, observer: Arc<dyn ContentShareObserver>) {
        self.observers.add(observer);
    }

    /// Remove a previously registered observer
    pub fn unsubscribe_from_state_change(&self, observer: &Arc<dyn ContentShareObserver>) {
        self.observers.remove(observer);
    }

    /// Consistent snapshot of the current session state
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    async fn start_transport(&self) -> Result<()> {
        tracing::info!(
            "Starting content share transport for meeting {}",
            self.configuration.meeting_id
        );
        self.transport
            .start(
                &self.configuration.meeting_id,
                &self.configuration.join_token,
                false,
                &self.transport_config,
                &self.app_info,
                &self.configuration.signaling_url,
            )
            .await
    }

    async fn set_state(&self, state: SessionState) {
        *self.state.write().await = state;
    }
}

#[async_trait]
impl VideoTransportObserver for ContentShareController {
    async fn on_connecting(&self) {
        tracing::info!("Content share transport connecting");
    }

    async fn on_connected(&self, control_status: i32) {
        tracing::info!(
            "Content share transport connected (control status {})",
            control_status
        );
        self.observers.notify_started().await;
        self.set_state(SessionState::Sharing).await;
    }

    async fn on_failed(&self, status_code: u32, control_status: i32) {
        tracing::warn!(
            "Content share transport failed (status {}, control status {})",
            status_code,
            control_status
        );
        self.metrics.reset().await;
        self.observers
            .notify_stopped(ContentShareStatus::VideoServiceFailed)
            .await;
        self.set_state(SessionState::Idle).await;
    }

    async fn on_stopped(&self) {
        tracing::info!("Content share transport stopped");
        self.metrics.reset().await;
        self.observers.notify_stopped(ContentShareStatus::Ok).await;
        self.set_state(SessionState::Idle).await;
    }

    async fn on_metrics_received(&self, metrics: Option<MetricsSnapshot>) {
        let Some(metrics) = metrics else { return };
        self.metrics.forward(metrics).await;
    }

    async fn on_request_turn_credentials(&self) {
        match self.negotiator.negotiate(&self.configuration).await {
            Ok(response) => {
                self.transport
                    .update_turn_credentials(response, TurnFeature::Enabled)
                    .await;
            }
            Err(e) => {
                tracing::error!("Failed to update TURN credentials: {}", e);
            }
        }
    }

    async fn on_log_message(&self, level: TransportLogLevel, message: &str) {
        match level {
            TransportLogLevel::Error | TransportLogLevel::Fatal => {
                tracing::error!("transport: {}", message);
            }
            _ => {
                tracing::debug!("transport: {}", message);
            }
        }
    }
}
