//! Shared test doubles for the controller integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vidshare_content_core::config::{
    AppInfo, ContentResolution, ShareSessionConfiguration, VideoTransportConfig,
};
use vidshare_content_core::error::{ContentShareError, Result};
use vidshare_content_core::metrics::{MetricsCollector, MetricsSnapshot};
use vidshare_content_core::observer::{ContentShareObserver, ContentShareStatus};
use vidshare_content_core::transport::{
    TurnFeature, VideoSource, VideoSourceBinding, VideoTransport,
};
use vidshare_content_core::turn::{
    TurnCredentialFetcher, TurnCredentialRequest, TurnCredentials, TurnSessionResponse,
};

/// One recorded call into the mock transport
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Start {
        meeting_id: String,
        token: String,
        sending: bool,
        signaling_url: String,
    },
    Stop,
    SetSending(bool),
    SetReceiving(bool),
    SetExternalVideoSource,
    SetContentMaxResolutionUhd(bool),
    SetMaxBitRateKbps(u32),
    UpdateTurnCredentials(TurnSessionResponse),
}

/// Transport double that records every call in order
pub struct MockTransport {
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn start_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, TransportCall::Start { .. }))
            .count()
    }

    pub fn bitrate_calls(&self) -> Vec<u32> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                TransportCall::SetMaxBitRateKbps(kbps) => Some(*kbps),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl VideoTransport for MockTransport {
    async fn start(
        &self,
        meeting_id: &str,
        token: &str,
        sending: bool,
        _config: &VideoTransportConfig,
        _app_info: &AppInfo,
        signaling_url: &str,
    ) -> Result<()> {
        self.record(TransportCall::Start {
            meeting_id: meeting_id.to_string(),
            token: token.to_string(),
            sending,
            signaling_url: signaling_url.to_string(),
        });
        Ok(())
    }

    async fn stop(&self) {
        self.record(TransportCall::Stop);
    }

    async fn set_sending(&self, sending: bool) {
        self.record(TransportCall::SetSending(sending));
    }

    async fn set_receiving(&self, receiving: bool) {
        self.record(TransportCall::SetReceiving(receiving));
    }

    async fn set_external_video_source(&self, _binding: Arc<VideoSourceBinding>) {
        self.record(TransportCall::SetExternalVideoSource);
    }

    async fn set_content_max_resolution_uhd(&self, uhd: bool) {
        self.record(TransportCall::SetContentMaxResolutionUhd(uhd));
    }

    async fn set_max_bit_rate_kbps(&self, kbps: u32) {
        self.record(TransportCall::SetMaxBitRateKbps(kbps));
    }

    async fn update_turn_credentials(&self, response: TurnSessionResponse, _feature: TurnFeature) {
        self.record(TransportCall::UpdateTurnCredentials(response));
    }
}

/// Observer double counting deliveries
pub struct RecordingObserver {
    pub started: AtomicUsize,
    pub stopped: Mutex<Vec<ContentShareStatus>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: AtomicUsize::new(0),
            stopped: Mutex::new(Vec::new()),
        })
    }

    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped_statuses(&self) -> Vec<ContentShareStatus> {
        self.stopped.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentShareObserver for RecordingObserver {
    async fn on_content_share_started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    async fn on_content_share_stopped(&self, status: ContentShareStatus) {
        self.stopped.lock().unwrap().push(status);
    }
}

/// Collector double recording every snapshot it receives
pub struct RecordingCollector {
    pub received: Mutex<Vec<MetricsSnapshot>>,
}

impl RecordingCollector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<MetricsSnapshot> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsCollector for RecordingCollector {
    async fn process_content_share_metrics(&self, metrics: MetricsSnapshot) {
        self.received.lock().unwrap().push(metrics);
    }
}

/// Screen-capture stand-in
pub struct FakeSource;

impl VideoSource for FakeSource {}

pub fn fake_source() -> Arc<dyn VideoSource> {
    Arc::new(FakeSource)
}

/// TURN fetcher double returning fixed credentials
pub struct CannedTurnFetcher {
    pub credentials: TurnCredentials,
    pub requests: Mutex<Vec<TurnCredentialRequest>>,
}

impl CannedTurnFetcher {
    pub fn new(credentials: TurnCredentials) -> Arc<Self> {
        Arc::new(Self {
            credentials,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TurnCredentialFetcher for CannedTurnFetcher {
    async fn fetch(&self, request: &TurnCredentialRequest) -> Result<TurnCredentials> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.credentials.clone())
    }
}

/// TURN fetcher double that always fails
pub struct FailingTurnFetcher;

#[async_trait]
impl TurnCredentialFetcher for FailingTurnFetcher {
    async fn fetch(&self, _request: &TurnCredentialRequest) -> Result<TurnCredentials> {
        Err(ContentShareError::credential(
            "credential service unavailable",
        ))
    }
}

/// Session configuration used across the integration tests
pub fn configuration(resolution: ContentResolution) -> ShareSessionConfiguration {
    ShareSessionConfiguration::new("meeting-1234".to_string(), "join-token#content".to_string())
        .with_signaling_url("wss://signal.example.com/v2".to_string())
        .with_turn_control_url("https://turn.example.com/creds".to_string())
        .with_audio_host_url("wss://audio.example.com".to_string())
        .with_content_max_resolution(resolution)
}
