//! # Content-Core - Content-Share Session Control
//!
//! This crate is the control plane for an outbound content-sharing video
//! stream (screen share, window share) layered over a network video
//! transport. It orchestrates:
//! - **session lifecycle**: start/stop of the share stream, with the
//!   transport confirming connection asynchronously
//! - **TURN credential negotiation**: on-demand relay credentials fetched
//!   over HTTPS when the transport asks for them
//! - **observer fan-out**: thread-safe delivery of started/stopped events
//! - **metrics forwarding**: raw transport metrics handed to a collector,
//!   reset on session end
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidshare_content_core::{
//!     ContentShareController, ShareSessionConfiguration, ContentResolution,
//! };
//! use vidshare_content_core::metrics::MetricsCollector;
//! use vidshare_content_core::transport::{VideoSource, VideoTransport};
//!
//! # async fn example(
//! #     transport: Arc<dyn VideoTransport>,
//! #     collector: Arc<dyn MetricsCollector>,
//! #     screen: Arc<dyn VideoSource>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let configuration = ShareSessionConfiguration::new(
//!     "meeting-1234".to_string(),
//!     "join-token#content".to_string(),
//! )
//! .with_signaling_url("wss://signal.example.com".to_string())
//! .with_turn_control_url("https://turn.example.com/creds".to_string())
//! .with_content_max_resolution(ContentResolution::Standard);
//!
//! let controller = ContentShareController::new(transport, configuration, collector).await;
//! controller.start_video_share(screen).await?;
//! // ... observers registered via subscribe_to_state_change learn when the
//! // share actually goes live ...
//! controller.stop_video_share().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The controller is the single authority for whether this process is
//! sharing. Callers drive it from any task; the transport calls back on its
//! own tasks through [`transport::VideoTransportObserver`]. Caller-driven
//! transport work is serialized behind one session lock, and the session
//! state lives behind one lock that every mutation site uses — including the
//! callback paths.

pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod transport;
pub mod turn;

// Re-export main types
pub use config::{
    AppInfo, ContentResolution, ShareConfig, ShareSessionConfiguration, UrlRewriter,
    VideoTransportConfig, UHD_CONTENT_BITRATE_KBPS,
};
pub use controller::{ContentShareController, SessionState};
pub use error::{ContentShareError, Result};
pub use metrics::{MetricsBridge, MetricsCollector, MetricsSnapshot};
pub use observer::{ContentShareObserver, ContentShareStatus, ObserverRegistry};
pub use transport::{
    TransportLogLevel, TurnFeature, VideoSource, VideoSourceBinding, VideoTransport,
    VideoTransportObserver,
};
pub use turn::{
    HttpTurnFetcher, TurnCredentialFetcher, TurnCredentialNegotiator, TurnCredentialRequest,
    TurnCredentials, TurnSessionResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
