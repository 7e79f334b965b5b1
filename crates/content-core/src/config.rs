//! Configuration for the content-share session controller
//!
//! This module contains the static configuration resolved once at controller
//! construction: the session identity (meeting id, join token), the URLs the
//! controller and its TURN negotiator talk to, and the resolution policy that
//! gates the session. It also carries the fixed transport configuration a
//! content-share stream always uses.
//!
//! # Usage Examples
//!
//! ```rust
//! use vidshare_content_core::config::{ShareSessionConfiguration, ContentResolution};
//!
//! let config = ShareSessionConfiguration::new(
//!     "meeting-1234".to_string(),
//!     "join-token#content".to_string(),
//! )
//! .with_signaling_url("wss://signal.example.com".to_string())
//! .with_turn_control_url("https://turn.example.com/creds".to_string())
//! .with_audio_host_url("wss://audio.example.com".to_string())
//! .with_content_max_resolution(ContentResolution::Uhd);
//!
//! assert_eq!(config.join_token_base(), "join-token");
//! ```

use std::fmt;
use std::sync::Arc;

/// Fixed bitrate cap applied whenever the session's content resolution is UHD, in kbps.
///
/// This always wins over a caller-supplied bitrate: a UHD share cannot exceed it.
pub const UHD_CONTENT_BITRATE_KBPS: u32 = 2500;

/// Negotiated maximum resolution for the content-share stream
///
/// `Disabled` is a hard policy gate: starting a share is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentResolution {
    /// Content sharing is not permitted for this session
    Disabled,
    /// Standard content resolution (up to FHD)
    #[default]
    Standard,
    /// Ultra-high-definition content, subject to [`UHD_CONTENT_BITRATE_KBPS`]
    Uhd,
}

/// Hook for rewriting server-issued URLs (e.g. to route through a proxy)
///
/// Applied to every TURN URI and to the signaling URL embedded in a credential
/// response. The default rewriter is the identity function.
pub type UrlRewriter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Static per-session configuration for a content-share controller
///
/// Immutable for the controller's lifetime. Built once, before the controller
/// is constructed.
#[derive(Clone)]
pub struct ShareSessionConfiguration {
    /// Identifier of the meeting this share belongs to
    pub meeting_id: String,
    /// Join token used to authenticate against the media service.
    /// May carry a modality suffix (e.g. `#content`); see [`Self::join_token_base`].
    pub join_token: String,
    /// Signaling endpoint the transport connects to
    pub signaling_url: String,
    /// HTTPS endpoint serving TURN credentials for this session
    pub turn_control_url: String,
    /// Audio host endpoint, handed through to the transport configuration
    pub audio_host_url: String,
    /// Negotiated maximum content resolution
    pub content_max_resolution: ContentResolution,
    /// URL rewriting hook applied to credential responses
    pub url_rewriter: UrlRewriter,
}

impl ShareSessionConfiguration {
    /// Create a configuration with the given session identity and defaults elsewhere
    pub fn new(meeting_id: String, join_token: String) -> Self {
        Self {
            meeting_id,
            join_token,
            signaling_url: String::new(),
            turn_control_url: String::new(),
            audio_host_url: String::new(),
            content_max_resolution: ContentResolution::default(),
            url_rewriter: Arc::new(|url: &str| url.to_string()),
        }
    }

    /// Set the signaling URL
    pub fn with_signaling_url(mut self, signaling_url: String) -> Self {
        self.signaling_url = signaling_url;
        self
    }

    /// Set the TURN control URL
    pub fn with_turn_control_url(mut self, turn_control_url: String) -> Self {
        self.turn_control_url = turn_control_url;
        self
    }

    /// Set the audio host URL
    pub fn with_audio_host_url(mut self, audio_host_url: String) -> Self {
        self.audio_host_url = audio_host_url;
        self
    }

    /// Set the negotiated maximum content resolution
    pub fn with_content_max_resolution(mut self, resolution: ContentResolution) -> Self {
        self.content_max_resolution = resolution;
        self
    }

    /// Set the URL rewriting hook
    pub fn with_url_rewriter(mut self, rewriter: UrlRewriter) -> Self {
        self.url_rewriter = rewriter;
        self
    }

    /// The join token with any modality suffix stripped
    ///
    /// Content-share sessions join with a modality-tagged token
    /// (`<base>#content`); the TURN control service authenticates against the
    /// base token only.
    pub fn join_token_base(&self) -> &str {
        match self.join_token.split_once('#') {
            Some((base, _modality)) => base,
            None => &self.join_token,
        }
    }
}

impl fmt::Debug for ShareSessionConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareSessionConfiguration")
            .field("meeting_id", &self.meeting_id)
            .field("join_token", &"<redacted>")
            .field("signaling_url", &self.signaling_url)
            .field("turn_control_url", &self.turn_control_url)
            .field("audio_host_url", &self.audio_host_url)
            .field("content_max_resolution", &self.content_max_resolution)
            .field("url_rewriter", &"<rewriter>")
            .finish()
    }
}

/// Fixed transport configuration for a content-share stream
///
/// Resolved once at controller construction and never mutated afterwards.
/// Content share always runs 16:9, send-side bandwidth estimation, no
/// simulcast, pixel-buffer rendering, and in-band TURN credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTransportConfig {
    /// Use a 16:9 aspect ratio for the outbound stream
    pub uses_16x9_aspect_ratio: bool,
    /// Use send-side bandwidth estimation
    pub uses_send_side_bwe: bool,
    /// Simulcast is disabled for content share
    pub disables_simulcast: bool,
    /// Render through pixel buffers rather than textures
    pub uses_pixel_buffer_renderer: bool,
    /// Marks this stream as a content share rather than camera video
    pub is_content_share: bool,
    /// Request TURN credentials in-band over the signaling channel
    pub uses_inband_turn_credentials: bool,
    /// Audio host endpoint for the session
    pub audio_host_url: String,
}

impl VideoTransportConfig {
    /// The fixed configuration shape every content-share stream uses
    pub fn content_share(audio_host_url: String) -> Self {
        Self {
            uses_16x9_aspect_ratio: true,
            uses_send_side_bwe: true,
            disables_simulcast: true,
            uses_pixel_buffer_renderer: true,
            is_content_share: true,
            uses_inband_turn_credentials: true,
            audio_host_url,
        }
    }
}

/// Per-start options supplied by the caller
///
/// `max_bit_rate_kbps == 0` means no explicit cap. Note that a UHD session
/// overrides any caller-supplied value with [`UHD_CONTENT_BITRATE_KBPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShareConfig {
    /// Requested maximum bitrate in kbps; 0 leaves the transport default in place
    pub max_bit_rate_kbps: u32,
}

impl ShareConfig {
    /// Create share options with an explicit bitrate cap
    pub fn with_max_bit_rate_kbps(max_bit_rate_kbps: u32) -> Self {
        Self { max_bit_rate_kbps }
    }
}

/// Application identity handed to the transport at start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Application name
    pub name: String,
    /// Application version
    pub version: String,
    /// Host platform description
    pub platform: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }
}
