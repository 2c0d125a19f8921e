//! Host-facing auction types.
//!
//! These are the structures the orchestrator hands to (and receives from)
//! the adapter each auction round. Slots and context are read-only to the
//! adapter and discarded by the host after the round.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Pixel size as `[width, height]`.
pub type AdSize = [u32; 2];

/// A media type requested for a slot, resolved once by the host so
/// downstream logic switches on the variant instead of re-probing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRequest {
    Banner,
    Video {
        /// Playback context requested by the publisher. Eligibility
        /// requires this to be set.
        context: Option<PlaybackContext>,
        /// Player sizes; eligibility requires at least one.
        player_sizes: Vec<AdSize>,
    },
    Unknown,
}

impl MediaRequest {
    /// Supply type under which this media request is represented to the
    /// exchange.
    #[must_use]
    pub fn supply_type(&self) -> SupplyType {
        match self {
            MediaRequest::Video { .. } => SupplyType::Video,
            MediaRequest::Banner | MediaRequest::Unknown => SupplyType::Display,
        }
    }
}

/// Video playback context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackContext {
    Instream,
    Outstream,
}

/// Creative format category under which a slot is represented to the
/// exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyType {
    Display,
    Video,
}

/// Exchange parameters configured by the publisher per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedtagParams {
    pub publisher_id: String,
    pub ad_unit_id: String,
    /// Placement kind; must be one of
    /// [`crate::constants::ALLOWED_PLACEMENTS`].
    pub placement: String,
    /// Ad position on the page, forwarded only when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_position: Option<u32>,
    /// Publisher-supplied video parameters (e.g. allowed mime types),
    /// merged verbatim into the wire `videoParams` object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Json>,
}

/// One ad placement opportunity, constructed by the host per round.
#[derive(Debug, Clone)]
pub struct SlotConfig {
    /// Stable bid identifier, echoed back by the exchange.
    pub bid_id: String,
    pub transaction_id: String,
    /// Host-side ad-unit code for this placement.
    pub ad_unit_code: String,
    /// Requested media types, in the publisher's declaration order.
    pub media: Vec<MediaRequest>,
    /// Requested pixel sizes.
    pub sizes: Vec<AdSize>,
    pub params: SeedtagParams,
    /// How many times this slot has been requested this session.
    pub request_count: u32,
    /// Supply-chain declaration, forwarded verbatim when present.
    pub schain: Option<Json>,
}

impl SlotConfig {
    /// The video media request, wherever it appears in declaration order.
    #[must_use]
    pub fn video_media(&self) -> Option<(Option<PlaybackContext>, &[AdSize])> {
        self.media.iter().find_map(|media| match media {
            MediaRequest::Video {
                context,
                player_sizes,
            } => Some((*context, player_sizes.as_slice())),
            _ => None,
        })
    }
}

/// Network connection classification from the host's probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Fixed,
    Mobile,
    #[default]
    Unknown,
}

/// GDPR signals collected by the host's consent-management platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdprConsent {
    /// Whether GDPR applies to this user, when the CMP knows.
    pub applies: Option<bool>,
    /// TCF consent string.
    pub consent_string: Option<String>,
}

/// Auction-round context shared across all slots in one request.
#[derive(Debug, Clone, Default)]
pub struct AuctionContext {
    /// Page or referrer URL the auction runs on.
    pub page_url: String,
    /// Auction timeout budget in milliseconds.
    pub timeout_ms: u64,
    /// GDPR consent data, when a CMP is present.
    pub gdpr: Option<GdprConsent>,
    /// CCPA/USP consent string, when collected.
    pub usp_consent: Option<String>,
    /// Time to first byte of the hosting page, in milliseconds.
    pub ttfb_ms: u64,
    /// Clock reading taken by the host when the round started, in
    /// milliseconds since the Unix epoch. The builder stamps the current
    /// time when absent.
    pub auction_start_ms: Option<i64>,
    pub connection_type: ConnectionType,
}

/// The single request unit sent to the exchange. Immutable once built;
/// the host executes the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: http::Method,
    pub url: String,
    /// Serialized JSON payload.
    pub data: String,
}

/// Raw response body handed back by the host's transport.
#[derive(Debug, Clone, Default)]
pub struct ServerResponse {
    pub body: Vec<u8>,
}

impl ServerResponse {
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

/// Normalized bid handed back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBid {
    /// Correlates with the `bid_id` of the originating slot.
    pub request_id: String,
    pub price: f64,
    pub currency: String,
    pub width: u32,
    pub height: u32,
    /// Cache lifetime in seconds.
    pub ttl: u32,
    /// The exchange quotes net prices, so this is always true.
    pub net_revenue: bool,
    pub markup: BidMarkup,
    /// Advertiser domains; empty when the exchange omits them.
    pub advertiser_domains: Vec<String>,
}

/// Creative payload carried by a normalized bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidMarkup {
    /// Display markup with an optional win-notification URL.
    Display { ad: String, nurl: Option<String> },
    /// VAST document for video bids; win tracking rides inside the VAST.
    Vast { xml: String },
}

impl NormalizedBid {
    /// Win-notification URL, when the bid carries one.
    #[must_use]
    pub fn win_url(&self) -> Option<&str> {
        match &self.markup {
            BidMarkup::Display { nurl, .. } => nurl.as_deref(),
            BidMarkup::Vast { .. } => None,
        }
    }
}

/// User-sync mechanisms the host permits for this adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub iframe_enabled: bool,
    pub pixel_enabled: bool,
}

/// Sync mechanism kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncKind {
    Iframe,
    Image,
}

/// One user-sync the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDirective {
    pub kind: SyncKind,
    pub url: String,
}

/// Timeout record the host reports when an auction round expires.
#[derive(Debug, Clone)]
pub struct TimeoutEvent {
    /// Parameter sets of the slots that timed out.
    pub params: Vec<SeedtagParams>,
    /// Timeout budget that elapsed, in milliseconds.
    pub timeout_ms: u64,
}
