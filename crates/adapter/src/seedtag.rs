//! Seedtag exchange integration.
//!
//! Wire formats for the `/c/hb/bid` endpoint and the concrete
//! [`BidAdapter`] implementation: slot eligibility, batch request
//! construction, response interpretation, user-sync directives, and
//! timeout/win tracking.

use std::sync::Arc;

use error_stack::{ensure, Report, ResultExt};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};
use url::Url;

use crate::adapter::BidAdapter;
use crate::beacon::{Beacon, HttpBeacon};
use crate::clock::{Clock, SystemClock};
use crate::constants::{ADAPTER_VERSION, ALLOWED_PLACEMENTS, BIDDER_CODE, GVL_ID};
use crate::error::AdapterError;
use crate::settings::SeedtagConfig;
use crate::types::{
    AdSize, AuctionContext, BidMarkup, ConnectionType, MediaRequest, NormalizedBid,
    OutboundRequest, ServerResponse, SlotConfig, SupplyType, SyncDirective, SyncKind, SyncOptions,
    TimeoutEvent,
};

const MEDIA_TYPE_DISPLAY: &str = "display";
const MEDIA_TYPE_VIDEO: &str = "video";

// ============================================================================
// Seedtag wire types
// ============================================================================

/// Top-level bid payload for the `/c/hb/bid` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BidPayload {
    /// Page URL the auction runs on.
    url: String,

    /// Publisher token, shared by every slot in the batch.
    publisher_token: String,

    /// Adapter version.
    version: String,

    connection_type: ConnectionType,

    /// Auction start, ms since the Unix epoch.
    auction_start: i64,

    /// Page time-to-first-byte, ms.
    ttfb: u64,

    /// Auction timeout budget, ms.
    timeout: u64,

    /// Whether any consent-management data was supplied.
    cmp: bool,

    /// GDPR-applies flag, only when applicability is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    ga: Option<bool>,

    /// TCF consent string.
    #[serde(skip_serializing_if = "Option::is_none")]
    cd: Option<String>,

    /// CCPA/USP consent string.
    #[serde(skip_serializing_if = "Option::is_none")]
    usp_consent: Option<String>,

    /// Supply-chain object, forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    schain: Option<Json>,

    /// Per-slot entries, preserving the validated-slot order.
    bid_requests: Vec<PayloadBid>,
}

/// One bid-request entry in the outbound payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadBid {
    id: String,

    transaction_id: String,

    /// Host-side ad-unit code.
    ad_unit_code: String,

    /// Creative format categories this slot is offered under.
    supply_types: Vec<SupplyType>,

    /// Exchange ad-unit id.
    ad_unit_id: String,

    /// Requested pixel sizes.
    sizes: Vec<AdSize>,

    request_count: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    ad_position: Option<u32>,

    /// Publisher video parameters plus `w`/`h` from the first player
    /// size. Video supply only.
    #[serde(skip_serializing_if = "Option::is_none")]
    video_params: Option<Json>,
}

/// Seedtag bid response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeResponse {
    #[serde(default)]
    bids: Vec<RawBidEntry>,

    #[serde(default)]
    cookie_sync: Option<CookieSync>,
}

/// One bid record as returned by the exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBidEntry {
    bid_id: String,
    price: f64,
    currency: String,

    /// Creative markup; HTML for display, VAST for video.
    content: String,

    width: u32,
    height: u32,

    /// "display" or "video".
    media_type: String,

    ttl: u32,

    /// Win-notification URL.
    #[serde(default)]
    nurl: Option<String>,

    /// Advertiser domains.
    #[serde(default)]
    adomain: Option<Vec<String>>,
}

/// Cookie-sync directive in the response.
#[derive(Debug, Clone, Default, Deserialize)]
struct CookieSync {
    #[serde(default)]
    url: String,
}

// ============================================================================
// Seedtag adapter
// ============================================================================

/// Seedtag exchange adapter.
///
/// Stateless between rounds; hosts may share one instance across threads
/// or build several with different endpoint configurations.
pub struct SeedtagAdapter {
    config: SeedtagConfig,
    clock: Arc<dyn Clock>,
    beacon: Arc<dyn Beacon>,
}

impl SeedtagAdapter {
    /// Create an adapter with the production clock and beacon.
    #[must_use]
    pub fn new(config: SeedtagConfig) -> Self {
        Self::with_dependencies(config, Arc::new(SystemClock), Arc::new(HttpBeacon::new()))
    }

    /// Create an adapter with caller-supplied collaborators.
    #[must_use]
    pub fn with_dependencies(
        config: SeedtagConfig,
        clock: Arc<dyn Clock>,
        beacon: Arc<dyn Beacon>,
    ) -> Self {
        Self {
            config,
            clock,
            beacon,
        }
    }
}

/// Mandatory exchange parameters: publisher id, ad-unit id, and a known
/// placement kind.
fn has_mandatory_params(slot: &SlotConfig) -> bool {
    let params = &slot.params;
    !params.publisher_id.is_empty()
        && !params.ad_unit_id.is_empty()
        && ALLOWED_PLACEMENTS.contains(&params.placement.as_str())
}

/// A declared video media type must supply a playback context and at
/// least one player size, wherever it appears in the declaration order.
/// Slots without video media pass trivially.
fn video_media_is_complete(slot: &SlotConfig) -> bool {
    match slot.video_media() {
        Some((context, player_sizes)) => context.is_some() && !player_sizes.is_empty(),
        None => true,
    }
}

/// Supply types for a slot: video media maps to "video", everything else
/// to "display", deduplicated.
fn supply_types(media: &[MediaRequest]) -> Vec<SupplyType> {
    let mut types = Vec::new();
    for request in media {
        let supply = request.supply_type();
        if !types.contains(&supply) {
            types.push(supply);
        }
    }
    types
}

/// Video parameters for the wire entry: the publisher's video object
/// merged with `w`/`h` from the first player size.
fn video_params(slot: &SlotConfig) -> Option<Json> {
    let (_, player_sizes) = slot.video_media()?;

    let mut params = match &slot.params.video {
        Some(Json::Object(map)) => map.clone(),
        _ => serde_json::Map::new(),
    };
    if let Some([w, h]) = player_sizes.first() {
        params.insert("w".to_string(), json!(w));
        params.insert("h".to_string(), json!(h));
    }
    Some(Json::Object(params))
}

fn to_payload_bid(slot: &SlotConfig) -> PayloadBid {
    PayloadBid {
        id: slot.bid_id.clone(),
        transaction_id: slot.transaction_id.clone(),
        ad_unit_code: slot.ad_unit_code.clone(),
        supply_types: supply_types(&slot.media),
        ad_unit_id: slot.params.ad_unit_id.clone(),
        sizes: slot.sizes.clone(),
        request_count: slot.request_count,
        ad_position: slot.params.ad_position,
        video_params: video_params(slot),
    }
}

fn normalize_bid(entry: RawBidEntry) -> NormalizedBid {
    let RawBidEntry {
        bid_id,
        price,
        currency,
        content,
        width,
        height,
        media_type,
        ttl,
        nurl,
        adomain,
    } = entry;

    let markup = match media_type.as_str() {
        MEDIA_TYPE_VIDEO => BidMarkup::Vast { xml: content },
        MEDIA_TYPE_DISPLAY => BidMarkup::Display { ad: content, nurl },
        other => {
            log::warn!("seedtag: unrecognized media type '{other}', treating bid as display");
            BidMarkup::Display { ad: content, nurl }
        }
    };

    NormalizedBid {
        request_id: bid_id,
        price,
        currency,
        width,
        height,
        ttl,
        // Seedtag quotes net prices.
        net_revenue: true,
        markup,
        advertiser_domains: adomain.unwrap_or_default(),
    }
}

impl BidAdapter for SeedtagAdapter {
    fn bidder_code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn gvl_id(&self) -> u16 {
        GVL_ID
    }

    fn is_eligible(&self, slot: &SlotConfig) -> bool {
        has_mandatory_params(slot) && video_media_is_complete(slot)
    }

    fn build_request(
        &self,
        slots: &[SlotConfig],
        context: &AuctionContext,
    ) -> Result<OutboundRequest, Report<AdapterError>> {
        ensure!(!slots.is_empty(), AdapterError::EmptyBatch);

        log::info!(
            "seedtag: building bid request for {} slots (publisher: {})",
            slots.len(),
            slots[0].params.publisher_id
        );

        let gdpr = context.gdpr.as_ref();
        let payload = BidPayload {
            url: context.page_url.clone(),
            publisher_token: slots[0].params.publisher_id.clone(),
            version: ADAPTER_VERSION.to_string(),
            connection_type: context.connection_type,
            auction_start: context
                .auction_start_ms
                .unwrap_or_else(|| self.clock.now_ms()),
            ttfb: context.ttfb_ms,
            timeout: context.timeout_ms,
            cmp: gdpr.is_some(),
            ga: gdpr.and_then(|consent| consent.applies),
            cd: gdpr.and_then(|consent| consent.consent_string.clone()),
            usp_consent: context.usp_consent.clone(),
            schain: slots.iter().find_map(|slot| slot.schain.clone()),
            bid_requests: slots.iter().map(to_payload_bid).collect(),
        };

        let data = serde_json::to_string(&payload).change_context(AdapterError::Payload {
            message: "bid payload serialization failed".to_string(),
        })?;

        Ok(OutboundRequest {
            method: Method::POST,
            url: self.config.endpoint.clone(),
            data,
        })
    }

    fn interpret_response(
        &self,
        response: &ServerResponse,
        _request: &OutboundRequest,
    ) -> Vec<NormalizedBid> {
        let parsed: ExchangeResponse = match serde_json::from_slice(&response.body) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("seedtag: discarding malformed bid response: {err}");
                return Vec::new();
            }
        };

        log::info!("seedtag: interpreted {} bids", parsed.bids.len());

        parsed.bids.into_iter().map(normalize_bid).collect()
    }

    fn user_syncs(
        &self,
        options: &SyncOptions,
        responses: &[ServerResponse],
    ) -> Vec<SyncDirective> {
        if !options.iframe_enabled {
            return Vec::new();
        }

        // Last non-empty sync URL in the batch wins; at most one directive.
        let sync_url = responses.iter().rev().find_map(|response| {
            let parsed: ExchangeResponse = serde_json::from_slice(&response.body).ok()?;
            let url = parsed.cookie_sync?.url;
            (!url.is_empty()).then_some(url)
        });

        match sync_url {
            Some(url) => vec![SyncDirective {
                kind: SyncKind::Iframe,
                url,
            }],
            None => Vec::new(),
        }
    }

    fn timeout_url(&self, events: &[TimeoutEvent]) -> Option<String> {
        let event = events.first()?;
        let params = event.params.first()?;

        let mut url = Url::parse(&self.config.timeout_endpoint).ok()?;
        url.query_pairs_mut()
            .append_pair("publisherToken", &params.publisher_id)
            .append_pair("adUnitId", &params.ad_unit_id)
            .append_pair("timeout", &event.timeout_ms.to_string());
        Some(url.into())
    }

    fn on_timeout(&self, events: &[TimeoutEvent]) {
        if let Some(url) = self.timeout_url(events) {
            self.beacon.send(&url);
        }
    }

    fn on_bid_won(&self, bid: &NormalizedBid) {
        if let Some(url) = bid.win_url() {
            self.beacon.send(url);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
