//! Trait definition for exchange bid adapters.

use error_stack::Report;

use crate::error::AdapterError;
use crate::types::{
    AuctionContext, NormalizedBid, OutboundRequest, ServerResponse, SlotConfig, SyncDirective,
    SyncOptions, TimeoutEvent,
};

/// Trait implemented by exchange adapters the host auctions through.
///
/// The pipeline methods (`is_eligible`, `build_request`,
/// `interpret_response`, `user_syncs`) are synchronous and pure over their
/// inputs; the host may invoke them repeatedly and concurrently without
/// coordination. Only the event notifiers reach the network, through the
/// adapter's beacon, and those are fire-and-forget.
pub trait BidAdapter: Send + Sync {
    /// Bidder code reported to the host (e.g. "seedtag").
    fn bidder_code(&self) -> &'static str;

    /// IAB Global Vendor List id the host's consent subsystem uses to
    /// resolve vendor-specific consent status.
    fn gvl_id(&self) -> u16;

    /// Whether the slot satisfies the exchange's parameter contract.
    ///
    /// An ineligible slot is a filtering outcome, not an error: the host
    /// drops it from the batch and the round continues.
    fn is_eligible(&self, slot: &SlotConfig) -> bool;

    /// Build the outbound request for a batch of validated slots.
    ///
    /// Per-slot payload entries preserve the order of `slots`.
    ///
    /// # Errors
    ///
    /// Fails when `slots` is empty (the orchestrator must filter through
    /// [`Self::is_eligible`] first and skip the call when nothing
    /// survives) or when the payload cannot be serialized.
    fn build_request(
        &self,
        slots: &[SlotConfig],
        context: &AuctionContext,
    ) -> Result<OutboundRequest, Report<AdapterError>>;

    /// Interpret the exchange's raw response into normalized bids.
    ///
    /// Absent, malformed, or empty responses interpret to an empty list;
    /// a broken response must never stop the host's auction.
    fn interpret_response(
        &self,
        response: &ServerResponse,
        request: &OutboundRequest,
    ) -> Vec<NormalizedBid>;

    /// User-sync directives derived from the round's responses.
    fn user_syncs(
        &self,
        options: &SyncOptions,
        responses: &[ServerResponse],
    ) -> Vec<SyncDirective>;

    /// Timeout-tracking URL for the given events, when one can be built.
    fn timeout_url(&self, events: &[TimeoutEvent]) -> Option<String>;

    /// Report an auction timeout to the exchange. Best-effort.
    fn on_timeout(&self, events: &[TimeoutEvent]);

    /// Report a won bid to the exchange. Best-effort; a bid without a
    /// win-notification URL produces no network action.
    fn on_bid_won(&self, bid: &NormalizedBid);
}
