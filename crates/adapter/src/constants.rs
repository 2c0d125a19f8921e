//! Exchange-wide constants.

/// Bidder code reported to the host.
pub const BIDDER_CODE: &str = "seedtag";

/// IAB Global Vendor List id the host's consent subsystem resolves
/// vendor-specific consent against.
pub const GVL_ID: u16 = 157;

/// Adapter version string sent in the bid payload.
pub const ADAPTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placement kinds the exchange accepts.
pub const ALLOWED_PLACEMENTS: [&str; 5] =
    ["banner", "video", "inImage", "inScreen", "inArticle"];
