//! Error types for fallible adapter operations.
//!
//! Note the deliberately small surface: ineligible slots are a filtering
//! outcome and malformed exchange responses interpret to an empty bid
//! list, so neither is represented here.

use derive_more::{Display, Error};

/// Errors surfaced by the adapter.
#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// The request builder was invoked with no validated slots. The
    /// orchestrator must filter through the eligibility check first.
    #[display("bid request built from an empty slot batch")]
    EmptyBatch,

    /// The outbound payload could not be serialized.
    #[display("bid payload error: {message}")]
    Payload { message: String },
}
