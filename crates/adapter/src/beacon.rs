//! Fire-and-forget tracking beacon.
//!
//! Timeout and win notifications are pure analytics: they must never
//! block, retry, or surface errors into the auction flow. The adapter
//! therefore talks to a narrow [`Beacon`] capability and the production
//! implementation discards every outcome.

use reqwest::Client;

/// One-way tracking channel.
pub trait Beacon: Send + Sync {
    /// Issue a best-effort GET to `url`. Implementations must not block
    /// the caller and must swallow failures.
    fn send(&self, url: &str);
}

/// Production beacon issuing the request on a background task.
#[derive(Debug, Clone, Default)]
pub struct HttpBeacon {
    client: Client,
}

impl HttpBeacon {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Beacon for HttpBeacon {
    fn send(&self, url: &str) {
        // Tracking is worthless outside a runtime; drop rather than block.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::debug!("no async runtime, dropping beacon to {url}");
            return;
        };

        let client = self.client.clone();
        let url = url.to_owned();
        handle.spawn(async move {
            if let Err(err) = client.get(&url).send().await {
                log::debug!("beacon to {url} failed: {err}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sending_without_a_runtime_is_a_silent_no_op() {
        HttpBeacon::new().send("https://s.seedtag.com/se/hb/timeout");
    }
}
