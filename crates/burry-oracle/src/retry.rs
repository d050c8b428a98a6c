//! Backoff for aggregator reads.
//!
//! A read is repeated when no answer arrived (connect failure, timeout) or
//! when the aggregator answered with a status meaning it may answer
//! properly on a later try: 429, 502, 503, or 504. Any other answer is
//! final. The answer of the last attempt is returned whatever its status.

use std::future::Future;
use std::time::Duration;

use burry_core::Address;
use reqwest::{Response, StatusCode};

use crate::error::OracleError;

/// First backoff delay in milliseconds; doubles after every attempt.
pub(crate) const BASE_DELAY_MS: u64 = 200;

/// Whether `status` says the feed may answer on a later try.
pub(crate) fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(1 << attempt.min(16)))
}

/// Read `feed` through `send`, retrying transient failures up to
/// `max_retries` times.
pub(crate) async fn read_with_backoff<F, Fut>(
    feed: &Address,
    max_retries: u32,
    send: F,
) -> Result<Response, OracleError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        let outcome = send().await;
        let failure = match &outcome {
            Ok(resp) if is_transient(resp.status()) => Some(format!("HTTP {}", resp.status().as_u16())),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
        match failure {
            Some(failure) if attempt < max_retries => {
                let delay = backoff(attempt);
                attempt += 1;
                tracing::warn!(
                    feed = %feed.short(),
                    attempt,
                    max_retries,
                    "oracle read failed ({failure}), retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
            }
            _ => {
                return outcome
                    .map_err(|e| OracleError::unavailable(feed, format!("request failed: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn delays_double_from_base() {
        assert_eq!(backoff(0), Duration::from_millis(200));
        assert_eq!(backoff(1), Duration::from_millis(400));
        assert_eq!(backoff(2), Duration::from_millis(800));
    }

    #[test]
    fn only_overload_statuses_are_transient() {
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_transient(StatusCode::OK));
    }

    #[tokio::test]
    async fn unreachable_feed_is_tried_once_per_allowed_retry() {
        let calls = AtomicU32::new(0);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let feed = Address::new_from_array([9; 32]);

        let err = read_with_backoff(&feed, 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            // Port 1 is closed: connection refused.
            client.get("http://127.0.0.1:1/").send()
        })
        .await
        .unwrap_err();

        assert!(matches!(err, OracleError::Unavailable { feed: f, .. } if f == feed));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
