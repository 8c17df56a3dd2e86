//! Bounded HTTP retry with exponential backoff for policy-service calls.
//!
//! Handles 429 rate limiting, 5xx server errors, and network timeouts with a
//! configurable attempt count. The decision loop is latency-sensitive, so the
//! default attempt count stays low, and no backoff is paid after the final
//! attempt: an exhausted failure surfaces immediately so the controller can
//! take its fallback path. Every exhausted or non-retriable outcome maps to
//! `Error::Service`.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::warn;

/// Largest exponent fed to the backoff base, capping the delay at 64s
const MAX_BACKOFF_EXP: u32 = 6;

/// Backoff delay for the given exponent, capped so large attempt counts
/// cannot overflow the shift
fn backoff_delay(exponent: u32) -> Duration {
    Duration::from_secs(2u64.pow(exponent.min(MAX_BACKOFF_EXP)))
}

/// Send an HTTP request with bounded retry and exponential backoff.
///
/// Retry behavior:
/// - 429 (rate limited): backoff 2s, 4s, 8s
/// - 5xx (server error): backoff 1s, 2s, 4s
/// - Timeout/connect error: backoff 1s, 2s, 4s
/// - Other 4xx: non-retriable, fails immediately
///
/// The backoff runs between attempts only; once the final attempt fails the
/// error returns without sleeping.
pub async fn send_with_retry<F>(
    client: &Client,
    build_request: F,
    max_attempts: u32,
    context: &str,
) -> crate::Result<Response>
where
    F: Fn(&Client) -> RequestBuilder,
{
    let mut last_failure = format!("{}: no attempts made", context);

    for attempt in 0..max_attempts {
        let result = build_request(client).send().await;
        let retries_remain = attempt + 1 < max_attempts;

        match result {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return Ok(resp);
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    last_failure = format!("{}: rate limited (429)", context);
                    if retries_remain {
                        let delay = backoff_delay(attempt + 1);
                        warn!("{}: rate limited (429), retrying in {:?}", context, delay);
                        tokio::time::sleep(delay).await;
                    }
                } else if status.is_server_error() {
                    last_failure = format!("{}: server error ({})", context, status);
                    if retries_remain {
                        let delay = backoff_delay(attempt);
                        warn!("{}: server error ({}), retrying in {:?}", context, status, delay);
                        tokio::time::sleep(delay).await;
                    }
                } else {
                    warn!("{}: non-retriable error ({})", context, status);
                    return Err(crate::Error::Service(format!(
                        "{}: non-retriable error ({})",
                        context, status
                    )));
                }
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_failure = format!("{}: network error ({})", context, e);
                if retries_remain {
                    let delay = backoff_delay(attempt);
                    warn!("{}: network error ({}), retrying in {:?}", context, e, delay);
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                warn!("{}: request failed: {}", context, e);
                return Err(crate::Error::Service(format!(
                    "{}: request failed: {}",
                    context, e
                )));
            }
        }
    }

    warn!("{}: failed after {} attempts", context, max_attempts);
    Err(crate::Error::Service(format!(
        "{} (after {} attempts)",
        last_failure, max_attempts
    )))
}
