//! Retry/backoff for provider calls (§4.2): capped exponential backoff, base
//! 300ms, cap 5s, retrying on transient (5xx, network, timeout, 429) errors
//! only.

use std::time::Duration;
use voice_agent_core::ProviderError;

const BASE_BACKOFF: Duration = Duration::from_millis(300);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

pub async fn with_retries<T, F, Fut>(max_attempts: u32, mut attempt: F) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    let mut backoff = BASE_BACKOFF;
    let mut last_err = None;

    for attempt_number in 1..=max_attempts.max(1) {
        match attempt(attempt_number).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.retryable || attempt_number == max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    provider = %err.provider,
                    attempt = attempt_number,
                    max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    "provider call failed, retrying"
                );
                last_err = Some(err);
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }

    Err(last_err.expect("loop always returns or sets last_err before exiting"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use voice_agent_core::ProviderErrorKind;

    #[tokio::test]
    async fn retries_transient_errors_up_to_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ProviderError> = with_retries(3, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::new("mock", ProviderErrorKind::Network, "boom")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_non_retryable_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ProviderError> = with_retries(3, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::from_status("mock", 400, "bad request")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_retries(3, |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(ProviderError::new("mock", ProviderErrorKind::Timeout, "slow"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
