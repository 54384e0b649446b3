//! Bounded retry for ledger gateway HTTP calls.
//!
//! Each call path declares which transport errors are safe to retry.
//! Idempotent reads retry any transient transport error. Submissions
//! retry connection failures only: a request that never connected cannot
//! have reached the ledger, but one that timed out waiting for the
//! response may already have landed, and re-sending it could settle the
//! same value twice. Those surface immediately for the caller's
//! unknown-outcome handling. A response that arrived, whatever its
//! status, is handed back without retry.

use std::time::Duration;

/// Backoff policy for transport-level retries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    /// Retry attempts after the initial request.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each subsequent attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Run `f` until it yields a response or the policy is exhausted.
    ///
    /// Errors for which `retryable` returns `false` are returned after a
    /// single attempt, with no re-send.
    pub async fn run<F, Fut, R>(
        &self,
        operation: &str,
        retryable: R,
        f: F,
    ) -> Result<reqwest::Response, reqwest::Error>
    where
        R: Fn(&reqwest::Error) -> bool,
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut delay = self.base_delay;
        for attempt in 0..self.max_retries {
            match f().await {
                Ok(resp) => return Ok(resp),
                Err(e) if retryable(&e) => {
                    tracing::warn!(
                        operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        "transport error, retrying in {delay:?}: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
        // Last attempt; its error is final.
        f().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn exhausts_policy_on_persistent_transport_failure() {
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(5),
        };
        let calls = Arc::new(AtomicU32::new(0));
        let cc = calls.clone();

        let result = policy
            .run("test", |_: &reqwest::Error| true, || {
                let cc = cc.clone();
                async move {
                    cc.fetch_add(1, Ordering::SeqCst);
                    // Closed port: connection refused, a transport error.
                    reqwest::Client::builder()
                        .timeout(Duration::from_millis(50))
                        .build()
                        .unwrap()
                        .get("http://127.0.0.1:1/")
                        .send()
                        .await
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3, "initial + 2 retries");
    }

    #[tokio::test]
    async fn non_retryable_transport_error_is_final_after_one_attempt() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(5),
        };
        let calls = Arc::new(AtomicU32::new(0));
        let cc = calls.clone();

        let result = policy
            .run("test", |_: &reqwest::Error| false, || {
                let cc = cc.clone();
                async move {
                    cc.fetch_add(1, Ordering::SeqCst);
                    reqwest::Client::builder()
                        .timeout(Duration::from_millis(50))
                        .build()
                        .unwrap()
                        .get("http://127.0.0.1:1/")
                        .send()
                        .await
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1, "no re-send");
    }
}
