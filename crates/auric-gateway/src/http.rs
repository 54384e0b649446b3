//! # HTTP Ledger Gateway Adapter
//!
//! `reqwest`-backed implementation of [`LedgerGateway`] against the ledger
//! gateway's JSON API. All adapter instances are `Send + Sync` and designed
//! to be shared via `Arc` across concurrent submissions.
//!
//! ## Error Mapping
//!
//! - transport failure after retries → [`GatewayError::Network`]
//! - client-side request timeout → [`GatewayError::Timeout`]
//! - any non-2xx response → [`GatewayError::Rejected`] carrying the HTTP
//!   status and a body excerpt, verbatim, for diagnostics
//!
//! Idempotent reads retry transient transport errors with exponential
//! backoff. Submissions retry connection failures only: a submission that
//! timed out waiting for the response is surfaced as
//! [`GatewayError::Timeout`] without a re-send, because the request may
//! already have reached the ledger and every re-send can settle as an
//! independent operation. A response that arrived is never retried. The
//! pipeline adds its own overall submit bound on top of the per-request
//! timeout here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use auric_core::{Amount, OrderDuration, Side, TokenId};
use auric_fhe::{EncryptedPayload, Proof};

use crate::config::{ConfigError, GatewayConfig};
use crate::error::GatewayError;
use crate::gateway::LedgerGateway;
use crate::retry::RetryPolicy;
use crate::types::{ConfidentialValue, SessionAddress, TxRef};

/// API version path segment.
const API_PREFIX: &str = "ledger/v1";

/// Longest response-body excerpt preserved in a rejection reason.
const BODY_EXCERPT_LEN: usize = 256;

#[derive(Serialize)]
struct DepositRequest<'a> {
    address: &'a SessionAddress,
    payload: &'a EncryptedPayload,
    proof: &'a Proof,
    /// Public value transfer in minor units, as a decimal string.
    value: String,
}

#[derive(Serialize)]
struct AuthorizedRequest<'a> {
    address: &'a SessionAddress,
    payload: &'a EncryptedPayload,
    proof: &'a Proof,
}

#[derive(Serialize)]
struct OrderRequest<'a> {
    address: &'a SessionAddress,
    token_id: TokenId,
    payload: &'a EncryptedPayload,
    proof: &'a Proof,
    side: Side,
    duration_secs: u64,
}

#[derive(Deserialize)]
struct SubmitResponse {
    tx_ref: String,
}

#[derive(Deserialize)]
struct ValueResponse {
    value: String,
}

/// HTTP client for the ledger gateway service.
pub struct HttpLedgerGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpLedgerGateway {
    /// Build an adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the HTTP client cannot be
    /// constructed from the configured values.
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.session_token))
                .map_err(|_| {
                    ConfigError::InvalidUrl(
                        "session_token".into(),
                        "token contains characters invalid in a header".into(),
                    )
                })?,
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::InvalidUrl("endpoint".into(), e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.endpoint.as_str().trim_end_matches('/').to_string(),
            timeout,
            retry: RetryPolicy::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_PREFIX}/{path}", self.base_url)
    }

    fn map_transport(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }
        } else {
            GatewayError::Network {
                reason: e.to_string(),
            }
        }
    }

    /// POST a submission body and parse the transaction reference.
    ///
    /// Only connection failures are retried. A request timeout means the
    /// submission may have landed; it maps to [`GatewayError::Timeout`]
    /// after exactly one send.
    async fn post_submit<B: Serialize>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> Result<TxRef, GatewayError> {
        let url = self.url(path);
        let resp = self
            .retry
            .run(
                operation,
                |e: &reqwest::Error| e.is_connect(),
                || self.client.post(&url).json(body).send(),
            )
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            tracing::warn!(operation, %status, "ledger gateway declined submission");
            return Err(GatewayError::Rejected {
                reason: format!("HTTP {status}: {excerpt}"),
            });
        }

        let parsed: SubmitResponse = resp.json().await.map_err(|e| GatewayError::Network {
            reason: format!("malformed gateway response: {e}"),
        })?;
        tracing::info!(operation, tx_ref = %parsed.tx_ref, "ledger gateway accepted submission");
        Ok(TxRef::from_raw(parsed.tx_ref))
    }

    /// GET a read-only confidential value reference. Idempotent, so any
    /// transport error is retried.
    async fn get_value(&self, operation: &str, path: &str) -> Result<ConfidentialValue, GatewayError> {
        let url = self.url(path);
        let resp = self
            .retry
            .run(operation, |_: &reqwest::Error| true, || self.client.get(&url).send())
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            return Err(GatewayError::Rejected {
                reason: format!("HTTP {status}: {excerpt}"),
            });
        }

        let parsed: ValueResponse = resp.json().await.map_err(|e| GatewayError::Network {
            reason: format!("malformed gateway response: {e}"),
        })?;
        Ok(ConfidentialValue::from_display(parsed.value))
    }
}

impl LedgerGateway for HttpLedgerGateway {
    async fn submit_deposit(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
        value: Amount,
    ) -> Result<TxRef, GatewayError> {
        let body = DepositRequest {
            address,
            payload,
            proof,
            value: value.minor_units().to_string(),
        };
        self.post_submit("submit_deposit", "deposit", &body).await
    }

    async fn submit_withdraw(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> Result<TxRef, GatewayError> {
        let body = AuthorizedRequest {
            address,
            payload,
            proof,
        };
        self.post_submit("submit_withdraw", "withdraw", &body).await
    }

    async fn submit_mint(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> Result<TxRef, GatewayError> {
        let body = AuthorizedRequest {
            address,
            payload,
            proof,
        };
        self.post_submit("submit_mint", "mint", &body).await
    }

    async fn submit_trade_order(
        &self,
        address: &SessionAddress,
        token_id: TokenId,
        payload: &EncryptedPayload,
        proof: &Proof,
        side: Side,
        duration: OrderDuration,
    ) -> Result<TxRef, GatewayError> {
        let body = OrderRequest {
            address,
            token_id,
            payload,
            proof,
            side,
            duration_secs: duration.as_secs(),
        };
        self.post_submit("submit_trade_order", "orders", &body).await
    }

    async fn confidential_balance(
        &self,
        address: &SessionAddress,
    ) -> Result<ConfidentialValue, GatewayError> {
        let path = format!("balance/{}", address.as_str());
        self.get_value("confidential_balance", &path).await
    }

    async fn current_price(&self) -> Result<ConfidentialValue, GatewayError> {
        self.get_value("current_price", "price").await
    }

    async fn total_issued(&self) -> Result<ConfidentialValue, GatewayError> {
        self.get_value("total_issued", "total-issued").await
    }
}
