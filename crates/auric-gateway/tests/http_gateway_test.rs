//! # HTTP Ledger Gateway Integration Tests
//!
//! Exercises [`HttpLedgerGateway`] against a wiremock server to verify
//! request construction, response parsing, and the error mapping
//! (rejection vs. network vs. timeout) without a live ledger.

use std::collections::BTreeMap;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auric_core::{Amount, OperationKind, OrderDuration, Side, TokenId};
use auric_fhe::{
    ConfidentialEncoder, EncryptedPayload, KeyMaterialProvider, MockFheEncoder, MockProofScheme,
    PlaintextRecord, Proof, ProofScheme, SessionKeyProvider,
};
use auric_gateway::{GatewayConfig, GatewayError, HttpLedgerGateway, LedgerGateway, SessionAddress};

fn artifacts(kind: OperationKind) -> (EncryptedPayload, Proof) {
    let pair = SessionKeyProvider.obtain_key_pair().unwrap();
    let record = PlaintextRecord::Amount {
        amount: Amount::parse("0.1").unwrap(),
    };
    let payload = MockFheEncoder.encode(&record, &pair.public).unwrap();
    let proof = MockProofScheme.prove(&payload, kind, &BTreeMap::new()).unwrap();
    (payload, proof)
}

async fn gateway_for(server: &MockServer) -> HttpLedgerGateway {
    let url = server.uri();
    let port = url.rsplit(':').next().unwrap().parse().unwrap();
    let config = GatewayConfig::local_mock(port, "test-session-token").unwrap();
    HttpLedgerGateway::new(&config).unwrap()
}

fn addr() -> SessionAddress {
    SessionAddress::new("0xa11ce").unwrap()
}

#[tokio::test]
async fn deposit_success_returns_tx_ref() {
    let server = MockServer::start().await;
    let (payload, proof) = artifacts(OperationKind::Deposit);

    Mock::given(method("POST"))
        .and(path("/ledger/v1/deposit"))
        .and(header("Authorization", "Bearer test-session-token"))
        .and(body_partial_json(serde_json::json!({
            "address": "0xa11ce",
            "value": Amount::parse("0.1").unwrap().minor_units().to_string(),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tx_ref": "tx-0001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let tx = gateway
        .submit_deposit(&addr(), &payload, &proof, Amount::parse("0.1").unwrap())
        .await
        .unwrap();
    assert_eq!(tx.as_str(), "tx-0001");
}

#[tokio::test]
async fn rejection_preserves_status_and_body() {
    let server = MockServer::start().await;
    let (payload, proof) = artifacts(OperationKind::Withdraw);

    Mock::given(method("POST"))
        .and(path("/ledger/v1/withdraw"))
        .respond_with(ResponseTemplate::new(422).set_body_string("proof binding mismatch"))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let err = gateway
        .submit_withdraw(&addr(), &payload, &proof)
        .await
        .unwrap_err();
    match err {
        GatewayError::Rejected { reason } => {
            assert!(reason.contains("422"));
            assert!(reason.contains("proof binding mismatch"));
        }
        other => panic!("expected Rejected, got: {other}"),
    }
}

#[tokio::test]
async fn trade_order_sends_public_routing_fields() {
    let server = MockServer::start().await;
    let (payload, proof) = artifacts(OperationKind::PlaceTradeOrder);

    Mock::given(method("POST"))
        .and(path("/ledger/v1/orders"))
        .and(body_partial_json(serde_json::json!({
            "token_id": 1,
            "side": "buy",
            "duration_secs": 3600,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tx_ref": "tx-order-7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let tx = gateway
        .submit_trade_order(
            &addr(),
            TokenId::new(1).unwrap(),
            &payload,
            &proof,
            Side::Buy,
            OrderDuration::from_secs(3600).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(tx.as_str(), "tx-order-7");
}

#[tokio::test]
async fn balance_read_parses_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ledger/v1/balance/0xa11ce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": "1.25"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let balance = gateway.confidential_balance(&addr()).await.unwrap();
    assert_eq!(format!("{balance}"), "1.25");
}

#[tokio::test]
async fn timed_out_submission_is_not_resent() {
    let server = MockServer::start().await;
    let (payload, proof) = artifacts(OperationKind::Deposit);

    // The response outlives the per-request timeout, so the client gives
    // up while the deposit is already at the server. Re-sending here
    // would risk settling the same value twice; `.expect(1)` verifies on
    // shutdown that exactly one request arrived.
    Mock::given(method("POST"))
        .and(path("/ledger/v1/deposit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(serde_json::json!({ "tx_ref": "tx-late" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let port = url.rsplit(':').next().unwrap().parse().unwrap();
    let mut config = GatewayConfig::local_mock(port, "test-session-token").unwrap();
    config.request_timeout_secs = 1;
    let gateway = HttpLedgerGateway::new(&config).unwrap();

    let err = gateway
        .submit_deposit(&addr(), &payload, &proof, Amount::parse("1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Timeout { .. }), "{err:?}");
}

#[tokio::test]
async fn malformed_success_body_maps_to_network_error() {
    let server = MockServer::start().await;
    let (payload, proof) = artifacts(OperationKind::MintToken);

    Mock::given(method("POST"))
        .and(path("/ledger/v1/mint"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let err = gateway.submit_mint(&addr(), &payload, &proof).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network { .. }));
}
