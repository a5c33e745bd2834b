// ABOUTME: Integration tests for the reqwest-backed transport against a local mock HTTP server
// ABOUTME: Checks headers, user agent, JSON bodies and connection failures over real sockets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::net::TcpListener;
use std::time::Duration;

use gatekeeper_driver::constants::http::USER_AGENT;
use gatekeeper_driver::models::{AdminCredentials, NewUser, Token};
use gatekeeper_driver::{
    DriverConfig, ErrorCode, GatekeeperClient, GatekeeperEndpoint, ResilientAdminClient,
    RetryConfig,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for_port(port: u16) -> DriverConfig {
    DriverConfig::new(GatekeeperEndpoint::new("http://127.0.0.1", port).unwrap())
}

fn client_for(server: &MockServer) -> GatekeeperClient {
    GatekeeperClient::new(&config_for_port(server.address().port()))
}

/// Port on localhost with nothing listening
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_token_request_carries_credentials_and_user_agent() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(header("X-Auth-Uid", "7"))
        .and(header("X-Auth-Password", "pw"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": { "id": "live-tok" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).generate_token(7, "pw").await.unwrap();

    assert_eq!(token.unwrap().as_str(), "live-tok");
}

#[tokio::test]
async fn test_admin_call_sends_token_header_and_json_body() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(header("X-Auth-Uid", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": { "id": "admin-tok" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/user/"))
        .and(header("X-Auth-Token", "admin-tok"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "username": "alice",
            "password": "pw",
            "isadmin": "y",
            "accesslist": "ALL",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "info": [{ "id": "42" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let admin = ResilientAdminClient::new(
        client_for(&server),
        AdminCredentials::new(1, "admin-secret"),
        RetryConfig::default(),
    );
    let user_id = admin
        .register_user(&NewUser::new("alice", "pw", true, " ALL "))
        .await
        .unwrap();

    assert_eq!(user_id, 42);
}

#[tokio::test]
async fn test_service_validation_sends_service_key() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/validate/svc-tok"))
        .and(header("X-Auth-Service-Key", "key-3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let valid = client_for(&server)
        .validate_token_for_service(&Token::new("svc-tok"), "key-3")
        .await
        .unwrap();

    assert!(valid);
}

#[tokio::test]
async fn test_unmatched_status_is_an_answer_not_a_failure() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/7"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let authenticated = client_for(&server)
        .simple_authentication(7, "wrong")
        .await
        .unwrap();

    assert!(!authenticated);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    common::init_test_logging();
    let client = GatekeeperClient::new(&config_for_port(closed_port()));

    let err = client.simple_authentication(7, "pw").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::TransportFailure);
    assert_eq!(err.operation(), Some("simple_authentication"));
}

#[tokio::test]
async fn test_slow_response_times_out_as_transport_failure() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/7"))
        .respond_with(ResponseTemplate::new(202).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut config = config_for_port(server.address().port());
    config.http.timeout_secs = 1;
    let client = GatekeeperClient::new(&config);

    let err = client.simple_authentication(7, "pw").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::TransportFailure);
}
