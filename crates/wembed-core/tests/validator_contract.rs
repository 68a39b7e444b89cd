//! Integration tests for the validation contract across the public API.
//!
//! These tests exercise the crate the way the host library uses it: raw
//! channel values in, typed envelopes (or silence) out.

use serde_json::{json, Value};
use wembed_core::{
    decode_frame_to_host, decode_host_to_frame, BalanceInfo, Envelope, FrameToHostMsg,
    HostToFrameMsg, PreferredLayout, RouteConfig, RouteKind, WireMessage,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Every well-formed inbound envelope, one per kind.
fn well_formed_inbound() -> Vec<Value> {
    vec![
        json!({"id": "1", "kind": "authStatus", "payload": {"userDetails": {"email": "a@b.c"}}}),
        json!({"id": "2", "kind": "closed", "payload": {}}),
        json!({"id": "3", "kind": "resize", "payload": {
            "routeKind": "account", "preferredLayout": "wide", "width": 760, "height": 600
        }}),
        json!({"id": "4", "kind": "balance", "payload": {"amount": 12.5, "currency": "USD"}}),
        json!({"id": "5", "kind": "pendingRequests", "payload": {"count": 2}}),
    ]
}

/// A grab-bag of traffic the channel may carry that is not ours.
fn malformed_inbound() -> Vec<Value> {
    vec![
        // not objects at all
        json!(null),
        json!(3.14),
        json!("webpackHotUpdate"),
        json!([{"id": "1", "kind": "closed", "payload": {}}]),
        // analytics beacon from another script sharing the channel
        json!({"event": "pageview", "ts": 1700000000}),
        // missing envelope fields
        json!({"kind": "closed", "payload": {}}),
        json!({"id": "1", "payload": {}}),
        json!({"id": "1", "kind": "closed"}),
        // unknown kind
        json!({"id": "1", "kind": "signTransaction", "payload": {}}),
        // recognized kind, broken payload
        json!({"id": "1", "kind": "authStatus", "payload": {}}),
        json!({"id": "1", "kind": "resize", "payload": {"routeKind": "auth"}}),
        json!({"id": "1", "kind": "resize", "payload": {
            "routeKind": "wormhole", "preferredLayout": "compact", "height": 500
        }}),
        json!({"id": "1", "kind": "balance", "payload": {"amount": "lots", "currency": "USD"}}),
        json!({"id": "1", "kind": "pendingRequests", "payload": {"count": -1}}),
        json!({"id": "1", "kind": "pendingRequests", "payload": 7}),
    ]
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[test]
fn test_every_well_formed_inbound_kind_is_accepted() {
    for value in well_formed_inbound() {
        assert!(
            decode_frame_to_host(&value).is_some(),
            "must accept well-formed envelope: {value}"
        );
    }
}

#[test]
fn test_every_malformed_input_is_rejected() {
    for value in malformed_inbound() {
        assert!(
            decode_frame_to_host(&value).is_none(),
            "must reject malformed input: {value}"
        );
    }
}

#[test]
fn test_validation_is_idempotent_over_the_whole_fixture_set() {
    for value in well_formed_inbound().into_iter().chain(malformed_inbound()) {
        let first = decode_frame_to_host(&value);
        let second = decode_frame_to_host(&value);
        assert_eq!(first, second, "two runs must agree for: {value}");
    }
}

#[test]
fn test_accepted_payload_is_returned_unchanged() {
    let details = json!({"email": "dev@example.com", "avatar": null, "roles": ["user"]});
    let value = json!({"id": "1", "kind": "authStatus", "payload": {"userDetails": details}});

    let decoded = decode_frame_to_host(&value).unwrap();

    match decoded.message {
        FrameToHostMsg::AuthStatus(p) => assert_eq!(p.user_details, Some(details)),
        other => panic!("expected AuthStatus, got {:?}", other),
    }
}

#[test]
fn test_outbound_push_envelopes_round_trip_through_the_frame_decoder() {
    let theme = json!({"mode": "dark", "radius": 12});
    let wire = Envelope::new(HostToFrameMsg::ThemeUpdate(theme.clone())).to_value();

    let decoded = decode_host_to_frame(&wire).expect("push envelope must validate");

    match decoded.message {
        HostToFrameMsg::ThemeUpdate(payload) => assert_eq!(payload, theme),
        other => panic!("expected ThemeUpdate, got {:?}", other),
    }
}

#[test]
fn test_frame_emitted_envelopes_round_trip_through_the_host_decoder() {
    let inbound: Vec<FrameToHostMsg> = vec![
        FrameToHostMsg::Closed,
        FrameToHostMsg::Resize(RouteConfig {
            route_kind: RouteKind::Auth,
            preferred_layout: PreferredLayout::Compact,
            width: None,
            height: 569.0,
        }),
        FrameToHostMsg::Balance(BalanceInfo { amount: 0.001, currency: "BTC".to_string() }),
    ];

    for message in inbound {
        let kind = message.kind();
        let wire = Envelope::new(message).to_value();
        let decoded = decode_frame_to_host(&wire)
            .unwrap_or_else(|| panic!("own encoding must validate for kind {kind}"));
        assert_eq!(decoded.message.kind(), kind);
    }
}
