//! Criterion benchmarks for the message validator.
//!
//! The validator sits on the hot path of every channel event, including the
//! unrelated traffic other scripts post, so both the accept and the reject
//! paths matter.
//!
//! Run with:
//! ```bash
//! cargo bench --package wembed-core --bench validate_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use wembed_core::decode_frame_to_host;

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn make_auth_status() -> Value {
    json!({"id": "bench", "kind": "authStatus", "payload": {"userDetails": {"email": "a@b.c"}}})
}

fn make_closed() -> Value {
    json!({"id": "bench", "kind": "closed", "payload": {}})
}

fn make_resize() -> Value {
    json!({"id": "bench", "kind": "resize", "payload": {
        "routeKind": "auth-request", "preferredLayout": "compact", "width": 375, "height": 569
    }})
}

fn make_balance() -> Value {
    json!({"id": "bench", "kind": "balance", "payload": {"amount": 12.5, "currency": "USD"}})
}

fn make_pending_requests() -> Value {
    json!({"id": "bench", "kind": "pendingRequests", "payload": {"count": 3}})
}

fn make_foreign_traffic() -> Value {
    json!({"event": "pageview", "ts": 1700000000, "path": "/checkout"})
}

fn make_unknown_kind() -> Value {
    json!({"id": "bench", "kind": "signTransaction", "payload": {"to": "0xabc"}})
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_accept_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_accept");
    let fixtures: Vec<(&str, Value)> = vec![
        ("authStatus", make_auth_status()),
        ("closed", make_closed()),
        ("resize", make_resize()),
        ("balance", make_balance()),
        ("pendingRequests", make_pending_requests()),
    ];

    for (name, value) in &fixtures {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| decode_frame_to_host(black_box(value)));
        });
    }
    group.finish();
}

fn bench_reject_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_reject");
    let fixtures: Vec<(&str, Value)> = vec![
        ("foreign_traffic", make_foreign_traffic()),
        ("unknown_kind", make_unknown_kind()),
        ("non_object", json!("webpackHotUpdate")),
    ];

    for (name, value) in &fixtures {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| decode_frame_to_host(black_box(value)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_accept_paths, bench_reject_paths);
criterion_main!(benches);
