//! 工具函数性能基准测试

use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use muka::storage::{HASH_LENGTH, Link, LinkState, NewLink};
use muka::utils::{format_iso8601, generate_random_code, is_url_safe};

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [6, HASH_LENGTH, 16, 32] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== is_url_safe 基准测试 ==============

fn bench_is_url_safe(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_url_safe");

    group.bench_function("valid_hash", |b| {
        b.iter(|| {
            assert!(is_url_safe("aZ3_x-9QkL"));
        });
    });

    group.bench_function("invalid_path_traversal", |b| {
        b.iter(|| {
            assert!(!is_url_safe("../etc/passwd"));
        });
    });

    let long_id = "a".repeat(64);
    group.bench_function("valid_request_id", |b| {
        b.iter(|| {
            assert!(is_url_safe(&long_id));
        });
    });

    group.finish();
}

// ============== Link 状态判定 ==============

fn bench_link_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("models/link_state");

    let issued_at = Utc::now();
    let new_link = NewLink::new("aZ3_x-9QkL", 1, issued_at);
    let link = Link {
        id: 1,
        hash: new_link.hash,
        question_id: new_link.question_id,
        used: false,
        created_at: new_link.created_at,
        expires_at: new_link.expires_at,
    };

    let active_at = issued_at + Duration::days(1);
    group.bench_function("active", |b| {
        b.iter(|| {
            assert_eq!(link.state_at(active_at), LinkState::Active);
        });
    });

    let expired_at = issued_at + Duration::days(8);
    group.bench_function("expired", |b| {
        b.iter(|| {
            assert_eq!(link.state_at(expired_at), LinkState::Expired);
        });
    });

    group.bench_function("format_expires_at", |b| {
        b.iter(|| format_iso8601(&link.expires_at));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_random_code,
    bench_is_url_safe,
    bench_link_state,
);
criterion_main!(benches);
