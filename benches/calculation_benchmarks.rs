//! Performance benchmarks for the Leave Engine.
//!
//! Covers the pure calculation paths and the HTTP preview round trip:
//! - Leave day calculation over ranges from a week to a full year
//! - Balance computation against a growing request history
//! - `POST /leave/preview` through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;

use chrono::{Days, NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::{HolidayCalendar, calculate_leave_days, compute_balance};
use leave_engine::config::{AccrualPolicy, ConfigLoader};
use leave_engine::models::{DateRange, Holiday, LeaveRequest, LeaveStatus, LeaveType};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the default configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

/// Builds the holiday calendar from the configured seed holidays.
fn default_calendar(config: &ConfigLoader) -> HolidayCalendar {
    let holidays: Vec<Holiday> = config
        .holidays()
        .iter()
        .cloned()
        .map(Holiday::from)
        .collect();
    HolidayCalendar::new(&holidays)
}

fn make_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A range of `days` days starting on Thursday 1 Jan 2026.
fn range_of(days: u64) -> DateRange {
    let start = make_date("2026-01-01");
    DateRange::new(start, start + Days::new(days - 1)).unwrap()
}

/// `count` single-day approved requests, one per week.
fn request_history(count: u64) -> Vec<LeaveRequest> {
    let first = make_date("2026-01-05");
    (0..count)
        .map(|i| {
            let date = first + Days::new(i * 7);
            LeaveRequest {
                id: Uuid::new_v4(),
                employee_id: "emp_bench_001".to_string(),
                start_date: date,
                end_date: date,
                leave_type: LeaveType::Casual,
                is_sandwich_leave: false,
                total_days: Decimal::ONE,
                sandwich_days: Decimal::ZERO,
                reason: "Benchmark".to_string(),
                status: LeaveStatus::Approved,
                admin_remarks: None,
                approved_by: Some("mgr_bench".to_string()),
                approved_at: Some(Utc::now()),
                created_at: Utc::now(),
            }
        })
        .collect()
}

/// Benchmark: Leave day calculation for increasing range lengths.
fn bench_leave_days(c: &mut Criterion) {
    let config = load_config();
    let calendar = default_calendar(&config);

    let mut group = c.benchmark_group("leave_days");

    for days in [7u64, 31, 90, 366].iter() {
        let range = range_of(*days);
        group.throughput(Throughput::Elements(*days));
        group.bench_with_input(BenchmarkId::new("sandwich", days), &range, |b, range| {
            b.iter(|| calculate_leave_days(black_box(range), true, black_box(&calendar)))
        });
        group.bench_with_input(BenchmarkId::new("plain", days), &range, |b, range| {
            b.iter(|| calculate_leave_days(black_box(range), false, black_box(&calendar)))
        });
    }

    group.finish();
}

/// Benchmark: Balance computation against request histories.
fn bench_balance(c: &mut Criterion) {
    let policy = AccrualPolicy {
        days_per_month: Decimal::new(15, 1),
        max_accrued: Some(Decimal::from(45)),
    };
    let joined = Some(make_date("2020-01-01"));
    let today = make_date("2026-12-31");

    let mut group = c.benchmark_group("balance");

    for count in [0u64, 10, 52].iter() {
        let history = request_history(*count);
        group.bench_with_input(BenchmarkId::new("requests", count), &history, |b, history| {
            b.iter(|| compute_balance(joined, black_box(history), today, &policy))
        });
    }

    group.finish();
}

/// Benchmark: Preview round trip through the HTTP router.
fn bench_preview_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config()).expect("Failed to build state");
    let router = create_router(state);

    let body = serde_json::json!({
        "start_date": "2026-01-23",
        "end_date": "2026-02-06",
        "is_sandwich_leave": true
    })
    .to_string();

    c.bench_function("preview_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/leave/preview")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_leave_days,
    bench_balance,
    bench_preview_endpoint,
);
criterion_main!(benches);
