/// Hardening pipeline benchmarks
/// Measures sanitizer cost per input shape and a full list call over the in-memory store
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use anime_catalog::application::hardening::{sanitize_text, PageRequestGuard, PagingPolicy};
use anime_catalog::application::use_cases::AnimeQueryService;
use anime_catalog::domain::value_objects::{PagingRequest, SortOrder};
use anime_catalog::infrastructure::persistence::InMemoryAnimeRepository;

fn sanitizer_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_text");
    group.measurement_time(Duration::from_secs(5));

    let inputs = [
        ("plain", "Fullmetal Alchemist Brotherhood".to_string()),
        ("tags", "<h1>alfredo</h1><b>New</b>Name".to_string()),
        (
            "script",
            "alemcar<script>alert('xss')</script><style>p{}</style>".to_string(),
        ),
        ("encoded", "&amp;lt;i&amp;gt;deep&amp;lt;/i&amp;gt;".to_string()),
        ("long", "<p>anime </p>".repeat(200)),
    ];

    for (label, input) in inputs.iter() {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("shape", label), input, |b, s| {
            b.iter(|| sanitize_text(black_box(s)))
        });
    }

    group.finish();
}

fn page_guard_benchmarks(c: &mut Criterion) {
    let guard = PageRequestGuard::new(PagingPolicy::default());
    let request = PagingRequest::new(-1, 999_999)
        .with_sort(SortOrder::desc("password<script>"))
        .with_sort(SortOrder::asc("name"));

    c.bench_function("page_request_guard", |b| {
        b.iter(|| guard.guard(black_box(&request)))
    });
}

fn list_all_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let names: Vec<String> = (0..1000)
        .map(|i| format!("<i>anime</i> number {}", i))
        .collect();
    let service = AnimeQueryService::new(Arc::new(InMemoryAnimeRepository::with_names(names)));
    let request = PagingRequest::new(3, 50).with_sort(SortOrder::desc("name"));

    c.bench_function("list_all_50_items", |b| {
        b.to_async(&rt)
            .iter(|| async { service.list_all(black_box(&request)).await.unwrap() })
    });
}

criterion_group!(
    benches,
    sanitizer_benchmarks,
    page_guard_benchmarks,
    list_all_benchmarks
);
criterion_main!(benches);
