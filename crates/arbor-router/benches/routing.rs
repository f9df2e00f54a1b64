//! Routing benchmarks.
//!
//! Run with: `cargo bench -p arbor-router`

use arbor_router::Router;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_router(num_routes: usize) -> Router<String> {
    let mut router = Router::new();

    for i in 0..num_routes / 3 {
        router
            .get(&format!("/api/v1/resource{i}"), format!("getResource{i}"))
            .expect("static route");
    }

    for i in 0..num_routes / 3 {
        router
            .get(&format!("/api/v1/resource{i}/:id"), format!("getResourceById{i}"))
            .expect("param route");
    }

    for i in 0..num_routes / 3 {
        router
            .get(
                &format!("/api/v1/org/:orgId/resource{i}/:id"),
                format!("getOrgResource{i}"),
            )
            .expect("nested route");
    }

    router
        .get("/static/*filepath", "serveStatic".to_string())
        .expect("catch-all route");

    router
}

fn bench_static_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("static_match", |b| {
        b.iter(|| black_box(router.lookup("GET", "/api/v1/resource20")));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.lookup("GET", "/api/v1/resource25/12345")));
    });
}

fn bench_nested_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("nested_param_match", |b| {
        b.iter(|| black_box(router.lookup("GET", "/api/v1/org/acme-corp/resource10/12345")));
    });
}

fn bench_catch_all_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("catch_all_match", |b| {
        b.iter(|| black_box(router.lookup("GET", "/static/css/site/main.css")));
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.lookup("GET", "/api/v2/nonexistent/path")));
    });
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("build_300_routes", |b| {
        b.iter(|| black_box(build_router(300)));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [12, 48, 96, 480, 960] {
        let router = build_router(num_routes);

        group.bench_with_input(
            BenchmarkId::new("static_match", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}", n / 6);
                b.iter(|| black_box(router.lookup("GET", &path)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("param_match", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}/12345", n / 6);
                b.iter(|| black_box(router.lookup("GET", &path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_static_match,
    bench_param_match,
    bench_nested_param_match,
    bench_catch_all_match,
    bench_miss,
    bench_insert,
    bench_scaling
);
criterion_main!(benches);
