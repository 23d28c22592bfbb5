use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suzume::rewrite::{optimize_with, responsive_set_with, Provider, TransformRequest};

/// Benchmark single-URL rewriting per provider
fn bench_optimize_per_provider(c: &mut Criterion) {
    let providers = [
        (
            "cloudinary",
            Provider::Cloudinary {
                cloud_name: "demo".to_string(),
            },
        ),
        (
            "imagekit",
            Provider::ImageKit {
                id: "acme".to_string(),
            },
        ),
        (
            "vercel",
            Provider::Vercel {
                host: "example.com".to_string(),
            },
        ),
        ("generic", Provider::Generic),
    ];

    let opts = TransformRequest::new().with_width(800).with_quality(80);
    let mut group = c.benchmark_group("optimize");
    for (name, provider) in &providers {
        group.bench_with_input(BenchmarkId::from_parameter(name), provider, |b, provider| {
            b.iter(|| {
                optimize_with(
                    provider,
                    black_box("https://example.com/gallery/photo.jpg"),
                    &opts,
                )
            })
        });
    }
    group.finish();
}

/// Benchmark the eligibility fast path (pass-through, no construction)
fn bench_optimize_ineligible(c: &mut Criterion) {
    let opts = TransformRequest::new().with_width(800);

    c.bench_function("optimize_ineligible_passthrough", |b| {
        b.iter(|| {
            optimize_with(
                &Provider::Generic,
                black_box("https://example.com/photo.jpg?w=800"),
                &opts,
            )
        })
    });
}

/// Benchmark building a full 6-entry responsive candidate set
fn bench_responsive_set(c: &mut Criterion) {
    let provider = Provider::Cloudinary {
        cloud_name: "demo".to_string(),
    };
    let opts = TransformRequest::new().with_quality(80);

    c.bench_function("responsive_set_six_breakpoints", |b| {
        b.iter(|| {
            responsive_set_with(
                &provider,
                black_box("https://example.com/gallery/photo.jpg"),
                &opts,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_optimize_per_provider,
    bench_optimize_ineligible,
    bench_responsive_set
);
criterion_main!(benches);
