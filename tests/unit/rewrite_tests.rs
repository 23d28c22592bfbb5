// URL rewriter tests against the public API

use rstest::rstest;
use suzume::constants::BREAKPOINT_LADDER;
use suzume::format::detect_format;
use suzume::rewrite::{
    optimize_with, responsive_set_with, sizes_hint, OutputFormat, Provider, QualityTier, SizesHint,
    TransformRequest,
};

fn cloudinary() -> Provider {
    Provider::Cloudinary {
        cloud_name: "demo".to_string(),
    }
}

fn imagekit() -> Provider {
    Provider::ImageKit {
        id: "acme".to_string(),
    }
}

fn vercel() -> Provider {
    Provider::Vercel {
        host: "example.com".to_string(),
    }
}

#[rstest]
#[case::cloudinary(cloudinary())]
#[case::imagekit(imagekit())]
#[case::vercel(vercel())]
#[case::generic(Provider::Generic)]
fn data_and_blob_uris_pass_through_every_provider(#[case] provider: Provider) {
    let opts = TransformRequest::new().with_width(800);
    for uri in [
        "data:image/png;base64,iVBORw0KGgo=",
        "blob:https://example.com/4b3a2c1d",
    ] {
        assert_eq!(optimize_with(&provider, uri, &opts), uri);
    }
}

#[rstest]
#[case("https://example.com/report.pdf")]
#[case("https://example.com/video.mp4")]
#[case("https://example.com/page")]
#[case("https://example.com/style.css")]
fn non_image_urls_pass_through(#[case] url: &str) {
    assert_eq!(
        optimize_with(&cloudinary(), url, &TransformRequest::new()),
        url
    );
}

#[rstest]
#[case("https://example.com/photo.jpg?w=800")]
#[case("https://example.com/photo.jpg?quality=80")]
#[case("https://res.cloudinary.com/demo/image/upload/photo.jpg")]
#[case("https://ik.imagekit.io/acme/photo.jpg")]
fn already_optimized_urls_pass_through(#[case] url: &str) {
    assert_eq!(
        optimize_with(&Provider::Generic, url, &TransformRequest::new()),
        url
    );
}

#[test]
fn generic_provider_appends_width_and_quality() {
    let url = optimize_with(
        &Provider::Generic,
        "photo.jpg",
        &TransformRequest::new().with_width(800),
    );
    assert_eq!(url, "photo.jpg?w=800&q=75");
}

#[test]
fn rewritten_output_is_stable_under_reoptimization() {
    let opts = TransformRequest::new().with_width(800);
    let once = optimize_with(&Provider::Generic, "photo.jpg", &opts);
    let twice = optimize_with(&Provider::Generic, &once, &opts);
    assert_eq!(once, twice);
}

#[test]
fn cloudinary_fetch_url_for_absolute_source() {
    let url = optimize_with(
        &cloudinary(),
        "https://example.com/photo.jpg",
        &TransformRequest::new()
            .with_width(640)
            .with_tier(QualityTier::High),
    );
    assert!(url.starts_with("https://res.cloudinary.com/demo/image/fetch/"));
    assert!(url.contains("w_640"));
    assert!(url.contains("q_90"));
    assert!(url.contains("https%3A%2F%2Fexample.com%2Fphoto.jpg"));
}

#[test]
fn imagekit_url_for_hosted_asset() {
    let url = optimize_with(
        &imagekit(),
        "/gallery/photo.jpg",
        &TransformRequest::new().with_width(320),
    );
    assert_eq!(url, "https://ik.imagekit.io/acme/tr:w-320,f-auto/gallery/photo.jpg");
}

#[test]
fn vercel_url_encodes_source_as_sub_parameter() {
    let url = optimize_with(
        &vercel(),
        "https://cdn.example.com/photo.jpg",
        &TransformRequest::new().with_width(1024).with_quality(60),
    );
    assert_eq!(
        url,
        "https://example.com/_next/image?url=https%3A%2F%2Fcdn.example.com%2Fphoto.jpg&w=1024&q=60"
    );
}

#[test]
fn explicit_format_overrides_auto_negotiation() {
    let url = optimize_with(
        &cloudinary(),
        "photo.jpg",
        &TransformRequest::new().with_format(OutputFormat::Png),
    );
    assert!(url.contains("f_png"));
    assert!(!url.contains("f_auto"));
}

#[rstest]
#[case::cloudinary(cloudinary())]
#[case::imagekit(imagekit())]
#[case::vercel(vercel())]
#[case::generic(Provider::Generic)]
fn responsive_set_walks_the_ladder(#[case] provider: Provider) {
    let set = responsive_set_with(
        &provider,
        "https://example.com/photo.jpg",
        &TransformRequest::new(),
    );
    let entries: Vec<&str> = set.split(", ").collect();
    assert_eq!(entries.len(), 6);
    for (entry, width) in entries.iter().zip(BREAKPOINT_LADDER) {
        assert!(entry.ends_with(&format!(" {}w", width)));
    }
}

#[test]
fn responsive_set_empty_for_ineligible_url() {
    assert_eq!(
        responsive_set_with(
            &Provider::Generic,
            "data:image/png;base64,AAAA",
            &TransformRequest::new()
        ),
        ""
    );
}

#[test]
fn default_sizes_hint_matches_three_tier_contract() {
    assert_eq!(
        sizes_hint(&SizesHint::default()),
        "(max-width: 768px) 100vw, (max-width: 1024px) 50vw, 33vw"
    );
}

#[test]
fn format_detection_is_stable_across_calls() {
    assert_eq!(detect_format(), detect_format());
}
