// Deferred loader tests against the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use suzume::error::DeliveryError;
use suzume::loader::{
    DeferredImage, DeferredImageOptions, ImageFetcher, LoadState, ManualWatcher, Presentation,
    ProgressiveImage, ProgressiveImageOptions,
};
use suzume::rewrite::Provider;

struct StubFetcher {
    fail: bool,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        if self.fail {
            Err(DeliveryError::fetch_failed(url, "stub failure"))
        } else {
            Ok(Bytes::from_static(b"\xff\xd8\xff"))
        }
    }
}

fn on_load_channel(
    opts: DeferredImageOptions,
) -> (DeferredImageOptions, tokio::sync::oneshot::Receiver<()>) {
    let (tx, rx) = tokio::sync::oneshot::channel();
    (
        opts.on_load(move || {
            let _ = tx.send(());
        }),
        rx,
    )
}

#[tokio::test]
async fn priority_image_loads_immediately() {
    let watcher = ManualWatcher::new();
    let fetcher = StubFetcher::ok();
    let (opts, loaded) = on_load_channel(DeferredImageOptions::new("photo.jpg").priority());

    let image =
        DeferredImage::mount_with(Provider::Generic, Arc::clone(&fetcher) as Arc<dyn ImageFetcher>, opts, &watcher);

    loaded.await.unwrap();
    assert_eq!(image.state(), LoadState::Loaded);
    assert_eq!(watcher.pending_count(), 0);
}

#[tokio::test]
async fn non_priority_image_waits_for_visibility() {
    let watcher = ManualWatcher::new();
    let fetcher = StubFetcher::ok();
    let (opts, loaded) = on_load_channel(DeferredImageOptions::new("photo.jpg"));

    let image =
        DeferredImage::mount_with(Provider::Generic, Arc::clone(&fetcher) as Arc<dyn ImageFetcher>, opts, &watcher);

    assert_eq!(image.state(), LoadState::Pending);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    watcher.fire_all();
    loaded.await.unwrap();
    assert_eq!(image.state(), LoadState::Loaded);
}

#[tokio::test]
async fn failed_fetch_renders_error_placeholder_without_skeleton() {
    let watcher = ManualWatcher::new();
    let fetcher = StubFetcher::failing();
    let (tx, errored) = tokio::sync::oneshot::channel();

    let opts = DeferredImageOptions::new("photo.jpg")
        .priority()
        .on_error(move |e| {
            let _ = tx.send(e);
        });
    let image = DeferredImage::mount_with(Provider::Generic, fetcher, opts, &watcher);

    errored.await.unwrap();
    assert_eq!(image.state(), LoadState::Errored);
    match image.presentation() {
        Presentation::ErrorPlaceholder { src } => {
            assert!(src.starts_with("data:image/svg+xml;base64,"));
        }
        other => panic!("expected error placeholder, got {:?}", other),
    }
}

#[tokio::test]
async fn loaded_image_carries_rewritten_url() {
    let watcher = ManualWatcher::new();
    let fetcher = StubFetcher::ok();
    let (opts, loaded) = on_load_channel(
        DeferredImageOptions::new("photo.jpg")
            .priority()
            .with_width(640),
    );

    let image =
        DeferredImage::mount_with(Provider::Generic, Arc::clone(&fetcher) as Arc<dyn ImageFetcher>, opts, &watcher);

    loaded.await.unwrap();
    match image.presentation() {
        Presentation::Image { src, .. } => {
            assert!(src.starts_with("photo.jpg?"));
            assert!(src.contains("w=640"));
        }
        other => panic!("expected image, got {:?}", other),
    }
    assert_eq!(fetcher.urls.lock()[0], image_src(&image));
}

fn image_src(image: &DeferredImage) -> String {
    match image.presentation() {
        Presentation::Image { src, .. } => src,
        other => panic!("expected image, got {:?}", other),
    }
}

#[tokio::test]
async fn progressive_image_delegates_after_visibility() {
    let watcher = ManualWatcher::new();
    let fetcher = StubFetcher::ok();

    let opts = ProgressiveImageOptions {
        preferred: "hero.jpeg".to_string(),
        base: DeferredImageOptions::new("hero.png"),
    };
    let image =
        ProgressiveImage::mount_with(Provider::Generic, Arc::clone(&fetcher) as Arc<dyn ImageFetcher>, opts, &watcher);

    assert_eq!(image.state(), LoadState::Pending);
    watcher.fire_all();
    tokio::task::yield_now().await;

    // JPEG support is universal, so the preferred source is fetched
    let urls = fetcher.urls.lock();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("hero.jpeg"));
}
