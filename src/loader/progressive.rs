//! Progressive source selection
//!
//! A [`ProgressiveImage`] carries two candidate sources: a preferred
//! modern-format rendition and a fallback. On trigger it probes codec
//! support for the preferred format directly (bypassing the detector's
//! memo) and mounts the winning source through [`DeferredImage`] in
//! high-priority mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::deferred::{DeferredImage, DeferredImageOptions, LoadState, Presentation};
use super::fetch::{HttpImageFetcher, ImageFetcher};
use super::placeholder::shimmer_placeholder;
use super::visibility::{NullWatcher, Subscription, VisibilityWatcher};
use crate::format::{supports_format, FormatCapability};
use crate::rewrite::Provider;

/// Options for mounting a progressive image
///
/// `base.source` is the fallback rendition; `preferred` the modern one.
pub struct ProgressiveImageOptions {
    pub preferred: String,
    pub base: DeferredImageOptions,
}

struct PendingMount {
    preferred: String,
    base: DeferredImageOptions,
    provider: Provider,
    fetcher: Arc<dyn ImageFetcher>,
}

/// Deferred loader variant choosing between two candidate sources
pub struct ProgressiveImage {
    alive: AtomicBool,
    placeholder: String,
    pending: Mutex<Option<PendingMount>>,
    inner: Mutex<Option<Arc<DeferredImage>>>,
    subscription: Mutex<Option<Subscription>>,
}

impl ProgressiveImage {
    /// Mount with the process-wide provider and the HTTP fetcher
    pub fn mount(opts: ProgressiveImageOptions, watcher: &dyn VisibilityWatcher) -> Arc<Self> {
        Self::mount_with(
            crate::config::provider().clone(),
            Arc::new(HttpImageFetcher::new()),
            opts,
            watcher,
        )
    }

    /// Mount with an explicit provider and fetcher
    pub fn mount_with(
        provider: Provider,
        fetcher: Arc<dyn ImageFetcher>,
        opts: ProgressiveImageOptions,
        watcher: &dyn VisibilityWatcher,
    ) -> Arc<Self> {
        let base = opts.base;
        let placeholder = base.placeholder.clone().unwrap_or_else(|| {
            shimmer_placeholder(base.width.unwrap_or(700), base.height.unwrap_or(475))
        });
        let priority = base.priority;
        let margin_px = base.margin_px;

        let image = Arc::new(Self {
            alive: AtomicBool::new(true),
            placeholder,
            pending: Mutex::new(Some(PendingMount {
                preferred: opts.preferred,
                base,
                provider,
                fetcher,
            })),
            inner: Mutex::new(None),
            subscription: Mutex::new(None),
        });

        if priority {
            Self::trigger(&image);
        } else {
            let weak = Arc::downgrade(&image);
            let subscription = watcher.watch(
                margin_px,
                Box::new(move || {
                    if let Some(image) = weak.upgrade() {
                        ProgressiveImage::trigger(&image);
                    }
                }),
            );
            *image.subscription.lock() = Some(subscription);
        }

        image
    }

    /// Choose a source by direct codec probe, then delegate in priority mode
    fn trigger(this: &Arc<Self>) {
        let Some(mut pending) = this.pending.lock().take() else {
            return;
        };
        if !this.alive.load(Ordering::Acquire) {
            return;
        }

        let use_preferred = capability_for_source(&pending.preferred)
            .map(supports_format)
            .unwrap_or(false);
        if use_preferred {
            pending.base.source = pending.preferred;
        }
        pending.base.priority = true;

        let inner = DeferredImage::mount_with(
            pending.provider,
            pending.fetcher,
            pending.base,
            &NullWatcher,
        );
        *this.inner.lock() = Some(inner);
    }

    pub fn state(&self) -> LoadState {
        self.inner
            .lock()
            .as_ref()
            .map(|inner| inner.state())
            .unwrap_or(LoadState::Pending)
    }

    /// Snapshot of what should be rendered right now
    pub fn presentation(&self) -> Presentation {
        match self.inner.lock().as_ref() {
            Some(inner) => inner.presentation(),
            None => Presentation::Placeholder {
                src: self.placeholder.clone(),
                skeleton: true,
            },
        }
    }

    /// Unmount: unsubscribe and drop late completions
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::Release);
        if let Some(mut subscription) = self.subscription.lock().take() {
            subscription.dispose();
        }
        if let Some(inner) = self.inner.lock().as_ref() {
            inner.dispose();
        }
    }
}

/// Capability required to decode a source, judged by its extension
///
/// Unknown extensions yield None; the fallback is used since the point of
/// the preferred source is a format the host may not support.
fn capability_for_source(url: &str) -> Option<FormatCapability> {
    let end = url
        .find('?')
        .unwrap_or(url.len())
        .min(url.find('#').unwrap_or(url.len()));
    let (_, ext) = url[..end].rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "avif" => Some(FormatCapability::Avif),
        "webp" => Some(FormatCapability::Webp),
        "jpg" | "jpeg" | "png" | "gif" => Some(FormatCapability::Jpeg),
        _ => None,
    }
}
