//! Deferred image loading
//!
//! A mounted [`DeferredImage`] waits for a visibility trigger (or loads
//! immediately when high-priority), rewrites its source through the URL
//! rewriter using the detected format capability, and issues the network
//! fetch out-of-band.
//!
//! State machine: `Pending → Loaded | Errored`, terminal on the first
//! outcome. A disposed instance drops late fetch completions instead of
//! transitioning, so tear-down before the fetch resolves is safe.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::fetch::{HttpImageFetcher, ImageFetcher};
use super::placeholder::{error_placeholder, shimmer_placeholder};
use super::visibility::{Subscription, VisibilityWatcher};
use crate::constants::DEFAULT_VIEWPORT_MARGIN_PX;
use crate::error::DeliveryError;
use crate::format::detect_format;
use crate::rewrite::{
    self, is_blob_uri, is_data_uri, FitMode, OutputFormat, Provider, QualityTier, SizesHint,
    TransformRequest,
};

/// Loading state of a mounted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoadState {
    /// Waiting for trigger or fetch completion
    Pending = 0,
    /// Fetch succeeded
    Loaded = 1,
    /// Fetch failed; terminal, never retried
    Errored = 2,
}

impl From<u8> for LoadState {
    fn from(value: u8) -> Self {
        match value {
            1 => LoadState::Loaded,
            2 => LoadState::Errored,
            _ => LoadState::Pending,
        }
    }
}

/// What a UI layer should render for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Placeholder graphic beneath a skeleton overlay
    Placeholder { src: String, skeleton: bool },
    /// The loaded image
    Image {
        src: String,
        srcset: Option<String>,
        sizes: String,
    },
    /// Fixed error placeholder; skeleton suppressed
    ErrorPlaceholder { src: String },
}

/// Completion callback invoked once on successful load
pub type LoadCallback = Box<dyn FnOnce() + Send>;
/// Error callback invoked once on fetch failure
pub type ErrorCallback = Box<dyn FnOnce(DeliveryError) + Send>;

/// Options for mounting a deferred image
pub struct DeferredImageOptions {
    pub source: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tier: Option<QualityTier>,
    /// Explicit output format; overrides the detected capability
    pub format: Option<OutputFormat>,
    pub fit: FitMode,
    /// Load immediately on mount, bypassing visibility observation
    pub priority: bool,
    /// Compute a responsive candidate set when no explicit width is given
    pub responsive: bool,
    /// Margin around the viewport that triggers loading
    pub margin_px: u32,
    /// Caller-supplied placeholder; defaults to the built-in shimmer
    pub placeholder: Option<String>,
    pub sizes: SizesHint,
    pub on_load: Option<LoadCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl DeferredImageOptions {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            width: None,
            height: None,
            tier: None,
            format: None,
            fit: FitMode::Cover,
            priority: false,
            responsive: false,
            margin_px: DEFAULT_VIEWPORT_MARGIN_PX,
            placeholder: None,
            sizes: SizesHint::default(),
            on_load: None,
            on_error: None,
        }
    }

    pub fn priority(mut self) -> Self {
        self.priority = true;
        self
    }

    pub fn responsive(mut self) -> Self {
        self.responsive = true;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_margin(mut self, margin_px: u32) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn on_load(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(DeliveryError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, Clone)]
struct ResolvedSource {
    src: String,
    srcset: Option<String>,
}

struct Callbacks {
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
}

/// A lazily loading image instance
///
/// Mounting requires a Tokio runtime context: the network fetch runs as a
/// spawned task so it never blocks the caller.
pub struct DeferredImage {
    state: AtomicU8,
    alive: AtomicBool,
    triggered: AtomicBool,
    source: String,
    width: Option<u32>,
    height: Option<u32>,
    tier: Option<QualityTier>,
    format: Option<OutputFormat>,
    fit: FitMode,
    responsive: bool,
    sizes: SizesHint,
    placeholder: String,
    provider: Provider,
    fetcher: Arc<dyn ImageFetcher>,
    resolved: Mutex<Option<ResolvedSource>>,
    callbacks: Mutex<Callbacks>,
    subscription: Mutex<Option<Subscription>>,
}

impl DeferredImage {
    /// Mount with the process-wide provider and the HTTP fetcher
    pub fn mount(opts: DeferredImageOptions, watcher: &dyn VisibilityWatcher) -> Arc<Self> {
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
        mut opts: DeferredImageOptions,
        watcher: &dyn VisibilityWatcher,
    ) -> Arc<Self> {
        let placeholder = opts.placeholder.take().unwrap_or_else(|| {
            shimmer_placeholder(opts.width.unwrap_or(700), opts.height.unwrap_or(475))
        });
        let priority = opts.priority;
        let margin_px = opts.margin_px;

        let image = Arc::new(Self {
            state: AtomicU8::new(LoadState::Pending as u8),
            alive: AtomicBool::new(true),
            triggered: AtomicBool::new(false),
            source: opts.source,
            width: opts.width,
            height: opts.height,
            tier: opts.tier,
            format: opts.format,
            fit: opts.fit,
            responsive: opts.responsive,
            sizes: opts.sizes,
            placeholder,
            provider,
            fetcher,
            resolved: Mutex::new(None),
            callbacks: Mutex::new(Callbacks {
                on_load: opts.on_load,
                on_error: opts.on_error,
            }),
            subscription: Mutex::new(None),
        });

        if priority {
            // High-priority images bypass visibility observation entirely
            Self::trigger(Arc::clone(&image));
        } else {
            let weak = Arc::downgrade(&image);
            let subscription = watcher.watch(
                margin_px,
                Box::new(move || {
                    if let Some(image) = weak.upgrade() {
                        DeferredImage::trigger(image);
                    }
                }),
            );
            *image.subscription.lock() = Some(subscription);
        }

        image
    }

    /// Begin loading; idempotent across duplicate visibility signals
    fn trigger(this: Arc<Self>) {
        if this.triggered.swap(true, Ordering::AcqRel) {
            return;
        }

        let resolved = this.resolve_source();
        let fetch_url = resolved.src.clone();
        *this.resolved.lock() = Some(resolved);

        tokio::spawn(async move {
            match this.fetcher.fetch(&fetch_url).await {
                Ok(_) => this.complete_load(),
                Err(e) => this.complete_error(e),
            }
        });
    }

    /// Rewrite the source with the detected capability merged in; an
    /// explicit format option wins over the detector.
    ///
    /// Data and blob URIs bypass the rewriter and load as-is.
    fn resolve_source(&self) -> ResolvedSource {
        if is_data_uri(&self.source) || is_blob_uri(&self.source) {
            return ResolvedSource {
                src: self.source.clone(),
                srcset: None,
            };
        }

        let format = self
            .format
            .unwrap_or_else(|| detect_format().output_format());
        let mut req = TransformRequest::new().with_format(format).with_fit(self.fit);
        if let Some(width) = self.width {
            req = req.with_width(width);
        }
        if let Some(height) = self.height {
            req = req.with_height(height);
        }
        if let Some(tier) = self.tier {
            req = req.with_tier(tier);
        }

        let src = rewrite::optimize_with(&self.provider, &self.source, &req);
        let srcset = (self.responsive && self.width.is_none())
            .then(|| rewrite::responsive_set_with(&self.provider, &self.source, &req));

        ResolvedSource { src, srcset }
    }

    fn complete_load(&self) {
        if self.transition(LoadState::Loaded) {
            // Take the callback out before invoking so the lock is not
            // held across caller code
            let on_load = self.callbacks.lock().on_load.take();
            if let Some(on_load) = on_load {
                on_load();
            }
        }
    }

    fn complete_error(&self, error: DeliveryError) {
        tracing::warn!(source = %self.source, error = %error, "deferred image fetch failed");
        if self.transition(LoadState::Errored) {
            let on_error = self.callbacks.lock().on_error.take();
            if let Some(on_error) = on_error {
                on_error(error);
            }
        }
    }

    /// Apply a terminal transition; refuses when disposed or already settled
    fn transition(&self, next: LoadState) -> bool {
        if !self.alive.load(Ordering::Acquire) {
            tracing::debug!(source = %self.source, "dropping completion for disposed image");
            return false;
        }
        self.state
            .compare_exchange(
                LoadState::Pending as u8,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn state(&self) -> LoadState {
        self.state.load(Ordering::Acquire).into()
    }

    /// Snapshot of what should be rendered right now
    pub fn presentation(&self) -> Presentation {
        match self.state() {
            LoadState::Pending => Presentation::Placeholder {
                src: self.placeholder.clone(),
                skeleton: true,
            },
            LoadState::Loaded => {
                let resolved = self.resolved.lock().clone().unwrap_or(ResolvedSource {
                    src: self.source.clone(),
                    srcset: None,
                });
                Presentation::Image {
                    src: resolved.src,
                    srcset: resolved.srcset,
                    sizes: rewrite::sizes_hint(&self.sizes),
                }
            }
            LoadState::Errored => Presentation::ErrorPlaceholder {
                src: error_placeholder(),
            },
        }
    }

    /// Unmount: unsubscribe from the watcher and drop late completions
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::Release);
        if let Some(mut subscription) = self.subscription.lock().take() {
            subscription.dispose();
        }
    }
}
