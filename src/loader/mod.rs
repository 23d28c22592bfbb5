//! Deferred image loading module
//!
//! Provides viewport-aware lazy loading on top of the URL rewriter:
//! - [`DeferredImage`]: loads when its target nears the viewport, or
//!   immediately when marked high-priority
//! - [`ProgressiveImage`]: picks between a preferred modern-format source
//!   and a fallback by probing codec support
//! - [`VisibilityWatcher`]: the host-supplied intersection signal, with
//!   trigger-once semantics and an explicit unsubscribe contract
//! - [`ImageFetcher`]: the async transport behind the out-of-band fetch
//!
//! Execution is event-driven: the only suspension points are the
//! visibility callback and the fetch completion. No retries, timeouts, or
//! backpressure; a failed fetch is terminal for its instance.

pub mod deferred;
pub mod fetch;
pub mod placeholder;
pub mod progressive;
pub mod visibility;

// Re-export commonly used types
pub use deferred::{
    DeferredImage, DeferredImageOptions, ErrorCallback, LoadCallback, LoadState, Presentation,
};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use placeholder::{error_placeholder, shimmer_placeholder};
pub use progressive::{ProgressiveImage, ProgressiveImageOptions};
pub use visibility::{
    ManualWatcher, NullWatcher, Subscription, VisibilityCallback, VisibilityWatcher,
};
