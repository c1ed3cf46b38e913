//! Platform abstraction crate.
//! Do NOT read process globals here. Ambient markers arrive through an injected
//! `RuntimeContext`, and target specifics live in the `platform-*` crates.

use thiserror::Error;

pub mod provider;
pub mod runtime;

pub use provider::{ProviderName, ProviderValue};
pub use runtime::{detect_runtime, RuntimeContext, RuntimeKind};

/// Device pixel ratio used when no live density is available
pub const FALLBACK_PIXEL_RATIO: f64 = 2.0;

/// Screen width sentinel meaning "unknown / unbounded"
pub const FALLBACK_SCREEN_WIDTH: f64 = -1.0;

/// Post tile width used outside the native runtime
pub const FALLBACK_POST_WIDTH: f64 = 128.0;

/// Horizontal margin subtracted from the screen width before splitting it into two post columns
pub const POST_MARGIN: f64 = 60.0;

/// Devices with less total memory than this are considered low-memory
pub const LOW_MEMORY_THRESHOLD_BYTES: u64 = 8 * 1024 * 1024 * 1024;

/// Platform-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown runtime kind: {0}")]
    UnknownRuntime(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Core capability trait - implemented once per target family.
///
/// Every getter is pure and infallible: when the underlying signal cannot be
/// read, the implementation answers with its documented fallback constant.
pub trait EnvironmentProvider: Send + Sync {
    /// Short implementation name, used in logs
    fn name(&self) -> &'static str;

    /// Whether this implementation targets the native mobile runtime
    fn is_native(&self) -> bool;

    /// Device pixel density
    fn pixel_ratio(&self) -> f64;

    /// Live window width in logical pixels
    fn screen_width(&self) -> f64;

    /// Width of one post tile in a two-column layout
    fn post_width(&self) -> f64;

    /// Pixel ratio to use when sizing encoded video
    fn video_pixel_ratio(&self) -> f64;

    /// Evaluate a provider by name
    fn get(&self, name: ProviderName) -> ProviderValue {
        match name {
            ProviderName::PixelRatio => ProviderValue::Number(self.pixel_ratio()),
            ProviderName::ScreenWidth => ProviderValue::Number(self.screen_width()),
            ProviderName::PostWidth => ProviderValue::Number(self.post_width()),
            ProviderName::VideoPixelRatio => ProviderValue::Number(self.video_pixel_ratio()),
            ProviderName::IsNative => ProviderValue::Flag(self.is_native()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider;

    impl EnvironmentProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn is_native(&self) -> bool {
            true
        }

        fn pixel_ratio(&self) -> f64 {
            3.0
        }

        fn screen_width(&self) -> f64 {
            400.0
        }

        fn post_width(&self) -> f64 {
            170.0
        }

        fn video_pixel_ratio(&self) -> f64 {
            1.5
        }
    }

    #[test]
    fn get_dispatches_to_matching_getter() {
        let provider = FixedProvider;
        assert_eq!(provider.get(ProviderName::PixelRatio), ProviderValue::Number(3.0));
        assert_eq!(provider.get(ProviderName::ScreenWidth), ProviderValue::Number(400.0));
        assert_eq!(provider.get(ProviderName::PostWidth), ProviderValue::Number(170.0));
        assert_eq!(provider.get(ProviderName::VideoPixelRatio), ProviderValue::Number(1.5));
        assert_eq!(provider.get(ProviderName::IsNative), ProviderValue::Flag(true));
    }

    #[test]
    fn low_memory_threshold_is_eight_gib() {
        assert_eq!(LOW_MEMORY_THRESHOLD_BYTES, 8_589_934_592);
    }
}
