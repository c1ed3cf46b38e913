//! Fallback environment provider for web and server targets.
//! Answers every query with a fixed constant so shared sizing code never
//! touches native-only APIs.

use platform::{
    EnvironmentProvider, RuntimeKind, FALLBACK_PIXEL_RATIO, FALLBACK_POST_WIDTH,
    FALLBACK_SCREEN_WIDTH,
};
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct FallbackProvider {
    runtime: RuntimeKind,
}

impl FallbackProvider {
    pub fn new(runtime: RuntimeKind) -> Self {
        info!("Initializing fallback environment provider for {} runtime", runtime);
        Self { runtime }
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::new(RuntimeKind::Server)
    }
}

impl EnvironmentProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        match self.runtime {
            RuntimeKind::Web => "web",
            _ => "server",
        }
    }

    fn is_native(&self) -> bool {
        false
    }

    fn pixel_ratio(&self) -> f64 {
        FALLBACK_PIXEL_RATIO
    }

    fn screen_width(&self) -> f64 {
        FALLBACK_SCREEN_WIDTH
    }

    fn post_width(&self) -> f64 {
        FALLBACK_POST_WIDTH
    }

    fn video_pixel_ratio(&self) -> f64 {
        self.pixel_ratio()
    }
}
