//! Native mobile environment provider.
//! Reads live device metrics through a host-supplied `DeviceMetrics` source.

use platform::{
    EnvironmentProvider, RuntimeContext, FALLBACK_PIXEL_RATIO, FALLBACK_POST_WIDTH,
    FALLBACK_SCREEN_WIDTH, LOW_MEMORY_THRESHOLD_BYTES, POST_MARGIN,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Native platform family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Ios,
    Android,
}

/// Live device readings supplied by the host.
///
/// Any reading may be unavailable; `None` makes the provider fall back.
pub trait DeviceMetrics: Send + Sync {
    fn pixel_ratio(&self) -> Option<f64>;

    fn window_width(&self) -> Option<f64>;

    fn total_memory_bytes(&self) -> Option<u64>;

    fn os_family(&self) -> OsFamily;
}

/// Metrics source for hosts that cannot read the device at all
#[derive(Debug, Clone, Copy)]
pub struct UnavailableMetrics {
    pub os_family: OsFamily,
}

impl DeviceMetrics for UnavailableMetrics {
    fn pixel_ratio(&self) -> Option<f64> {
        None
    }

    fn window_width(&self) -> Option<f64> {
        None
    }

    fn total_memory_bytes(&self) -> Option<u64> {
        None
    }

    fn os_family(&self) -> OsFamily {
        self.os_family
    }
}

/// Low-memory pixel ratio downgrade settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelRatioPolicy {
    /// Downgrade to 1x on low-memory devices while under the test harness
    pub downgrade_low_memory: bool,
    pub memory_threshold_bytes: u64,
}

impl Default for PixelRatioPolicy {
    fn default() -> Self {
        Self {
            downgrade_low_memory: true,
            memory_threshold_bytes: LOW_MEMORY_THRESHOLD_BYTES,
        }
    }
}

pub struct NativeProvider {
    metrics: Arc<dyn DeviceMetrics>,
    under_test_harness: bool,
    policy: PixelRatioPolicy,
    post_margin: f64,
}

impl NativeProvider {
    pub fn new(metrics: Arc<dyn DeviceMetrics>, ctx: &RuntimeContext) -> Self {
        Self {
            metrics,
            under_test_harness: ctx.under_test_harness,
            policy: PixelRatioPolicy::default(),
            post_margin: POST_MARGIN,
        }
    }

    pub fn with_policy(mut self, policy: PixelRatioPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_post_margin(mut self, post_margin: f64) -> Self {
        self.post_margin = post_margin;
        self
    }

    fn live_pixel_ratio(&self) -> f64 {
        match self.metrics.pixel_ratio() {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            other => {
                debug!("unreadable pixel ratio {:?}, using fallback", other);
                FALLBACK_PIXEL_RATIO
            }
        }
    }

    fn live_width(&self) -> Option<f64> {
        self.metrics
            .window_width()
            .filter(|width| width.is_finite() && *width > 0.0)
    }

    fn should_downgrade(&self) -> bool {
        if !self.policy.downgrade_low_memory || !self.under_test_harness {
            return false;
        }
        // unknown memory never downgrades
        self.metrics
            .total_memory_bytes()
            .is_some_and(|total| total < self.policy.memory_threshold_bytes)
    }
}

impl EnvironmentProvider for NativeProvider {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_native(&self) -> bool {
        true
    }

    fn pixel_ratio(&self) -> f64 {
        if self.should_downgrade() {
            return 1.0;
        }
        self.live_pixel_ratio()
    }

    fn screen_width(&self) -> f64 {
        self.live_width().unwrap_or_else(|| {
            debug!("unreadable window width, using sentinel");
            FALLBACK_SCREEN_WIDTH
        })
    }

    fn post_width(&self) -> f64 {
        self.live_width()
            .map(|width| (width - self.post_margin) / 2.0)
            .filter(|post| post.is_finite())
            .unwrap_or(FALLBACK_POST_WIDTH)
    }

    fn video_pixel_ratio(&self) -> f64 {
        // android encoders choke on full-density frames
        match self.metrics.os_family() {
            OsFamily::Android => self.pixel_ratio() / 2.0,
            OsFamily::Ios => self.pixel_ratio(),
        }
    }
}
