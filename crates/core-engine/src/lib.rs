//! Composition root: picks the environment provider and capability probes for
//! the detected runtime and hands them out as one `Environment`.

use platform::{detect_runtime, EnvironmentProvider, RuntimeContext, RuntimeKind};
use platform_fallback::FallbackProvider;
use platform_native::{DeviceMetrics, NativeProvider, OsFamily, UnavailableMetrics};
use probe::{CapabilityQuery, LinkOpener, MessagingLinkQuery, ProbeCache, StaticQuery};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod logging;
pub mod registry;

pub use config::EngineConfig;
pub use registry::{ProviderRegistry, ProviderSnapshot};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(#[from] platform::PlatformError),

    #[error("Probe error: {0}")]
    Probe(#[from] probe::ProbeError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

const MESSAGING_CAPABILITY: &str = "messaging deep link";

/// Host-side hooks available to the composition root
#[derive(Clone, Default)]
pub struct HostBindings {
    pub device: Option<Arc<dyn DeviceMetrics>>,
    pub link_opener: Option<Arc<dyn LinkOpener>>,
}

impl HostBindings {
    pub fn with_device(mut self, device: Arc<dyn DeviceMetrics>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_link_opener(mut self, opener: Arc<dyn LinkOpener>) -> Self {
        self.link_opener = Some(opener);
        self
    }
}

/// Everything shared UI code needs to size itself, for one runtime
pub struct Environment {
    registry: ProviderRegistry,
    messaging: ProbeCache,
}

impl Environment {
    pub fn runtime(&self) -> RuntimeKind {
        self.registry.runtime()
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Memoized messaging deep-link check
    pub fn messaging_probe(&self) -> &ProbeCache {
        &self.messaging
    }

    pub async fn is_messaging_supported(&self) -> Result<bool> {
        Ok(self.messaging.is_supported().await?)
    }
}

/// Select providers for the runtime described by `ctx`
pub fn compose(ctx: &RuntimeContext, config: &EngineConfig, host: HostBindings) -> Environment {
    let runtime = detect_runtime(ctx);
    let provider = select_provider(runtime, ctx, config, host.device);
    info!(
        "Composed {} environment using {} provider",
        runtime,
        provider.name()
    );

    let query = select_messaging_query(runtime, config, host.link_opener);
    Environment {
        registry: ProviderRegistry::new(runtime, provider),
        messaging: ProbeCache::new(query),
    }
}

fn select_provider(
    runtime: RuntimeKind,
    ctx: &RuntimeContext,
    config: &EngineConfig,
    device: Option<Arc<dyn DeviceMetrics>>,
) -> Box<dyn EnvironmentProvider> {
    match runtime {
        RuntimeKind::Native => {
            let metrics = device.unwrap_or_else(|| {
                warn!("native runtime without device metrics, providers will fall back");
                Arc::new(UnavailableMetrics {
                    os_family: OsFamily::Ios,
                })
            });
            Box::new(
                NativeProvider::new(metrics, ctx)
                    .with_policy(config.pixel_ratio_policy)
                    .with_post_margin(config.post_margin),
            )
        }
        RuntimeKind::Web | RuntimeKind::Server => Box::new(FallbackProvider::new(runtime)),
    }
}

fn select_messaging_query(
    runtime: RuntimeKind,
    config: &EngineConfig,
    opener: Option<Arc<dyn LinkOpener>>,
) -> Arc<dyn CapabilityQuery> {
    match (runtime, opener) {
        (RuntimeKind::Native, Some(opener)) if config.messaging_probe_enabled => {
            Arc::new(MessagingLinkQuery::new(opener))
        }
        _ => Arc::new(StaticQuery::unsupported(MESSAGING_CAPABILITY)),
    }
}

#[cfg(test)]
mod tests;
