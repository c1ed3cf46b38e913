use platform::{EnvironmentProvider, ProviderName, ProviderValue, Result, RuntimeKind};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Every provider evaluated once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSnapshot {
    pub runtime: RuntimeKind,
    pub implementation: &'static str,
    pub values: BTreeMap<ProviderName, ProviderValue>,
}

/// Name-based lookup over the provider chosen for this runtime.
///
/// Every `ProviderName` resolves through `EnvironmentProvider::get`; there is
/// no missing-provider state.
pub struct ProviderRegistry {
    runtime: RuntimeKind,
    provider: Box<dyn EnvironmentProvider>,
}

impl ProviderRegistry {
    pub fn new(runtime: RuntimeKind, provider: Box<dyn EnvironmentProvider>) -> Self {
        Self { runtime, provider }
    }

    pub fn runtime(&self) -> RuntimeKind {
        self.runtime
    }

    pub fn names(&self) -> impl Iterator<Item = ProviderName> {
        ProviderName::ALL.into_iter()
    }

    pub fn get(&self, name: ProviderName) -> ProviderValue {
        self.provider.get(name)
    }

    /// Look a provider up by its camelCase name
    pub fn get_named(&self, name: &str) -> Result<ProviderValue> {
        let name: ProviderName = name.parse()?;
        Ok(self.get(name))
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.provider.pixel_ratio()
    }

    pub fn screen_width(&self) -> f64 {
        self.provider.screen_width()
    }

    pub fn post_width(&self) -> f64 {
        self.provider.post_width()
    }

    pub fn video_pixel_ratio(&self) -> f64 {
        self.provider.video_pixel_ratio()
    }

    pub fn is_native(&self) -> bool {
        self.provider.is_native()
    }

    pub fn snapshot(&self) -> ProviderSnapshot {
        let values = self.names().map(|name| (name, self.get(name))).collect();
        debug!("snapshot taken from {} provider", self.provider.name());
        ProviderSnapshot {
            runtime: self.runtime,
            implementation: self.provider.name(),
            values,
        }
    }
}
