//! Runtime detection from injected ambient markers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PlatformError;

/// Navigator product string reported by the native mobile runtime
pub const MOBILE_NAVIGATOR_PRODUCT: &str = "ReactNative";

/// Coarse execution context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    Native,
    Web,
    Server,
}

impl RuntimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeKind::Native => "native",
            RuntimeKind::Web => "web",
            RuntimeKind::Server => "server",
        }
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeKind {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(RuntimeKind::Native),
            "web" => Ok(RuntimeKind::Web),
            "server" => Ok(RuntimeKind::Server),
            other => Err(PlatformError::UnknownRuntime(other.to_string())),
        }
    }
}

/// Ambient markers captured by the host at process or request start.
///
/// Absent markers are simply `false` / `None`; nothing here can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeContext {
    /// A browser document object is reachable
    pub dom_document: bool,
    /// Navigator product string, if a navigator exists at all
    pub navigator_product: Option<String>,
    /// Process is running under the end-to-end test harness
    pub under_test_harness: bool,
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dom_document(mut self, present: bool) -> Self {
        self.dom_document = present;
        self
    }

    pub fn with_navigator_product(mut self, product: impl Into<String>) -> Self {
        self.navigator_product = Some(product.into());
        self
    }

    pub fn with_test_harness(mut self, under_test_harness: bool) -> Self {
        self.under_test_harness = under_test_harness;
        self
    }

    fn has_mobile_navigator(&self) -> bool {
        self.navigator_product
            .as_deref()
            .map(str::trim)
            .is_some_and(|product| product == MOBILE_NAVIGATOR_PRODUCT)
    }
}

/// Resolve the runtime kind. DOM presence wins over the navigator marker.
pub fn detect_runtime(ctx: &RuntimeContext) -> RuntimeKind {
    if ctx.dom_document {
        RuntimeKind::Web
    } else if ctx.has_mobile_navigator() {
        RuntimeKind::Native
    } else {
        RuntimeKind::Server
    }
}
