use crate::{EngineError, Result};
use platform::{RuntimeContext, POST_MARGIN};
use platform_native::PixelRatioPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "WEBCARD_CONFIG";
pub const POST_MARGIN_VAR: &str = "WEBCARD_POST_MARGIN";
pub const LOW_MEMORY_DOWNGRADE_VAR: &str = "WEBCARD_LOW_MEMORY_DOWNGRADE";
pub const MEMORY_THRESHOLD_VAR: &str = "WEBCARD_MEMORY_THRESHOLD_BYTES";
pub const MESSAGING_PROBE_VAR: &str = "WEBCARD_MESSAGING_PROBE";

pub const DOM_PRESENT_VAR: &str = "WEBCARD_DOM_PRESENT";
pub const NAVIGATOR_PRODUCT_VAR: &str = "WEBCARD_NAVIGATOR_PRODUCT";
pub const TEST_HARNESS_VAR: &str = "WEBCARD_TEST_HARNESS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub post_margin: f64,
    pub pixel_ratio_policy: PixelRatioPolicy,
    /// Ask the host about messaging deep links; when off the probe answers `false`
    pub messaging_probe_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            post_margin: POST_MARGIN,
            pixel_ratio_policy: PixelRatioPolicy::default(),
            messaging_probe_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Load from `WEBCARD_CONFIG` (if set) and apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match non_blank(lookup(CONFIG_PATH_VAR)) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            EngineError::Config(format!("invalid config in {}: {e}", path.display()))
        })?;
        config.validate()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| EngineError::Config(format!("invalid config: {e}")))?;
        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if !self.post_margin.is_finite() {
            return Err(EngineError::Config(format!(
                "post_margin must be finite, got {}",
                self.post_margin
            )));
        }
        Ok(self)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = non_blank(lookup(POST_MARGIN_VAR)) {
            let margin: f64 = raw
                .parse()
                .map_err(|e| invalid_override(POST_MARGIN_VAR, &raw, e))?;
            if !margin.is_finite() {
                return Err(invalid_override(POST_MARGIN_VAR, &raw, "expected a finite number"));
            }
            self.post_margin = margin;
        }
        if let Some(raw) = non_blank(lookup(LOW_MEMORY_DOWNGRADE_VAR)) {
            self.pixel_ratio_policy.downgrade_low_memory = parse_flag(&raw)
                .ok_or_else(|| invalid_override(LOW_MEMORY_DOWNGRADE_VAR, &raw, "expected a boolean"))?;
        }
        if let Some(raw) = non_blank(lookup(MEMORY_THRESHOLD_VAR)) {
            self.pixel_ratio_policy.memory_threshold_bytes = raw
                .parse()
                .map_err(|e| invalid_override(MEMORY_THRESHOLD_VAR, &raw, e))?;
        }
        if let Some(raw) = non_blank(lookup(MESSAGING_PROBE_VAR)) {
            self.messaging_probe_enabled = parse_flag(&raw)
                .ok_or_else(|| invalid_override(MESSAGING_PROBE_VAR, &raw, "expected a boolean"))?;
        }
        Ok(())
    }
}

/// Build the runtime context from process environment markers
pub fn context_from_env() -> RuntimeContext {
    context_from_lookup(|key| std::env::var(key).ok())
}

/// Unreadable or malformed markers count as absent
pub fn context_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RuntimeContext {
    let flag = |key: &str| {
        non_blank(lookup(key))
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(false)
    };

    let mut ctx = RuntimeContext::new()
        .with_dom_document(flag(DOM_PRESENT_VAR))
        .with_test_harness(flag(TEST_HARNESS_VAR));
    if let Some(product) = non_blank(lookup(NAVIGATOR_PRODUCT_VAR)) {
        ctx = ctx.with_navigator_product(product);
    }
    ctx
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_override(var: &str, raw: &str, reason: impl std::fmt::Display) -> EngineError {
    EngineError::Config(format!("invalid {var}={raw:?}: {reason}"))
}
