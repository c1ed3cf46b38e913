//! Fixed-answer query for hosts where no capability check is possible.
//! Answers without touching the host so the cache stays usable on every target.

use crate::{CapabilityQuery, Result};
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct StaticQuery {
    capability: &'static str,
    answer: bool,
}

impl StaticQuery {
    pub fn new(capability: &'static str, answer: bool) -> Self {
        debug!("Using static answer {} for {} probe", answer, capability);
        Self { capability, answer }
    }

    pub fn unsupported(capability: &'static str) -> Self {
        Self::new(capability, false)
    }
}

#[async_trait]
impl CapabilityQuery for StaticQuery {
    fn capability(&self) -> &'static str {
        self.capability
    }

    async fn query(&self) -> Result<bool> {
        Ok(self.answer)
    }
}
