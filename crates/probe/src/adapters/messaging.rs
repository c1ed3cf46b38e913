//! Messaging deep-link support probe.
//! Asks the host whether the messaging app's send URL can be opened.

use crate::{CapabilityQuery, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub const WHATSAPP_SEND_URL: &str = "whatsapp://send";

/// Host hook for deep-link checks
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn can_open_url(&self, url: &str) -> Result<bool>;
}

pub struct MessagingLinkQuery {
    opener: Arc<dyn LinkOpener>,
    url: &'static str,
}

impl MessagingLinkQuery {
    pub fn new(opener: Arc<dyn LinkOpener>) -> Self {
        Self::with_url(opener, WHATSAPP_SEND_URL)
    }

    pub fn with_url(opener: Arc<dyn LinkOpener>, url: &'static str) -> Self {
        Self { opener, url }
    }
}

#[async_trait]
impl CapabilityQuery for MessagingLinkQuery {
    fn capability(&self) -> &'static str {
        "messaging deep link"
    }

    async fn query(&self) -> Result<bool> {
        let supported = self.opener.can_open_url(self.url).await?;
        info!("host reports {} openable: {}", self.url, supported);
        Ok(supported)
    }
}
