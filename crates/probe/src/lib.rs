//! Capability probe layer
//! Asks the host, once, whether it can perform an external action and shares
//! that answer with every caller.

use async_trait::async_trait;
use thiserror::Error;

pub mod adapters;
pub mod cache;

pub use adapters::fallback::StaticQuery;
pub use adapters::messaging::{LinkOpener, MessagingLinkQuery, WHATSAPP_SEND_URL};
pub use cache::ProbeCache;

/// Probe-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Capability query failed: {0}")]
    QueryFailed(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

/// One asynchronous host query answering "is this capability supported?"
#[async_trait]
pub trait CapabilityQuery: Send + Sync {
    /// Capability label, used in logs
    fn capability(&self) -> &'static str;

    /// Ask the host. An unsupported capability is `Ok(false)`, not an error.
    async fn query(&self) -> Result<bool>;
}
