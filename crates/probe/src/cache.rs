use crate::{CapabilityQuery, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

type PendingProbe = Shared<BoxFuture<'static, Result<bool>>>;

#[derive(Default)]
struct Slot {
    generation: u64,
    probe: Option<PendingProbe>,
}

/// Memoized capability probe.
///
/// The first call starts the host query and stores the shared future itself,
/// so callers arriving before it settles join the same attempt. A successful
/// answer is kept for the life of the cache; a failed attempt is handed to
/// everyone who joined it and then dropped, so the next call asks again.
pub struct ProbeCache {
    query: Arc<dyn CapabilityQuery>,
    slot: Mutex<Slot>,
}

impl ProbeCache {
    pub fn new(query: Arc<dyn CapabilityQuery>) -> Self {
        Self {
            query,
            slot: Mutex::new(Slot::default()),
        }
    }

    pub fn capability(&self) -> &'static str {
        self.query.capability()
    }

    pub async fn is_supported(&self) -> Result<bool> {
        let (generation, probe) = {
            let mut slot = self.slot.lock().await;
            match &slot.probe {
                Some(probe) => {
                    debug!("{} probe already issued, joining it", self.capability());
                    (slot.generation, probe.clone())
                }
                None => {
                    debug!("issuing {} probe", self.capability());
                    let query = Arc::clone(&self.query);
                    let probe = async move { query.query().await }.boxed().shared();
                    slot.generation += 1;
                    slot.probe = Some(probe.clone());
                    (slot.generation, probe)
                }
            }
        };

        let outcome = probe.await;
        if let Err(e) = &outcome {
            if self.evict_failed(generation).await {
                warn!("{} probe failed, will retry on next call: {}", self.capability(), e);
            }
        }
        outcome
    }

    /// Clear a failed attempt. Only the first waiter of that attempt gets `true`.
    async fn evict_failed(&self, generation: u64) -> bool {
        let mut slot = self.slot.lock().await;
        // a newer attempt may already be in flight
        if slot.generation == generation && slot.probe.is_some() {
            slot.probe = None;
            return true;
        }
        false
    }

    /// Forget any cached or in-flight answer
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.probe = None;
        slot.generation += 1;
    }
}
