//! Cached agent identity.
//!
//! The caller's own agent id is derived from the profile endpoint and memoized for the lifetime
//! of the client. Reads never block on the network once populated; a first-use race is
//! collapsed behind an in-flight guard so only one profile lookup is issued. Clearing the cache
//! while a lookup is in flight discards that lookup's result.

use crate::error::{ApiClientError, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::future::Future;

#[derive(Debug, Default)]
struct Slot {
    id: Option<String>,
    /// Bumped on every clear.
    generation: u64,
}

#[derive(Debug, Default)]
pub(crate) struct AgentIdCache {
    slot: RwLock<Slot>,
    fetch_guard: tokio::sync::Mutex<()>,
}

impl AgentIdCache {
    pub(crate) fn get(&self) -> Option<String> {
        self.slot.read().id.clone()
    }

    pub(crate) fn clear(&self) {
        let mut slot = self.slot.write();
        slot.id = None;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Return the cached id, or run `fetch` once and store its result.
    ///
    /// A failed fetch leaves the cache empty so a later call retries.
    pub(crate) async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if let Some(id) = self.get() {
            return Ok(id);
        }

        let _in_flight = self.fetch_guard.lock().await;
        let generation = {
            let slot = self.slot.read();
            if let Some(id) = &slot.id {
                return Ok(id.clone());
            }
            slot.generation
        };

        let id = fetch().await?;
        let mut slot = self.slot.write();
        if slot.generation == generation {
            slot.id = Some(id.clone());
        }
        Ok(id)
    }
}

/// Extract the agent id from a `/me` profile: `agentId`, falling back to `id`. Numeric ids are
/// accepted and rendered in decimal.
pub(crate) fn agent_id_from_profile(profile: &Value) -> Result<String> {
    ["agentId", "id"]
        .iter()
        .find_map(|field| match profile.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .ok_or_else(|| {
            ApiClientError::Decode(
                "profile response has neither 'agentId' nor 'id'".to_string(),
            )
        })
}
