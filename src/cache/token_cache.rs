use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::token::{CachedToken, EnvironmentMode};

/// Single-slot token cache shared by every invocation of one process.
///
/// Cloning hands out another handle to the same slot. The orchestrator is the
/// only writer; it overwrites the slot after a fresh token was issued. Nothing
/// here expires or invalidates the token.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
    production: Arc<AtomicBool>,
}

impl TokenCache {
    pub fn new(mode: EnvironmentMode) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            production: Arc::new(AtomicBool::new(mode.is_production())),
        }
    }

    /// Current token value, if any
    pub async fn get(&self) -> Option<String> {
        self.slot.read().await.as_ref().map(|token| token.value.to_owned())
    }

    pub async fn get_entry(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }

    /// Unconditional overwrite
    pub async fn set(&self, token: impl Into<String>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedToken::new(token.into()));
    }

    pub fn is_production(&self) -> bool {
        self.production.load(Ordering::Relaxed)
    }

    pub fn set_environment(&self, mode: EnvironmentMode) {
        self.production.store(mode.is_production(), Ordering::Relaxed);
    }
}
