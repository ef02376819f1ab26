//! Cookie-backed profile cache.
//!
//! One named slot holding the last-used contact profile as JSON, used only
//! to pre-fill forms. It is never a source of truth: entries expire after
//! a year, and anything expired or unparseable reads as absent (and gets
//! cleared so it is not re-parsed forever).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ResumeProfile;

pub const PROFILE_SLOT: &str = "hirefolio_profile";
const EXPIRY_DAYS: i64 = 365;

/// Single-slot string storage. The host app backs this with the browser's
/// cookie jar; [`MemorySlot`] serves tests and non-browser hosts.
pub trait SlotStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn clear(&self, key: &str);
}

/// In-memory [`SlotStorage`].
#[derive(Default)]
pub struct MemorySlot {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlot {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn clear(&self, key: &str) {
        self.slots.lock().unwrap().remove(key);
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedProfile {
    profile: ResumeProfile,
    stored_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProfileCache {
    storage: Arc<dyn SlotStorage>,
}

impl ProfileCache {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        ProfileCache { storage }
    }

    /// Returns the cached profile if present, parseable and younger than a
    /// year; anything else reads as absent.
    pub fn get(&self) -> Option<ResumeProfile> {
        let raw = self.storage.read(PROFILE_SLOT)?;
        let cached: CachedProfile = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(e) => {
                debug!("clearing unparseable profile cache slot: {e}");
                self.storage.clear(PROFILE_SLOT);
                return None;
            }
        };
        if Utc::now() - cached.stored_at > Duration::days(EXPIRY_DAYS) {
            debug!("clearing expired profile cache slot");
            self.storage.clear(PROFILE_SLOT);
            return None;
        }
        Some(cached.profile)
    }

    pub fn set(&self, profile: &ResumeProfile) {
        let cached = CachedProfile {
            profile: profile.clone(),
            stored_at: Utc::now(),
        };
        match serde_json::to_string(&cached) {
            Ok(raw) => self.storage.write(PROFILE_SLOT, &raw),
            Err(e) => debug!("failed to serialize profile for caching: {e}"),
        }
    }

    pub fn clear(&self) {
        self.storage.clear(PROFILE_SLOT);
    }
}
