//! Wires the REST implementations together into the handle the host app
//! holds for its whole lifetime.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::auth::RestAuthProvider;
use crate::config::Config;
use crate::profile_cache::{MemorySlot, ProfileCache, SlotStorage};
use crate::session::SessionStore;
use crate::store::{Documents, RestBackend};

/// Shared client handle: the session store, the document-access facade and
/// the profile cache. Cheap to clone; one per process.
#[derive(Clone)]
pub struct Client {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub docs: Documents,
    pub profiles: ProfileCache,
}

impl Client {
    /// Builds the client from environment configuration and starts session
    /// resolution. Must be called from within the tokio runtime, since
    /// session resolution runs as a spawned task.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(config, Arc::new(MemorySlot::new())))
    }

    pub fn new(config: Config, profile_storage: Arc<dyn SlotStorage>) -> Self {
        let session = Arc::new(SessionStore::new(Arc::new(RestAuthProvider::new(&config))));
        session.initialize();

        let docs = Documents::new(Arc::new(RestBackend::new(&config)));
        info!("client initialized for project {}", config.project_id);

        Client {
            config,
            session,
            docs,
            profiles: ProfileCache::new(profile_storage),
        }
    }
}
