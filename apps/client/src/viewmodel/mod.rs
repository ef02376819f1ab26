//! Per-page view-model adapters.
//!
//! Every page follows the same pattern: subscribe to the session store,
//! wait for a resolved identity (or show "please sign in"), issue the
//! page's scoped query, hold results for the lifetime of the view, and
//! re-run the query when the identity changes. Failed queries are never
//! retried here; surfacing a retry action is the presentation layer's job.

pub mod applications;
pub mod jobs;
pub mod resumes;
pub mod saved_jobs;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::errors::{ClientError, ErrorKind};
use crate::models::Identity;
use crate::session::SessionState;
use crate::store::Documents;

/// Render state of a page. `Loaded` with empty data, `Loading` and `Failed`
/// are three distinct situations and must render distinctly.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Session resolution still pending.
    Unresolved,
    /// No identity; terminal until a sign-in happens.
    SignedOut,
    /// Query in flight.
    Loading,
    Loaded(T),
    Failed(ErrorKind),
}

impl<T> ViewState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// The one query a page issues once its identity is known.
#[async_trait]
pub trait PageQuery: Send + Sync + 'static {
    type Output: Clone + PartialEq + Send + Sync + 'static;

    async fn fetch(&self, docs: &Documents, identity: &Identity)
        -> Result<Self::Output, ClientError>;
}

/// Lets a disposed view invalidate whatever fetch is still in flight, so a
/// late result is discarded instead of mutating state nobody renders.
#[derive(Clone)]
pub struct DetachHandle {
    epoch: Arc<AtomicU64>,
}

impl DetachHandle {
    pub fn detach(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

/// Generic page adapter: session subscription in, `ViewState` out.
pub struct PageModel<Q: PageQuery> {
    docs: Documents,
    query: Q,
    session: watch::Receiver<SessionState>,
    state: Arc<watch::Sender<ViewState<Q::Output>>>,
    epoch: Arc<AtomicU64>,
}

impl<Q: PageQuery> PageModel<Q> {
    pub fn new(docs: Documents, session: watch::Receiver<SessionState>, query: Q) -> Self {
        let (state, _) = watch::channel(ViewState::Unresolved);
        PageModel {
            docs,
            query,
            session,
            state: Arc::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> ViewState<Q::Output> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Q::Output>> {
        self.state.subscribe()
    }

    pub fn detach_handle(&self) -> DetachHandle {
        DetachHandle {
            epoch: self.epoch.clone(),
        }
    }

    /// Processes the current session snapshot: transitions state and, when
    /// an identity is present, runs the page query once.
    pub async fn sync(&mut self) {
        let snapshot = self.session.borrow_and_update().clone();

        if snapshot.resolving {
            let _ = self.state.send(ViewState::Unresolved);
            return;
        }
        let Some(identity) = snapshot.identity else {
            let _ = self.state.send(ViewState::SignedOut);
            return;
        };

        // Each pass supersedes whatever was in flight before it.
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.state.send(ViewState::Loading);

        let result = self.query.fetch(&self.docs, &identity).await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("discarding stale page query result");
            return;
        }
        let _ = self.state.send(match result {
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Failed(e.kind()),
        });
    }

    /// Drives the adapter until the session store goes away: one sync per
    /// identity change.
    pub async fn run(mut self) {
        self.sync().await;
        while self.session.changed().await.is_ok() {
            self.sync().await;
        }
    }
}
