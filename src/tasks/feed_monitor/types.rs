use serde::Serialize;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use crate::models::feed::FeedId;

/// Outcome counts for one pass over the due feeds.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub forced: bool,
    /// feeds returned by the due selection
    pub due: usize,
    pub ingested: usize,
    /// already being ingested by an overlapping cycle
    pub skipped: usize,
    pub failed: usize,
    /// content records written
    pub items: usize,
}

/// Ids of feeds currently between fetch and commit. Shared by the timer and
/// any forced cycles so the same feed is never ingested twice at once.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    ids: Arc<Mutex<HashSet<FeedId>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `id` unless another cycle holds it. The claim is released when
    /// the returned guard is dropped.
    pub fn try_claim(&self, id: FeedId) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if ids.insert(id) {
            Some(InFlightGuard {
                ids: Arc::clone(&self.ids),
                id,
            })
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<FeedId>>>,
    id: FeedId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}
