use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::error::HuntResult;
use crate::leaderboard::{Leaderboard, ScoreEntry};
use crate::region::RegionIndex;
use crate::runtime::GameEvent;

/// Completion of a backend call, delivered on the game's event queue.
#[derive(Debug)]
pub enum SyncEvent {
    RegionsLoaded(HuntResult<RegionIndex>),
    LeaderboardLoaded(HuntResult<Leaderboard>),
    ScoreSubmitted(HuntResult<()>),
}

/// Runs backend calls off the UI thread and posts each result back as a
/// [`GameEvent::Sync`].
pub struct ScoreSync {
    backend: Arc<dyn Backend>,
    events: Sender<GameEvent>,
    rt: Runtime,
}

impl ScoreSync {
    pub fn new(backend: Arc<dyn Backend>, events: Sender<GameEvent>) -> HuntResult<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("iconhunt-sync")
            .enable_all()
            .build()?;
        Ok(Self {
            backend,
            events,
            rt,
        })
    }

    fn dispatch<F, Fut>(&self, what: &'static str, call: F)
    where
        F: FnOnce(Arc<dyn Backend>) -> Fut,
        Fut: std::future::Future<Output = SyncEvent> + Send + 'static,
    {
        let fut = call(self.backend.clone());
        let tx = self.events.clone();
        self.rt.spawn(async move {
            let event = fut.await;
            info!(call = what, "backend call finished");
            if tx.send(GameEvent::Sync(event)).is_err() {
                warn!(call = what, "event queue closed before result delivery");
            }
        });
    }

    pub fn request_regions(&self) {
        self.dispatch("fetch_regions", |b| async move {
            SyncEvent::RegionsLoaded(b.fetch_regions().await)
        });
    }

    pub fn request_leaderboard(&self) {
        self.dispatch("fetch_leaderboard", |b| async move {
            SyncEvent::LeaderboardLoaded(b.fetch_leaderboard().await)
        });
    }

    pub fn submit(&self, entry: ScoreEntry) {
        self.dispatch("submit_score", move |b| async move {
            SyncEvent::ScoreSubmitted(b.submit_score(&entry).await)
        });
    }
}
