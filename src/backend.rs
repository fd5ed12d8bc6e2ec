use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{HuntError, HuntResult};
use crate::leaderboard::{Leaderboard, ScoreEntry};
use crate::region::RegionIndex;
use crate::store::ScoreDb;

pub const REGIONS_ROUTE: &str = "/recieve-icon-data";
pub const SCORES_ROUTE: &str = "/current-high-scores";
pub const SUBMIT_ROUTE: &str = "/update-high-scores";

/// Where region data and the durable leaderboard live.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_regions(&self) -> HuntResult<RegionIndex>;
    async fn fetch_leaderboard(&self) -> HuntResult<Leaderboard>;
    async fn submit_score(&self, entry: &ScoreEntry) -> HuntResult<()>;
}

#[derive(Debug, Clone)]
pub enum RegionSource {
    Bundled(RegionIndex),
    File(PathBuf),
}

/// Regions from the bundled scene or a JSON file, scores in SQLite.
#[derive(Debug)]
pub struct LocalBackend {
    regions: RegionSource,
    db: Mutex<ScoreDb>,
}

impl LocalBackend {
    pub fn new(regions: RegionSource, db: ScoreDb) -> Self {
        Self {
            regions,
            db: Mutex::new(db),
        }
    }

    fn with_db<T>(&self, f: impl FnOnce(&mut ScoreDb) -> HuntResult<T>) -> HuntResult<T> {
        let mut db = self
            .db
            .lock()
            .map_err(|_| HuntError::Fetch("score database lock poisoned".into()))?;
        f(&mut db)
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn fetch_regions(&self) -> HuntResult<RegionIndex> {
        match &self.regions {
            RegionSource::Bundled(index) => Ok(index.clone()),
            RegionSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                    HuntError::Fetch(format!("could not read {}: {}", path.display(), e))
                })?;
                RegionIndex::from_json_str(&contents).map_err(|e| {
                    HuntError::Fetch(format!("could not decode {}: {}", path.display(), e))
                })
            }
        }
    }

    async fn fetch_leaderboard(&self) -> HuntResult<Leaderboard> {
        self.with_db(|db| db.top_scores())
    }

    async fn submit_score(&self, entry: &ScoreEntry) -> HuntResult<()> {
        self.with_db(|db| db.submit(entry)).map(|_| ())
    }
}

/// Talks to the remote game server.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, route: &str) -> HuntResult<T> {
        let resp = self
            .client
            .get(self.url(route))
            .send()
            .await
            .map_err(|e| fetch_error(route, e))?;
        if !resp.status().is_success() {
            return Err(HuntError::Fetch(format!(
                "GET {} returned {}",
                route,
                resp.status()
            )));
        }
        resp.json::<T>().await.map_err(|e| fetch_error(route, e))
    }
}

fn fetch_error(route: &str, e: reqwest::Error) -> HuntError {
    tracing::warn!(route, error = %e, "request failed");
    HuntError::Fetch(format!("{}: {}", route, e))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_regions(&self) -> HuntResult<RegionIndex> {
        self.get_json(REGIONS_ROUTE).await
    }

    async fn fetch_leaderboard(&self) -> HuntResult<Leaderboard> {
        self.get_json(SCORES_ROUTE).await
    }

    async fn submit_score(&self, entry: &ScoreEntry) -> HuntResult<()> {
        let resp = self
            .client
            .post(self.url(SUBMIT_ROUTE))
            .json(entry)
            .send()
            .await
            .map_err(|e| fetch_error(SUBMIT_ROUTE, e))?;
        if !resp.status().is_success() {
            return Err(HuntError::Fetch(format!(
                "Error updating leaderboard: {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
