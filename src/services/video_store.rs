//! src/services/video_store.rs
//!
//! VideoStore: the in-memory catalogue. It owns the collection and the id
//! counter behind a single mutex; every operation takes the lock, runs to
//! completion and releases it, so concurrent handlers observe each operation
//! atomically. Nothing is persisted.

use crate::{
    models::{input::VideoInput, timestamp, video::Video},
    services::validation::{self, RuleSet, ValidationErrors},
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("video `{0}` not found")]
    NotFound(u64),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("video store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
struct Catalogue {
    videos: Vec<Video>,
    last_id: u64,
}

impl Catalogue {
    fn position(&self, id: u64) -> StoreResult<usize> {
        self.videos
            .iter()
            .position(|v| v.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Ids come from a counter that survives `reset`, so they are never reused.
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Shared handle to the catalogue. Cloning is cheap and every clone sees the
/// same collection.
#[derive(Clone, Debug)]
pub struct VideoStore {
    inner: Arc<Mutex<Catalogue>>,
}

impl Default for VideoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Catalogue {
                videos: Vec::new(),
                last_id: 0,
            })),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Catalogue>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All videos in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Video>> {
        Ok(self.lock()?.videos.clone())
    }

    pub fn get(&self, id: u64) -> StoreResult<Video> {
        let catalogue = self.lock()?;
        let idx = catalogue.position(id)?;
        Ok(catalogue.videos[idx].clone())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.videos.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Validate `input` and append a new video.
    ///
    /// The new record is not downloadable, has no age restriction and is
    /// published one day after creation.
    pub fn create(&self, input: &VideoInput) -> StoreResult<Video> {
        let draft = validation::validate(input, RuleSet::Create).inspect_err(|err| {
            debug!(errors = ?err.fields(), "rejected video create");
        })?;

        let created_at = timestamp::now();
        let mut catalogue = self.lock()?;
        let video = Video {
            id: catalogue.next_id(),
            title: draft.title,
            author: draft.author,
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at,
            publication_date: timestamp::add_days(created_at, 1),
            available_resolutions: draft.available_resolutions,
        };
        catalogue.videos.push(video.clone());

        info!(id = video.id, "created video");
        Ok(video)
    }

    /// Replace the editable fields of video `id`.
    ///
    /// An unknown id wins over validation errors and nothing is changed.
    /// `createdAt` is kept, `publicationDate` only changes when one is
    /// supplied, and resolutions are merged with the ones already granted.
    pub fn update(&self, id: u64, input: &VideoInput) -> StoreResult<Video> {
        let validated = validation::validate(input, RuleSet::Update);

        let mut catalogue = self.lock()?;
        let idx = catalogue.position(id)?;
        let draft = validated.inspect_err(|err| {
            debug!(id, errors = ?err.fields(), "rejected video update");
        })?;

        let video = &mut catalogue.videos[idx];
        video.title = draft.title;
        video.author = draft.author;
        video.min_age_restriction = draft.min_age_restriction;
        video.can_be_downloaded = draft.can_be_downloaded;
        if let Some(publication_date) = draft.publication_date {
            video.publication_date = publication_date;
        }
        video.grant_resolutions(&draft.available_resolutions);

        info!(id, "updated video");
        Ok(video.clone())
    }

    /// Remove video `id`, keeping the rest in order.
    pub fn delete(&self, id: u64) -> StoreResult<Video> {
        let mut catalogue = self.lock()?;
        let idx = catalogue.position(id)?;
        let removed = catalogue.videos.remove(idx);

        info!(id, "deleted video");
        Ok(removed)
    }

    /// Drop every video. Returns how many were removed.
    pub fn reset(&self) -> StoreResult<usize> {
        let mut catalogue = self.lock()?;
        let removed = catalogue.videos.len();
        catalogue.videos.clear();

        info!(removed, "cleared all videos");
        Ok(removed)
    }
}
