//! Breed repository: the one place that talks to both the remote catalogs and
//! the local store.
//!
//! Reads never touch the network. They come from feeds that re-query the store
//! whenever it reports a write for their kind. `refresh` is the only path that
//! fetches, and it replaces the stored rows of one kind in a single transaction.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::api::BreedApi;
use crate::error::Result;
use crate::mapper;
use crate::model::{Breed, Kind};
use crate::store::{LocalStore, RefreshPolicy};

/// What a pets feed emits.
#[derive(Debug, Clone, PartialEq)]
pub enum PetsState {
    Loading,
    Success(Vec<Breed>),
    Failure(String),
}

/// Outcome of the latest refresh of a kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// No refresh this session.
    #[default]
    Idle,
    Refreshing,
    Synced,
    Failed(String),
}

/// Tunables for the repository.
#[derive(Debug, Clone, Copy)]
pub struct RepositoryOptions {
    pub page_size: u32,
    pub image_limit: u32,
    pub policy: RefreshPolicy,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            image_limit: 5,
            policy: RefreshPolicy::default(),
        }
    }
}

pub struct Repository {
    api: BreedApi,
    store: Arc<LocalStore>,
    options: RepositoryOptions,
    status: [watch::Sender<SyncStatus>; 2],
}

impl Repository {
    pub fn new(api: BreedApi, store: Arc<LocalStore>, options: RepositoryOptions) -> Self {
        Self {
            api,
            store,
            options,
            status: [
                watch::channel(SyncStatus::Idle).0,
                watch::channel(SyncStatus::Idle).0,
            ],
        }
    }

    /// Latest refresh outcome for a kind.
    pub fn status(&self, kind: Kind) -> SyncStatus {
        self.status[kind.index()].borrow().clone()
    }

    fn set_status(&self, kind: Kind, status: SyncStatus) {
        self.status[kind.index()].send_replace(status);
    }

    /// Live view of every cached breed of a kind.
    pub fn observe_pets(&self, kind: Kind) -> PetsFeed {
        PetsFeed {
            store: Arc::clone(&self.store),
            kind,
            revisions: self.store.subscribe(kind),
            status: self.status[kind.index()].subscribe(),
            started: false,
        }
    }

    /// Live view of the favorite breeds of a kind.
    pub fn observe_favorites(&self, kind: Kind) -> FavoritesFeed {
        FavoritesFeed {
            store: Arc::clone(&self.store),
            kind,
            revisions: self.store.subscribe(kind),
            started: false,
        }
    }

    /// Fetch one page (or the results of a non-blank `query`) and make it the
    /// cached content for `kind`.
    pub async fn refresh(&self, kind: Kind, page: u32, query: Option<&str>) -> Result<()> {
        self.set_status(kind, SyncStatus::Refreshing);

        match self.fetch_and_replace(kind, page, query).await {
            Ok(written) => {
                log::info!("Refreshed {} page {}: {} breeds", kind, page, written);
                self.set_status(kind, SyncStatus::Synced);
                Ok(())
            }
            Err(e) => {
                log::error!("Refresh of {} page {} failed: {}", kind, page, e);
                self.set_status(kind, SyncStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch_and_replace(&self, kind: Kind, page: u32, query: Option<&str>) -> Result<usize> {
        let client = self.api.client(kind);
        let records = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => client.search_breeds(q).await?,
            None => client.list_breeds(page, self.options.page_size).await?,
        };

        let rows = mapper::to_rows(kind, records, Utc::now());
        self.store.bulk_replace(kind, &rows, self.options.policy)
    }

    /// Flip the favorite flag of one breed. Returns the new flag, or `None`
    /// if no breed has that id.
    pub fn toggle_favorite(&self, id: &str) -> Result<Option<bool>> {
        let Some(row) = self.store.get_by_id(id)? else {
            log::debug!("Ignoring favorite toggle for unknown breed {}", id);
            return Ok(None);
        };

        let favorite = !row.is_favorite;
        Ok(self.store.set_favorite(id, favorite)?.map(|_| favorite))
    }

    pub fn get_pet_details(&self, id: &str) -> Result<Option<Breed>> {
        Ok(self.store.get_by_id(id)?.map(mapper::to_domain))
    }

    /// Image URLs for a breed, straight from the remote catalog.
    pub async fn get_pet_images(&self, id: &str, kind: Kind) -> Result<Vec<String>> {
        let images = self
            .api
            .client(kind)
            .list_images(id, self.options.image_limit)
            .await?;
        Ok(images.into_iter().map(|image| image.url).collect())
    }
}

fn snapshot(store: &LocalStore, kind: Kind) -> Result<Vec<Breed>> {
    Ok(store
        .list_by_kind(kind)?
        .into_iter()
        .map(mapper::to_domain)
        .collect())
}

/// Subscription returned by [`Repository::observe_pets`].
///
/// Nothing is queried until the first call to [`PetsFeed::next`]. Each feed
/// is independent; observing again starts over with a fresh snapshot.
pub struct PetsFeed {
    store: Arc<LocalStore>,
    kind: Kind,
    revisions: watch::Receiver<u64>,
    status: watch::Receiver<SyncStatus>,
    started: bool,
}

impl PetsFeed {
    /// Wait for the next state. Returns `None` once the repository is gone.
    pub async fn next(&mut self) -> Option<PetsState> {
        if !self.started {
            self.started = true;
            self.revisions.borrow_and_update();
            let status = self.status.borrow_and_update().clone();
            return Some(self.first_state(status));
        }

        loop {
            tokio::select! {
                changed = self.revisions.changed() => {
                    changed.ok()?;
                    self.revisions.borrow_and_update();
                    return Some(self.current());
                }
                changed = self.status.changed() => {
                    changed.ok()?;
                    let status = self.status.borrow_and_update().clone();
                    match status {
                        SyncStatus::Failed(reason) => return Some(PetsState::Failure(reason)),
                        SyncStatus::Refreshing if self.is_empty() => return Some(PetsState::Loading),
                        _ => continue,
                    }
                }
            }
        }
    }

    fn first_state(&self, status: SyncStatus) -> PetsState {
        match snapshot(&self.store, self.kind) {
            Ok(breeds) if !breeds.is_empty() => PetsState::Success(breeds),
            Ok(breeds) => match status {
                SyncStatus::Synced => PetsState::Success(breeds),
                SyncStatus::Failed(reason) => PetsState::Failure(reason),
                SyncStatus::Idle | SyncStatus::Refreshing => PetsState::Loading,
            },
            Err(e) => PetsState::Failure(e.to_string()),
        }
    }

    fn current(&self) -> PetsState {
        match snapshot(&self.store, self.kind) {
            Ok(breeds) => PetsState::Success(breeds),
            Err(e) => PetsState::Failure(e.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        self.store.count_by_kind(self.kind).map_or(true, |n| n == 0)
    }
}

/// Subscription returned by [`Repository::observe_favorites`].
pub struct FavoritesFeed {
    store: Arc<LocalStore>,
    kind: Kind,
    revisions: watch::Receiver<u64>,
    started: bool,
}

impl FavoritesFeed {
    /// Wait for the next favorites snapshot.
    pub async fn next(&mut self) -> Option<Result<Vec<Breed>>> {
        if self.started {
            self.revisions.changed().await.ok()?;
        }
        self.started = true;
        self.revisions.borrow_and_update();

        let favorites = self.store.list_favorites_by_kind(self.kind).map(|rows| {
            rows.into_iter().map(mapper::to_domain).collect()
        });
        Some(favorites)
    }
}
