//! pawdex - cat and dog breed catalogs with an offline cache.
//!
//! Breeds are fetched from TheCatAPI and TheDogAPI, cached in SQLite, and
//! served to the terminal UI through live feeds. Favorites are stored per
//! breed and, under the default refresh policy, survive refreshes that return
//! the same breed.

pub mod api;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod paths;
pub mod prefs;
pub mod repository;
pub mod store;

pub use api::{BreedApi, BreedClient};
pub use config::Config;
pub use error::{PawError, Result};
pub use model::{Breed, Kind};
pub use prefs::PreferenceStore;
pub use repository::{FavoritesFeed, PetsFeed, PetsState, Repository, RepositoryOptions, SyncStatus};
pub use store::{LocalStore, RefreshPolicy};
