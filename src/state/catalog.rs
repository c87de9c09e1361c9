// Catalog screen state.
// Tracks the selected kind, paging and search, the two breed lists, and the detail view.

use chrono::{DateTime, Utc};
use pawdex::{Breed, Kind, PetsState};

use super::list::{LoadingState, SelectableList};

/// State behind the Breeds and Favorites tabs for one kind.
#[derive(Debug)]
pub struct CatalogState {
    pub kind: Kind,
    /// Zero-based page shown when no search is active.
    pub page: u32,
    /// Active search, if any.
    pub query: Option<String>,
    pub breeds: SelectableList<Breed>,
    pub favorites: SelectableList<Breed>,
    pub last_error: Option<String>,
    pub last_synced: Option<DateTime<Utc>>,
}

impl CatalogState {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            page: 0,
            query: None,
            breeds: SelectableList::new(),
            favorites: SelectableList::new(),
            last_error: None,
            last_synced: None,
        }
    }

    /// Apply an emission from the pets feed.
    pub fn apply_pets(&mut self, state: PetsState) {
        match state {
            PetsState::Loading => self.breeds.set_loading(),
            PetsState::Success(breeds) => {
                self.last_synced = breeds.iter().map(|b| b.synced_at).max();
                self.breeds.set_loaded(breeds);
            }
            PetsState::Failure(reason) => {
                // Keep showing cached rows; the status bar carries the error.
                if self.breeds.data.data().is_none() {
                    self.breeds.set_error(reason.clone());
                }
                self.last_error = Some(reason);
            }
        }
    }

    /// Apply an emission from the favorites feed.
    pub fn apply_favorites(&mut self, result: Result<Vec<Breed>, String>) {
        match result {
            Ok(favorites) => self.favorites.set_loaded(favorites),
            Err(reason) => self.favorites.set_error(reason),
        }
    }

    /// Record the outcome of a refresh this screen started.
    pub fn finish_refresh(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(reason) => self.last_error = Some(reason),
        }
    }

    pub fn next_page(&mut self) {
        self.query = None;
        self.page = self.page.saturating_add(1);
    }

    /// Step back a page. Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.query.is_none() && self.page == 0 {
            return false;
        }
        self.query = None;
        self.page = self.page.saturating_sub(1);
        true
    }

    /// Start showing results for `input`; a blank input returns to paging.
    pub fn set_query(&mut self, input: &str) {
        let input = input.trim();
        self.query = (!input.is_empty()).then(|| input.to_string());
        self.page = 0;
    }

    pub fn location(&self) -> String {
        match &self.query {
            Some(q) => format!("search \"{}\"", q),
            None => format!("page {}", self.page + 1),
        }
    }
}

/// Breed opened in the detail overlay.
#[derive(Debug)]
pub struct DetailState {
    pub breed: Breed,
    pub images: LoadingState<Vec<String>>,
}

impl DetailState {
    pub fn new(breed: Breed) -> Self {
        Self {
            breed,
            images: LoadingState::Loading,
        }
    }
}

/// First-launch kind chooser.
#[derive(Debug, Default)]
pub struct KindPicker {
    pub selection: usize,
}

impl KindPicker {
    pub fn selected(&self) -> Kind {
        Kind::ALL[self.selection.min(Kind::ALL.len() - 1)]
    }

    pub fn toggle(&mut self) {
        self.selection = (self.selection + 1) % Kind::ALL.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breed(id: &str, name: &str, synced_at: DateTime<Utc>) -> Breed {
        Breed {
            id: id.to_string(),
            name: name.to_string(),
            origin: "Unknown".to_string(),
            temperament: String::new(),
            description: String::new(),
            life_span: String::new(),
            image_url: None,
            images: Vec::new(),
            is_favorite: false,
            kind: Kind::Cat,
            synced_at,
        }
    }

    #[test]
    fn test_failure_keeps_cached_rows() {
        let mut catalog = CatalogState::new(Kind::Cat);
        let now = Utc::now();
        catalog.apply_pets(PetsState::Success(vec![breed("beng", "Bengal", now)]));
        assert_eq!(catalog.last_synced, Some(now));

        catalog.apply_pets(PetsState::Failure("HTTP 500".to_string()));
        assert_eq!(catalog.breeds.len(), 1);
        assert_eq!(catalog.last_error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_failure_without_cache_shows_error() {
        let mut catalog = CatalogState::new(Kind::Dog);
        catalog.apply_pets(PetsState::Loading);
        catalog.apply_pets(PetsState::Failure("offline".to_string()));
        assert!(matches!(catalog.breeds.data, LoadingState::Error(_)));
    }

    #[test]
    fn test_paging_and_search() {
        let mut catalog = CatalogState::new(Kind::Cat);
        assert!(!catalog.prev_page());

        catalog.next_page();
        assert_eq!(catalog.location(), "page 2");

        catalog.set_query("  beng ");
        assert_eq!(catalog.query.as_deref(), Some("beng"));
        assert_eq!(catalog.page, 0);

        // Leaving a search goes back to the first page.
        assert!(catalog.prev_page());
        assert_eq!(catalog.query, None);
        assert_eq!(catalog.page, 0);

        catalog.set_query("   ");
        assert_eq!(catalog.query, None);
    }

    #[test]
    fn test_finish_refresh_clears_error() {
        let mut catalog = CatalogState::new(Kind::Cat);
        catalog.finish_refresh(Err("timeout".to_string()));
        assert!(catalog.last_error.is_some());

        catalog.finish_refresh(Ok(()));
        assert!(catalog.last_error.is_none());
    }

    #[test]
    fn test_kind_picker_wraps() {
        let mut picker = KindPicker::default();
        assert_eq!(picker.selected(), Kind::Cat);
        picker.toggle();
        assert_eq!(picker.selected(), Kind::Dog);
        picker.toggle();
        assert_eq!(picker.selected(), Kind::Cat);
    }
}
