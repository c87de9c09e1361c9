// App state and main event loop.
// Owns the repository handle, forwards feed emissions, and maps keys to operations.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use pawdex::{Breed, Kind, PetsState, PreferenceStore, Repository, SyncStatus};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::state::{CatalogState, DetailState, KindPicker, LoadingState};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Breeds,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Breeds, Tab::Favorites];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Breeds => "Breeds",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Breeds => Tab::Favorites,
            Tab::Favorites => Tab::Breeds,
        }
    }
}

/// Results delivered to the UI loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Pets(Kind, PetsState),
    Favorites(Kind, Result<Vec<Breed>, String>),
    Refreshed(Kind, Result<(), String>),
    Images {
        id: String,
        result: Result<Vec<String>, String>,
    },
}

/// Main application state.
pub struct App {
    repo: Arc<Repository>,
    prefs: PreferenceStore,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    feeds: Vec<JoinHandle<()>>,
    /// Currently active tab.
    pub active_tab: Tab,
    /// Catalog of the selected kind; `None` until one is chosen.
    pub catalog: Option<CatalogState>,
    /// Shown while no kind is selected.
    pub picker: Option<KindPicker>,
    /// Search input being typed.
    pub search_input: Option<String>,
    /// Breed opened with Enter.
    pub detail: Option<DetailState>,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(repo: Arc<Repository>, prefs: PreferenceStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            repo,
            prefs,
            tx,
            rx,
            feeds: Vec::new(),
            active_tab: Tab::default(),
            catalog: None,
            picker: None,
            search_input: None,
            detail: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Open the saved kind, or the picker on first launch.
    pub fn start(&mut self) {
        match self.prefs.get() {
            Some(kind) => self.select_kind(kind),
            None => self.picker = Some(KindPicker::default()),
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_events();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        self.stop_feeds();
        Ok(())
    }

    /// Refresh outcome of the shown kind, as tracked by the repository.
    pub fn sync_status(&self) -> Option<SyncStatus> {
        self.catalog.as_ref().map(|c| self.repo.status(c.kind))
    }

    /// Switch the whole catalog to `kind`: new feeds and a first refresh.
    fn select_kind(&mut self, kind: Kind) {
        log::info!("Showing {} catalog", kind);
        self.stop_feeds();
        self.picker = None;
        self.detail = None;
        self.active_tab = Tab::Breeds;
        self.catalog = Some(CatalogState::new(kind));

        let mut pets = self.repo.observe_pets(kind);
        let tx = self.tx.clone();
        self.feeds.push(tokio::spawn(async move {
            while let Some(state) = pets.next().await {
                if tx.send(AppEvent::Pets(kind, state)).is_err() {
                    break;
                }
            }
        }));

        let mut favorites = self.repo.observe_favorites(kind);
        let tx = self.tx.clone();
        self.feeds.push(tokio::spawn(async move {
            while let Some(result) = favorites.next().await {
                let result = result.map_err(|e| e.to_string());
                if tx.send(AppEvent::Favorites(kind, result)).is_err() {
                    break;
                }
            }
        }));

        self.refresh();
    }

    fn stop_feeds(&mut self) {
        for feed in self.feeds.drain(..) {
            feed.abort();
        }
    }

    /// Refresh the current page or search in the background.
    fn refresh(&self) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };

        let repo = Arc::clone(&self.repo);
        let tx = self.tx.clone();
        let (kind, page, query) = (catalog.kind, catalog.page, catalog.query.clone());
        tokio::spawn(async move {
            let result = repo
                .refresh(kind, page, query.as_deref())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Refreshed(kind, result));
        });
    }

    /// Apply everything background tasks have sent since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Images { id, result } => {
                if let Some(detail) = self.detail.as_mut().filter(|d| d.breed.id == id) {
                    detail.images = match result {
                        Ok(urls) => LoadingState::Loaded(urls),
                        Err(e) => LoadingState::Error(e),
                    };
                }
            }
            AppEvent::Pets(kind, state) => {
                if let Some(catalog) = self.catalog_for(kind) {
                    catalog.apply_pets(state);
                }
            }
            AppEvent::Favorites(kind, result) => {
                if let Some(catalog) = self.catalog_for(kind) {
                    catalog.apply_favorites(result);
                }
            }
            AppEvent::Refreshed(kind, result) => {
                if let Some(catalog) = self.catalog_for(kind) {
                    catalog.finish_refresh(result);
                }
            }
        }
    }

    /// The catalog, if it still shows `kind`. Late events for a kind the user
    /// has switched away from are dropped.
    fn catalog_for(&mut self, kind: Kind) -> Option<&mut CatalogState> {
        self.catalog.as_mut().filter(|c| c.kind == kind)
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.picker.is_some() {
            self.handle_picker_key(key.code);
        } else if self.search_input.is_some() {
            self.handle_search_key(key.code);
        } else if self.detail.is_some() {
            self.handle_detail_key(key.code);
        } else {
            self.handle_browse_key(key.code);
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                picker.toggle()
            }
            KeyCode::Enter => {
                let kind = picker.selected();
                if let Err(e) = self.prefs.save(kind) {
                    log::warn!("Could not save selected kind: {}", e);
                }
                self.select_kind(kind);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let Some(input) = self.search_input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.search_input = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Enter => {
                let input = self.search_input.take().unwrap_or_default();
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.set_query(&input);
                    self.active_tab = Tab::Breeds;
                    self.refresh();
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => self.detail = None,
            KeyCode::Char('f') => {
                if let Some(id) = self.detail.as_ref().map(|d| d.breed.id.clone()) {
                    self.toggle_favorite(&id);
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.active_tab = self.active_tab.next(),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(list) = self.active_list() {
                    list.select_prev();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(list) = self.active_list() {
                    list.select_next();
                }
            }
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('f') => {
                let id = self
                    .active_list()
                    .and_then(|list| list.selected_item().map(|b| b.id.clone()));
                if let Some(id) = id {
                    self.toggle_favorite(&id);
                }
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('n') => {
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.next_page();
                    self.refresh();
                }
            }
            KeyCode::Char('p') => {
                if self.catalog.as_mut().is_some_and(|c| c.prev_page()) {
                    self.refresh();
                }
            }
            KeyCode::Char('/') => self.search_input = Some(String::new()),
            KeyCode::Char('K') => self.change_kind(),
            _ => {}
        }
    }

    fn active_list(&mut self) -> Option<&mut crate::state::SelectableList<Breed>> {
        let tab = self.active_tab;
        self.catalog.as_mut().map(|catalog| match tab {
            Tab::Breeds => &mut catalog.breeds,
            Tab::Favorites => &mut catalog.favorites,
        })
    }

    fn toggle_favorite(&mut self, id: &str) {
        match self.repo.toggle_favorite(id) {
            Ok(Some(favorite)) => {
                if let Some(detail) = self.detail.as_mut().filter(|d| d.breed.id == id) {
                    detail.breed.is_favorite = favorite;
                }
            }
            Ok(None) => log::debug!("Breed {} is no longer cached", id),
            Err(e) => {
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.last_error = Some(e.to_string());
                }
            }
        }
    }

    fn open_detail(&mut self) {
        let Some(selected) = self
            .active_list()
            .and_then(|list| list.selected_item().map(|b| b.id.clone()))
        else {
            return;
        };

        let breed = match self.repo.get_pet_details(&selected) {
            Ok(Some(breed)) => breed,
            Ok(None) => return,
            Err(e) => {
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.last_error = Some(e.to_string());
                }
                return;
            }
        };

        let repo = Arc::clone(&self.repo);
        let tx = self.tx.clone();
        let (id, kind) = (breed.id.clone(), breed.kind);
        tokio::spawn(async move {
            let result = repo
                .get_pet_images(&id, kind)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Images { id, result });
        });

        self.detail = Some(DetailState::new(breed));
    }

    /// Forget the saved kind and go back to the picker.
    fn change_kind(&mut self) {
        let current = self.catalog.as_ref().map(|c| c.kind);
        if let Err(e) = self.prefs.clear() {
            log::warn!("Could not clear selected kind: {}", e);
        }
        self.stop_feeds();
        self.catalog = None;
        self.detail = None;

        let mut picker = KindPicker::default();
        if current == Some(Kind::Cat) {
            // Preselect the other kind, since that is usually why the user is here.
            picker.toggle();
        }
        self.picker = Some(picker);
    }
}
