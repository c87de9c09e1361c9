// Selectable list state.
// Loading state plus keyboard selection for the breed lists.

use ratatui::widgets::ListState;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<Vec<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.data().map_or(0, Vec::len)
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i, // Stay at end
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.data.data()?.get(index)
    }

    /// Replace the items, keeping the selection index where it still fits.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        let selected = match (self.list_state.selected(), items.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.data = LoadingState::Loaded(items);
        self.list_state.select(selected);
    }

    /// Set loading state.
    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
        self.list_state.select(None);
    }

    /// Set error state.
    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
        self.list_state.select(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut list = SelectableList::new();
        list.select_next();
        assert_eq!(list.list_state.selected(), None);

        list.set_loaded(vec!["a", "b", "c"]);
        assert_eq!(list.selected_item(), Some(&"a"));

        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_item(), Some(&"c"));

        list.select_prev();
        assert_eq!(list.selected_item(), Some(&"b"));
    }

    #[test]
    fn test_reload_clamps_selection() {
        let mut list = SelectableList::new();
        list.set_loaded(vec![1, 2, 3]);
        list.select_next();
        list.select_next();

        list.set_loaded(vec![1, 2]);
        assert_eq!(list.selected_item(), Some(&2));

        list.set_loaded(Vec::new());
        assert_eq!(list.selected_item(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_loading_and_error_clear_selection() {
        let mut list = SelectableList::new();
        list.set_loaded(vec![1]);
        list.set_loading();
        assert!(list.data.is_loading());
        assert_eq!(list.selected_item(), None);

        list.set_error("boom".to_string());
        assert!(matches!(list.data, LoadingState::Error(_)));
    }
}
