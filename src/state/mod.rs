// State management module.
// Screen state for the catalog tabs, detail view, and kind picker.

pub mod catalog;
pub mod list;

pub use catalog::{CatalogState, DetailState, KindPicker};
pub use list::{LoadingState, SelectableList};
