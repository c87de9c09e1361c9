// Filesystem locations.
// Resolves where the breed database, preferences, and log file live.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "pawdex")
}

/// Base data directory (~/.local/share/pawdex on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Base config directory (~/.config/pawdex on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Base cache directory (~/.cache/pawdex on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Database file inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("pawdex.db")
}

/// Preference file inside `config_dir`.
pub fn prefs_path(config_dir: &Path) -> PathBuf {
    config_dir.join("prefs.json")
}

/// Log file inside `cache_dir`.
pub fn log_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("pawdex.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let base = Path::new("/tmp/pawdex-test");
        assert!(database_path(base).ends_with("pawdex-test/pawdex.db"));
        assert!(prefs_path(base).ends_with("pawdex-test/prefs.json"));
        assert!(log_path(base).ends_with("pawdex-test/pawdex.log"));
    }
}
