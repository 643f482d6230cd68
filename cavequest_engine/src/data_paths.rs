//! Locating the `data/` directory that holds `cavequest.toml` and world files.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Overrides every other candidate when set.
pub const DATA_DIR_ENV: &str = "CAVEQUEST_DATA_DIR";

static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(|| {
    let found = first_existing(data_root_candidates());
    log::debug!("data directory resolved to {}", found.display());
    found
});

/// `relative` joined onto the data directory.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

fn data_root_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = env::var_os(DATA_DIR_ENV).map(PathBuf::from).into_iter().collect();
    candidates.push(PathBuf::from("data"));
    candidates.push(PathBuf::from("cavequest_engine").join("data"));
    if let Some(beside_exe) = env::current_exe().ok().and_then(|exe| exe.parent().map(|dir| dir.join("data"))) {
        candidates.push(beside_exe);
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
    candidates
}

/// First candidate that is a directory, or the last one if none exist yet.
fn first_existing(candidates: Vec<PathBuf>) -> PathBuf {
    let fallback = candidates.last().cloned().unwrap_or_else(|| PathBuf::from("data"));
    candidates.into_iter().find(|dir| dir.is_dir()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_data_dir_is_always_a_candidate() {
        let candidates = data_root_candidates();
        assert_eq!(candidates.last(), Some(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data")));
    }

    #[test]
    fn falls_back_to_last_candidate() {
        let missing = vec![PathBuf::from("no/such/a"), PathBuf::from("no/such/b")];
        assert_eq!(first_existing(missing), PathBuf::from("no/such/b"));
        let dir = tempfile::tempdir().unwrap();
        let found = first_existing(vec![PathBuf::from("no/such/a"), dir.path().to_path_buf()]);
        assert_eq!(found, dir.path());
    }
}
