use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the `cloze/` data directory for external edits to question files
/// and `bank.toml`.
///
/// Owned by the TUI session; dropping it tears the subscription down.
pub struct BankWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<PathBuf>,
}

/// A path is interesting when it is a markdown or TOML file under the
/// watched directory.
fn is_bank_file(data_dir: &Path, path: &Path) -> bool {
    path.starts_with(data_dir)
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("md") | Some("toml")
        )
}

impl BankWatcher {
    /// Start watching the given data directory.
    /// `changed_paths()` should be polled once per TUI tick.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watched = data_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else { return };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                for path in event.paths {
                    if is_bank_file(&watched, &path) {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::Recursive)?;
        Ok(BankWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending change notifications without blocking.
    pub fn changed_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        while let Ok(path) = self.rx.try_recv() {
            paths.push(path);
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bank_file() {
        let dir = Path::new("/work/cloze");
        assert!(is_bank_file(dir, Path::new("/work/cloze/questions/a.md")));
        assert!(is_bank_file(dir, Path::new("/work/cloze/bank.toml")));
        assert!(!is_bank_file(dir, Path::new("/work/cloze/questions/a.md.swp")));
        assert!(!is_bank_file(dir, Path::new("/elsewhere/b.md")));
    }
}
