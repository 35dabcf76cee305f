use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

/// Remembers when each definitions file was last modified.
#[derive(Debug, Default, Clone)]
pub struct RefreshMonitor {
    last_modified: HashMap<PathBuf, Option<SystemTime>>,
}

impl RefreshMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the modification time seen when `path` was read.
    pub fn record(&mut self, path: impl Into<PathBuf>, modified: Option<SystemTime>) {
        self.last_modified.insert(path.into(), modified);
    }

    pub fn is_tracking(&self, path: &Path) -> bool {
        self.last_modified.contains_key(path)
    }

    pub fn clear(&mut self) {
        self.last_modified.clear();
    }

    /// Whether any recorded file changed since it was read.
    ///
    /// A file whose modification time can't be queried any more counts as
    /// changed.
    pub fn refresh_required(&self) -> bool {
        for (path, recorded) in &self.last_modified {
            match std::fs::metadata(path).and_then(|m| m.modified()) {
                Ok(current) if Some(current) == *recorded => {}
                Ok(_) => {
                    debug!(path = %path.display(), "definitions file changed");
                    return true;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to check definitions file for updates");
                    return true;
                }
            }
        }
        false
    }
}
