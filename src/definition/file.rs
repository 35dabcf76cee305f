//! File-based definitions source.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use super::reader::parse_definitions;
use super::{Definitions, DefinitionsError};

/// A definitions file, possibly with localized siblings.
///
/// Files can be marked as required or optional. A required base file that
/// doesn't exist causes an error; optional files and localized variants that
/// don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

/// A successfully read definitions file.
#[derive(Debug)]
pub(crate) struct LoadedFile {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub definitions: Definitions,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails when the base file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path of the variant for `postfix`, inserted before the extension:
    /// `defs/tiles.toml` with `_fr` becomes `defs/tiles_fr.toml`.
    pub fn localized_path(&self, postfix: &str) -> PathBuf {
        if postfix.is_empty() {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut name = format!("{stem}{postfix}");
        if let Some(extension) = self.path.extension() {
            name.push('.');
            name.push_str(&extension.to_string_lossy());
        }
        self.path.with_file_name(name)
    }

    /// Reads the variant for `postfix`.
    ///
    /// Returns `Ok(None)` if the file doesn't exist and isn't required.
    pub(crate) fn load(&self, postfix: &str) -> Result<Option<LoadedFile>, DefinitionsError> {
        let path = self.localized_path(postfix);
        let required = self.required && postfix.is_empty();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    return Err(DefinitionsError::FileNotFound(path));
                }
                debug!(path = %path.display(), "definitions file not found, skipping");
                return Ok(None);
            }
            Err(e) => return Err(DefinitionsError::ReadError { path, source: e }),
        };

        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        let definitions = parse_definitions(&contents, &path)?;
        debug!(path = %path.display(), count = definitions.len(), "read definitions file");

        Ok(Some(LoadedFile {
            path,
            modified,
            definitions,
        }))
    }
}
