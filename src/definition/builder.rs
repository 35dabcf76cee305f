use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::file::FileSource;
use super::locale::{self, Locale};
use super::refresh::RefreshMonitor;
use super::{Definition, Definitions, DefinitionsError};

/// Builder for a [`DefinitionsFactory`] reading one or more definitions files.
///
/// For a given locale, every file is read once per locale postfix, most
/// generic first, and definitions read later replace earlier ones of the same
/// name. Inheritance is resolved after all layers are merged.
///
/// ## Example
///
/// ```no_run
/// use tiles_context::{DefinitionsFactory, Locale};
///
/// let mut factory = DefinitionsFactory::builder()
///     .with_file("config/tiles.toml", true)
///     .with_file("config/tiles-extra.toml", false)
///     .check_refresh(true)
///     .build()?;
///
/// let locale: Locale = "fr_FR".parse()?;
/// let home = factory.definition("home", Some(&locale))?;
/// # Ok::<(), tiles_context::DefinitionsError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct DefinitionsFactoryBuilder {
    sources: Vec<FileSource>,
    check_refresh: bool,
}

impl DefinitionsFactoryBuilder {
    /// Adds a definitions file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(FileSource::new(path, required));
        self
    }

    /// Re-reads the files on lookup when any of them changed since last read.
    pub fn check_refresh(mut self, check_refresh: bool) -> Self {
        self.check_refresh = check_refresh;
        self
    }

    /// Builds the factory and loads the locale-independent definitions, so
    /// missing required files and malformed content surface here.
    pub fn build(self) -> Result<DefinitionsFactory, DefinitionsError> {
        let mut factory = DefinitionsFactory {
            sources: self.sources,
            check_refresh: self.check_refresh,
            monitor: RefreshMonitor::new(),
            cache: HashMap::new(),
        };
        factory.definitions(None)?;
        Ok(factory)
    }
}

/// Resolved definitions, cached per locale.
#[derive(Debug)]
pub struct DefinitionsFactory {
    sources: Vec<FileSource>,
    check_refresh: bool,
    monitor: RefreshMonitor,
    cache: HashMap<Option<Locale>, Definitions>,
}

impl DefinitionsFactory {
    /// Creates a new factory builder.
    pub fn builder() -> DefinitionsFactoryBuilder {
        DefinitionsFactoryBuilder::default()
    }

    /// Returns the resolved definitions for `locale`, loading them on first use.
    pub fn definitions(&mut self, locale: Option<&Locale>) -> Result<&Definitions, DefinitionsError> {
        if self.check_refresh && self.refresh_required() {
            self.refresh();
        }

        match self.cache.entry(locale.cloned()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let definitions = load_definitions(&self.sources, &mut self.monitor, locale)?;
                Ok(&*entry.insert(definitions))
            }
        }
    }

    /// Returns a copy of the definition `name` for `locale`.
    ///
    /// The copy is independent of the cached definition, so callers may
    /// mutate it freely.
    pub fn definition(
        &mut self,
        name: &str,
        locale: Option<&Locale>,
    ) -> Result<Option<Definition>, DefinitionsError> {
        Ok(self.definitions(locale)?.get(name).cloned())
    }

    /// Whether any file read so far changed on disk.
    pub fn refresh_required(&self) -> bool {
        self.monitor.refresh_required()
    }

    /// Drops every cached locale; the next lookup re-reads the files.
    pub fn refresh(&mut self) {
        debug!(cached_locales = self.cache.len(), "dropping cached definitions");
        self.cache.clear();
        self.monitor.clear();
    }
}

fn load_definitions(
    sources: &[FileSource],
    monitor: &mut RefreshMonitor,
    locale: Option<&Locale>,
) -> Result<Definitions, DefinitionsError> {
    let mut merged = Definitions::new();

    for postfix in locale::postfixes(locale) {
        for source in sources {
            if let Some(file) = source.load(&postfix)? {
                if !monitor.is_tracking(&file.path) {
                    debug!(path = %file.path.display(), "monitoring definitions file");
                }
                monitor.record(file.path, file.modified);
                merged.extend(file.definitions);
            }
        }
    }

    merged.resolve_inheritance()?;
    debug!(
        locale = %locale.map(Locale::to_string).unwrap_or_default(),
        count = merged.len(),
        "loaded definitions"
    );
    Ok(merged)
}
