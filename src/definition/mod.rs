//! Named, reusable template configurations and how they are loaded.

mod builder;
mod error;
mod file;
mod locale;
mod reader;
mod refresh;

use std::collections::{HashMap, HashSet};
use std::ops::{Deref, DerefMut};

pub use builder::{DefinitionsFactory, DefinitionsFactoryBuilder};
pub use error::DefinitionsError;
pub use file::FileSource;
pub use locale::Locale;
pub use reader::parse_definitions;
pub use refresh::RefreshMonitor;

use crate::context::AttributeContext;

/// A named [`AttributeContext`], optionally extending another definition.
///
/// Dereferences to its context, so lookups and mutations read the same as on
/// a plain context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    name: String,
    extends: Option<String>,
    context: AttributeContext,
    // Set once the parent has been folded in.
    inherited: bool,
}

impl Definition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_context(name: impl Into<String>, context: AttributeContext) -> Self {
        Self {
            name: name.into(),
            extends: None,
            context,
            inherited: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    pub fn set_extends(&mut self, parent: impl Into<String>) {
        self.extends = Some(parent.into());
        self.inherited = false;
    }

    /// Whether the definition it extends has already been folded in.
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn context(&self) -> &AttributeContext {
        &self.context
    }

    pub fn into_context(self) -> AttributeContext {
        self.context
    }
}

impl Deref for Definition {
    type Target = AttributeContext;

    fn deref(&self) -> &AttributeContext {
        &self.context
    }
}

impl DerefMut for Definition {
    fn deref_mut(&mut self) -> &mut AttributeContext {
        &mut self.context
    }
}

/// A table of definitions keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    by_name: HashMap<String, Definition>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Adds `definition`, replacing any definition of the same name.
    pub fn insert(&mut self, definition: Definition) {
        self.by_name.insert(definition.name.clone(), definition);
    }

    /// Adds every definition of `overlay`, later ones replacing earlier ones.
    pub fn extend(&mut self, overlay: Definitions) {
        self.by_name.extend(overlay.by_name);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Folds every definition over the definition it extends.
    ///
    /// Parents are resolved before their children, so a chain of any depth ends
    /// up fully merged. Definitions already folded are left alone, so calling
    /// this again only resolves newly inserted ones. Fails if a parent is
    /// missing or the chain loops.
    pub fn resolve_inheritance(&mut self) -> Result<(), DefinitionsError> {
        let names: Vec<String> = self.by_name.keys().cloned().collect();
        let mut resolved = HashSet::new();
        for name in names {
            self.resolve(&name, &mut resolved, &mut Vec::new())?;
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        name: &str,
        resolved: &mut HashSet<String>,
        chain: &mut Vec<String>,
    ) -> Result<(), DefinitionsError> {
        if resolved.contains(name) {
            return Ok(());
        }
        if chain.iter().any(|n| n == name) {
            chain.push(name.to_owned());
            return Err(DefinitionsError::CircularInheritance {
                chain: chain.join(" -> "),
            });
        }

        let Some(parent_name) = self
            .by_name
            .get(name)
            .filter(|d| !d.inherited)
            .and_then(|d| d.extends.clone())
        else {
            resolved.insert(name.to_owned());
            return Ok(());
        };
        if !self.by_name.contains_key(&parent_name) {
            return Err(DefinitionsError::ParentNotFound {
                definition: name.to_owned(),
                parent: parent_name,
            });
        }

        chain.push(name.to_owned());
        self.resolve(&parent_name, resolved, chain)?;
        chain.pop();

        if let Some(parent) = self.by_name.get(&parent_name).map(|d| d.context.clone()) {
            if let Some(child) = self.by_name.get_mut(name) {
                child.context.inherit(&parent);
                child.inherited = true;
            }
        }
        resolved.insert(name.to_owned());
        Ok(())
    }
}

impl FromIterator<Definition> for Definitions {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut definitions = Definitions::new();
        for definition in iter {
            definitions.insert(definition);
        }
        definitions
    }
}
