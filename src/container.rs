//! Container tying definitions to the contexts of a render pass.

use std::collections::HashMap;

use tracing::debug;

use crate::attribute::Attribute;
use crate::context::AttributeContext;
use crate::definition::{Definition, DefinitionsFactory, Locale};
use crate::Error;

/// Holds the definitions factories and the stack of attribute contexts of the
/// render in progress.
///
/// Besides the default factory, factories can be registered under a key, so
/// that different parts of an application use different definitions. The
/// caller picks the key for each lookup.
///
/// ## Example
///
/// ```no_run
/// use tiles_context::{DefinitionsFactory, TilesContainer};
///
/// let mut container = TilesContainer::builder()
///     .with_definitions(
///         DefinitionsFactory::builder()
///             .with_file("config/tiles.toml", true)
///             .build()?,
///     )
///     .with_keyed_definitions(
///         "admin",
///         DefinitionsFactory::builder()
///             .with_file("config/admin.toml", true)
///             .build()?,
///     )
///     .build()?;
///
/// if let Some(context) = container.prepare_context("home", Some("admin"), None, ["editor"])? {
///     println!("rendering {:?}", context.template());
///     container.end_context();
/// }
/// # Ok::<(), tiles_context::Error>(())
/// ```
#[derive(Debug)]
pub struct TilesContainer {
    definitions: DefinitionsFactory,
    keyed: HashMap<String, DefinitionsFactory>,
    contexts: Vec<AttributeContext>,
}

impl TilesContainer {
    /// Creates a new builder for constructing a `TilesContainer`.
    pub fn builder() -> TilesContainerBuilder {
        TilesContainerBuilder {
            definitions: None,
            keyed: HashMap::new(),
        }
    }

    /// The factory registered under `key`, or the default one.
    pub fn definitions_factory(&mut self, key: Option<&str>) -> &mut DefinitionsFactory {
        match key.and_then(|k| self.keyed.get_mut(k)) {
            Some(factory) => factory,
            None => &mut self.definitions,
        }
    }

    /// The factory registered under `key`, without falling back to the default.
    pub fn proper_definitions_factory(&mut self, key: &str) -> Option<&mut DefinitionsFactory> {
        self.keyed.get_mut(key)
    }

    /// Looks `name` up in the keyed factory first, then in the default one.
    pub fn definition(
        &mut self,
        name: &str,
        key: Option<&str>,
        locale: Option<&Locale>,
    ) -> Result<Option<Definition>, Error> {
        if let Some(factory) = key.and_then(|k| self.keyed.get_mut(k)) {
            if let Some(definition) = factory.definition(name, locale)? {
                return Ok(Some(definition));
            }
        }
        Ok(self.definitions.definition(name, locale)?)
    }

    /// Pushes a new context carrying the cascaded attributes of the current one.
    pub fn start_context(&mut self) -> &mut AttributeContext {
        let mut context = AttributeContext::new();
        if let Some(parent) = self.contexts.last() {
            context.inherit_cascaded_attributes(parent);
        }
        self.contexts.push(context);
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    /// Pops the current context.
    pub fn end_context(&mut self) -> Option<AttributeContext> {
        self.contexts.pop()
    }

    pub fn current_context(&self) -> Option<&AttributeContext> {
        self.contexts.last()
    }

    /// The current context, starting one if the stack is empty.
    pub fn current_context_mut(&mut self) -> &mut AttributeContext {
        if self.contexts.is_empty() {
            return self.start_context();
        }
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Binds an attribute in the current context.
    pub fn put_attribute(&mut self, name: impl Into<String>, attribute: Attribute, cascade: bool) {
        self.current_context_mut()
            .put_attribute_cascade(name, attribute, cascade);
    }

    /// Starts a context for rendering definition `name`.
    ///
    /// Returns `Ok(None)`, without touching the stack, when the definition is
    /// restricted to roles the user doesn't hold. Otherwise the new context
    /// stays on the stack until [`end_context`](Self::end_context) and a copy
    /// of it is returned.
    pub fn prepare_context<I>(
        &mut self,
        name: &str,
        key: Option<&str>,
        locale: Option<&Locale>,
        user_roles: I,
    ) -> Result<Option<AttributeContext>, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let definition = self
            .definition(name, key, locale)?
            .ok_or_else(|| Error::DefinitionNotFound(name.to_string()))?;

        if !definition.is_permitted(user_roles) {
            debug!(definition = name, "user lacks the roles to render definition");
            return Ok(None);
        }

        let context = self.start_context();
        context.inherit(definition.context());
        Ok(Some(context.clone()))
    }
}

/// Builder for constructing a [`TilesContainer`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct TilesContainerBuilder {
    definitions: Option<DefinitionsFactory>,
    keyed: HashMap<String, DefinitionsFactory>,
}

impl TilesContainerBuilder {
    /// Sets the default definitions factory.
    pub fn with_definitions(mut self, factory: DefinitionsFactory) -> Self {
        self.definitions = Some(factory);
        self
    }

    /// Registers a factory under `key`, replacing any previous one.
    pub fn with_keyed_definitions(mut self, key: impl Into<String>, factory: DefinitionsFactory) -> Self {
        self.keyed.insert(key.into(), factory);
        self
    }

    /// Builds the `TilesContainer`.
    ///
    /// Returns an error if no default definitions factory was provided.
    pub fn build(self) -> Result<TilesContainer, Error> {
        Ok(TilesContainer {
            definitions: self.definitions.ok_or(Error::MissingDefinitions)?,
            keyed: self.keyed,
            contexts: Vec::new(),
        })
    }
}
