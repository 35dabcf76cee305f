//! TOML definitions documents.
//!
//! ```toml
//! [definitions.base]
//! template = "/layouts/classic.html"
//! role = "admin, editor"
//!
//! [definitions.base.attributes.title]
//! type = "string"
//! value = "Welcome"
//!
//! [definitions.base.attributes.menu]
//! type = "list"
//! inherit = true
//! cascade = true
//! items = [{ type = "string", value = "home" }]
//!
//! [definitions.home]
//! extends = "base"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{Definition, Definitions, DefinitionsError};
use crate::attribute::{Attribute, ListAttribute};

#[derive(Debug, Deserialize)]
struct DefinitionsDocument {
    #[serde(default)]
    definitions: BTreeMap<String, RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    extends: Option<String>,
    template: Option<String>,
    role: Option<String>,
    preparer: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, RawAttribute>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AttributeKind {
    #[default]
    String,
    Expression,
    Template,
    Definition,
    List,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
    #[serde(rename = "type", default)]
    kind: AttributeKind,
    value: Option<String>,
    #[serde(default)]
    items: Vec<RawAttribute>,
    #[serde(default)]
    inherit: bool,
    #[serde(default)]
    cascade: bool,
}

impl RawAttribute {
    fn into_attribute(self, definition: &str, name: &str) -> Result<Attribute, DefinitionsError> {
        let invalid = |reason: &str| DefinitionsError::InvalidAttribute {
            definition: definition.to_owned(),
            attribute: name.to_owned(),
            reason: reason.to_owned(),
        };

        let scalar: fn(String) -> Attribute = match self.kind {
            AttributeKind::String => Attribute::String,
            AttributeKind::Expression => Attribute::Expression,
            AttributeKind::Template => Attribute::Template,
            AttributeKind::Definition => Attribute::Definition,
            AttributeKind::List => {
                if self.value.is_some() {
                    return Err(invalid("list attributes take `items`, not `value`"));
                }
                let items = self
                    .items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        item.into_attribute(definition, &format!("{name}[{index}]"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let mut list = ListAttribute::new(items);
                list.set_inherit(self.inherit);
                return Ok(Attribute::List(list));
            }
        };

        if !self.items.is_empty() {
            return Err(invalid("only list attributes take `items`"));
        }
        let value = self.value.ok_or_else(|| invalid("missing `value`"))?;
        Ok(scalar(value))
    }
}

impl RawDefinition {
    fn into_definition(self, name: String) -> Result<Definition, DefinitionsError> {
        let mut definition = Definition::new(name);
        if let Some(parent) = self.extends {
            definition.set_extends(parent);
        }
        if let Some(template) = self.template {
            definition.set_template(template);
        }
        if let Some(role) = self.role {
            definition.set_role(&role);
        }
        if let Some(preparer) = self.preparer {
            definition.set_preparer(preparer);
        }
        for (attribute_name, raw) in self.attributes {
            let cascade = raw.cascade;
            let attribute = raw.into_attribute(&definition.name, &attribute_name)?;
            definition.put_attribute_cascade(attribute_name, attribute, cascade);
        }
        Ok(definition)
    }
}

/// Parses a definitions document. `path` is only used in error messages.
///
/// Inheritance is left unresolved; see [`Definitions::resolve_inheritance`].
pub fn parse_definitions(contents: &str, path: &Path) -> Result<Definitions, DefinitionsError> {
    let document: DefinitionsDocument =
        toml::from_str(contents).map_err(|e| DefinitionsError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    document
        .definitions
        .into_iter()
        .map(|(name, raw)| raw.into_definition(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Definitions, DefinitionsError> {
        parse_definitions(contents, Path::new("test.toml"))
    }

    #[test]
    fn test_parse_full_definition() {
        let definitions = parse(
            r#"
            [definitions.base]
            template = "/layouts/classic.html"
            role = "admin, editor"
            preparer = "menu-preparer"

            [definitions.base.attributes.title]
            value = "Welcome"

            [definitions.base.attributes.body]
            type = "template"
            value = "/body.html"

            [definitions.base.attributes.menu]
            type = "list"
            inherit = true
            cascade = true
            items = [
                { type = "string", value = "home" },
                { type = "definition", value = "menu.item" },
            ]

            [definitions.home]
            extends = "base"
            "#,
        )
        .unwrap();

        assert_eq!(definitions.len(), 2);
        let base = definitions.get("base").unwrap();
        assert_eq!(base.template(), Some("/layouts/classic.html"));
        assert_eq!(base.preparer(), Some("menu-preparer"));
        assert_eq!(base.role().as_deref(), Some("admin,editor"));
        assert_eq!(base.local_attribute("title"), Some(&Attribute::string("Welcome")));
        assert_eq!(
            base.local_attribute("body"),
            Some(&Attribute::template("/body.html"))
        );
        let menu = base.cascaded_attribute("menu").and_then(Attribute::as_list).unwrap();
        assert!(menu.is_inherit());
        assert_eq!(
            menu.items(),
            &[Attribute::string("home"), Attribute::definition("menu.item")]
        );
        assert_eq!(definitions.get("home").unwrap().extends(), Some("base"));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_value() {
        let result = parse(
            r#"
            [definitions.page.attributes.body]
            type = "template"
            "#,
        );

        assert!(matches!(
            result,
            Err(DefinitionsError::InvalidAttribute { ref attribute, .. }) if attribute == "body"
        ));
    }

    #[test]
    fn test_nested_item_error_names_index() {
        let result = parse(
            r#"
            [definitions.page.attributes.menu]
            type = "list"
            items = [{ type = "string", value = "ok" }, { type = "template" }]
            "#,
        );

        assert!(matches!(
            result,
            Err(DefinitionsError::InvalidAttribute { ref attribute, .. }) if attribute == "menu[1]"
        ));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let result = parse(
            r#"
            [definitions.page.attributes.body]
            type = "velocity"
            value = "x"
            "#,
        );

        assert!(matches!(result, Err(DefinitionsError::ParseError { .. })));
    }
}
