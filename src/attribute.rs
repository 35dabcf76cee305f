//! Attributes: the named fragments a template is composed of.

/// A value bound to a name inside an [`AttributeContext`](crate::AttributeContext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Literal text, rendered as-is.
    String(String),
    /// An expression evaluated by the renderer.
    Expression(String),
    /// Path of a nested template.
    Template(String),
    /// Name of a nested definition.
    Definition(String),
    /// An ordered list of child attributes.
    List(ListAttribute),
}

impl Attribute {
    pub fn string(value: impl Into<String>) -> Self {
        Attribute::String(value.into())
    }

    pub fn expression(value: impl Into<String>) -> Self {
        Attribute::Expression(value.into())
    }

    pub fn template(path: impl Into<String>) -> Self {
        Attribute::Template(path.into())
    }

    pub fn definition(name: impl Into<String>) -> Self {
        Attribute::Definition(name.into())
    }

    pub fn as_list(&self) -> Option<&ListAttribute> {
        match self {
            Attribute::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListAttribute> {
        match self {
            Attribute::List(list) => Some(list),
            _ => None,
        }
    }

    /// Merges `parent` into `self` when both are lists and `self` asks to inherit.
    ///
    /// Returns `true` if a merge took place. Any other combination leaves `self`
    /// untouched.
    pub(crate) fn inherit_from(&mut self, parent: &Attribute) -> bool {
        match (self, parent) {
            (Attribute::List(child), Attribute::List(parent)) if child.inherit => {
                child.inherit(parent);
                true
            }
            _ => false,
        }
    }
}

impl From<ListAttribute> for Attribute {
    fn from(list: ListAttribute) -> Self {
        Attribute::List(list)
    }
}

/// An attribute holding an ordered sequence of child attributes.
///
/// When `inherit` is set, a parent list of the same name is merged in front of
/// this list's own elements instead of being shadowed by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAttribute {
    items: Vec<Attribute>,
    inherit: bool,
}

impl ListAttribute {
    pub fn new(items: Vec<Attribute>) -> Self {
        Self {
            items,
            inherit: false,
        }
    }

    pub fn inheriting(items: Vec<Attribute>) -> Self {
        Self {
            items,
            inherit: true,
        }
    }

    pub fn items(&self) -> &[Attribute] {
        &self.items
    }

    pub fn push(&mut self, item: Attribute) {
        self.items.push(item);
    }

    pub fn is_inherit(&self) -> bool {
        self.inherit
    }

    pub fn set_inherit(&mut self, inherit: bool) {
        self.inherit = inherit;
    }

    /// Prepends the parent's elements: parent items first, then this list's own.
    pub fn inherit(&mut self, parent: &ListAttribute) {
        let mut merged = Vec::with_capacity(parent.items.len() + self.items.len());
        merged.extend(parent.items.iter().cloned());
        merged.append(&mut self.items);
        self.items = merged;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
