//! Per-render attribute contexts and the merge rules between them.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::attribute::Attribute;

/// Name to attribute bindings of one partition.
pub type AttributeMap = HashMap<String, Attribute>;

/// Read access to everything a context exposes to a child or a renderer.
///
/// [`AttributeContext::inherit`], [`AttributeContext::inherit_cascaded_attributes`]
/// and [`AttributeContext::from_source`] only go through this trait, so any
/// representation of a context can act as a parent.
pub trait AttributeSource {
    fn template(&self) -> Option<&str>;

    /// Roles allowed to see the context. Empty means unrestricted.
    fn roles(&self) -> &BTreeSet<String>;

    fn preparer(&self) -> Option<&str>;

    fn local_attribute(&self, name: &str) -> Option<&Attribute>;

    fn cascaded_attribute(&self, name: &str) -> Option<&Attribute>;

    fn local_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn cascaded_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// The attribute state of a single render pass.
///
/// Bindings live in two partitions: local ones, visible only here unless a
/// child explicitly inherits them, and cascaded ones, which propagate to
/// nested contexts. Lookups try the local partition first.
///
/// The local partition always exists. The cascaded partition may be absent
/// altogether, which is observable through [`add_missing`](Self::add_missing).
///
/// Cloning, [`from_source`](Self::from_source) and every inherit operation copy
/// attribute values, so a derived context never shares storage with its source.
///
/// ## Example
///
/// ```
/// use tiles_context::{Attribute, AttributeContext};
///
/// let mut parent = AttributeContext::new();
/// parent.set_template("/layouts/classic.html");
/// parent.put_attribute_cascade("header", Attribute::template("/header.html"), true);
///
/// let mut child = AttributeContext::new();
/// child.put_attribute("body", Attribute::string("Hello"));
/// child.inherit(&parent);
///
/// assert_eq!(child.template(), Some("/layouts/classic.html"));
/// assert!(child.attribute("header").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeContext {
    template: Option<String>,
    roles: BTreeSet<String>,
    preparer: Option<String>,
    attributes: AttributeMap,
    cascaded_attributes: Option<AttributeMap>,
}

impl AttributeContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context whose local partition is seeded with `attributes`.
    pub fn with_attributes(attributes: AttributeMap) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Copies any [`AttributeSource`] into a new, independent context.
    pub fn from_source<S: AttributeSource + ?Sized>(source: &S) -> Self {
        let mut context = Self {
            template: source.template().map(str::to_owned),
            roles: source.roles().clone(),
            preparer: source.preparer().map(str::to_owned),
            attributes: copy_partition(source.local_attribute_names(), |name| {
                source.local_attribute(name)
            }),
            cascaded_attributes: None,
        };
        context.inherit_cascaded_attributes(source);
        context
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = Some(template.into());
    }

    pub fn preparer(&self) -> Option<&str> {
        self.preparer.as_deref()
    }

    pub fn set_preparer(&mut self, preparer: impl Into<String>) {
        self.preparer = Some(preparer.into());
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn set_roles(&mut self, roles: BTreeSet<String>) {
        self.roles = roles;
    }

    /// Returns the roles joined with `,`, or `None` when unrestricted.
    pub fn role(&self) -> Option<String> {
        if self.roles.is_empty() {
            return None;
        }
        Some(self.roles.iter().map(String::as_str).collect::<Vec<_>>().join(","))
    }

    /// Parses a comma-separated role list. Whitespace around each role is
    /// ignored; a blank string removes every restriction.
    pub fn set_role(&mut self, role: &str) {
        self.roles = role
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_owned)
            .collect();
    }

    /// Whether a user holding `user_roles` may see this context.
    pub fn is_permitted<I>(&self, user_roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.roles.is_empty()
            || user_roles
                .into_iter()
                .any(|role| self.roles.contains(role.as_ref()))
    }

    /// Looks up `name` locally, then in the cascaded partition.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.local_attribute(name)
            .or_else(|| self.cascaded_attribute(name))
    }

    pub fn local_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn cascaded_attribute(&self, name: &str) -> Option<&Attribute> {
        self.cascaded_attributes.as_ref()?.get(name)
    }

    /// Names bound in either partition, each reported once, in no particular order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        let mut names: HashSet<&str> = self.attributes.keys().map(String::as_str).collect();
        if let Some(cascaded) = &self.cascaded_attributes {
            names.extend(cascaded.keys().map(String::as_str));
        }
        names.into_iter()
    }

    /// Binds `name` in the local partition.
    pub fn put_attribute(&mut self, name: impl Into<String>, value: Attribute) {
        self.attributes.insert(name.into(), value);
    }

    /// Binds `name` in the cascaded partition if `cascade` is set, locally otherwise.
    pub fn put_attribute_cascade(&mut self, name: impl Into<String>, value: Attribute, cascade: bool) {
        if cascade {
            self.cascaded_attributes
                .get_or_insert_with(AttributeMap::new)
                .insert(name.into(), value);
        } else {
            self.put_attribute(name, value);
        }
    }

    /// Adds every entry to the local partition, replacing existing bindings.
    pub fn add_all<I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (String, Attribute)>,
    {
        self.attributes.extend(attributes);
    }

    /// Adds entries to the local partition only where no local binding exists.
    ///
    /// An entry is also skipped when the context has a cascaded partition that
    /// does not bind the same name: a default only fills a slot the cascaded
    /// partition already knows about, or any slot when there is no cascaded
    /// partition at all.
    pub fn add_missing<I>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (String, Attribute)>,
    {
        for (name, value) in defaults {
            if self.attributes.contains_key(&name) {
                continue;
            }
            let cascaded_allows = self
                .cascaded_attributes
                .as_ref()
                .map_or(true, |cascaded| cascaded.contains_key(&name));
            if cascaded_allows {
                self.attributes.insert(name, value);
            }
        }
    }

    /// Resets template, preparer and roles and empties both partitions.
    pub fn clear(&mut self) {
        self.template = None;
        self.preparer = None;
        self.roles.clear();
        self.attributes.clear();
        if let Some(cascaded) = &mut self.cascaded_attributes {
            cascaded.clear();
        }
    }

    /// Replaces this context's cascaded partition with a copy of `parent`'s.
    pub fn inherit_cascaded_attributes<S: AttributeSource + ?Sized>(&mut self, parent: &S) {
        self.cascaded_attributes = Some(copy_partition(parent.cascaded_attribute_names(), |name| {
            parent.cascaded_attribute(name)
        }));
    }

    /// Fills every unset part of this context from `parent`.
    ///
    /// Template, roles and preparer are taken from the parent only when unset
    /// here. A parent cascaded attribute is copied into the cascaded partition
    /// when this context binds the name nowhere; a local binding of the same
    /// name only blocks the copy. A parent local attribute is copied into the
    /// local partition when there is no local binding. Lists merge only within
    /// the same partition: when both sides hold a list there and the existing
    /// one is marked `inherit`, the parent's items are prepended to it.
    /// Existing values are never replaced.
    pub fn inherit<S: AttributeSource + ?Sized>(&mut self, parent: &S) {
        if self.template.is_none() {
            self.template = parent.template().map(str::to_owned);
        }
        if self.roles.is_empty() {
            self.roles = parent.roles().clone();
        }
        if self.preparer.is_none() {
            self.preparer = parent.preparer().map(str::to_owned);
        }

        for name in parent.cascaded_attribute_names() {
            let Some(value) = parent.cascaded_attribute(name) else {
                continue;
            };
            if self.attributes.contains_key(name) {
                continue;
            }
            if let Some(existing) = self
                .cascaded_attributes
                .as_mut()
                .and_then(|cascaded| cascaded.get_mut(name))
            {
                existing.inherit_from(value);
            } else {
                self.cascaded_attributes
                    .get_or_insert_with(AttributeMap::new)
                    .insert(name.to_owned(), value.clone());
            }
        }

        for name in parent.local_attribute_names() {
            let Some(value) = parent.local_attribute(name) else {
                continue;
            };
            match self.attributes.get_mut(name) {
                Some(existing) => {
                    existing.inherit_from(value);
                }
                None => {
                    self.attributes.insert(name.to_owned(), value.clone());
                }
            }
        }
    }
}

impl AttributeSource for AttributeContext {
    fn template(&self) -> Option<&str> {
        self.template()
    }

    fn roles(&self) -> &BTreeSet<String> {
        self.roles()
    }

    fn preparer(&self) -> Option<&str> {
        self.preparer()
    }

    fn local_attribute(&self, name: &str) -> Option<&Attribute> {
        self.local_attribute(name)
    }

    fn cascaded_attribute(&self, name: &str) -> Option<&Attribute> {
        self.cascaded_attribute(name)
    }

    fn local_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.attributes.keys().map(String::as_str))
    }

    fn cascaded_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match &self.cascaded_attributes {
            Some(cascaded) => Box::new(cascaded.keys().map(String::as_str)),
            None => Box::new(std::iter::empty()),
        }
    }
}

fn copy_partition<'a>(
    names: impl Iterator<Item = &'a str>,
    lookup: impl Fn(&str) -> Option<&'a Attribute>,
) -> AttributeMap {
    names
        .filter_map(|name| lookup(name).map(|value| (name.to_owned(), value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::ListAttribute;
    use proptest::prelude::*;

    fn list(items: &[&str], inherit: bool) -> Attribute {
        let items = items.iter().map(|s| Attribute::string(*s)).collect();
        if inherit {
            ListAttribute::inheriting(items).into()
        } else {
            ListAttribute::new(items).into()
        }
    }

    /// A context kept behind a different representation, to exercise the
    /// trait-only paths.
    struct FlatSource {
        roles: BTreeSet<String>,
        local: Vec<(String, Attribute)>,
        cascaded: Vec<(String, Attribute)>,
    }

    impl AttributeSource for FlatSource {
        fn template(&self) -> Option<&str> {
            Some("/flat.html")
        }

        fn roles(&self) -> &BTreeSet<String> {
            &self.roles
        }

        fn preparer(&self) -> Option<&str> {
            None
        }

        fn local_attribute(&self, name: &str) -> Option<&Attribute> {
            self.local.iter().find(|(n, _)| n == name).map(|(_, a)| a)
        }

        fn cascaded_attribute(&self, name: &str) -> Option<&Attribute> {
            self.cascaded.iter().find(|(n, _)| n == name).map(|(_, a)| a)
        }

        fn local_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
            Box::new(self.local.iter().map(|(n, _)| n.as_str()))
        }

        fn cascaded_attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
            Box::new(self.cascaded.iter().map(|(n, _)| n.as_str()))
        }
    }

    #[test]
    fn test_lookup_prefers_local() {
        let mut ctx = AttributeContext::new();
        ctx.put_attribute_cascade("title", Attribute::string("cascaded"), true);
        ctx.put_attribute("title", Attribute::string("local"));

        assert_eq!(ctx.attribute("title"), Some(&Attribute::string("local")));
        assert_eq!(
            ctx.cascaded_attribute("title"),
            Some(&Attribute::string("cascaded"))
        );
        assert_eq!(ctx.attribute("missing"), None);
        assert_eq!(ctx.local_attribute("missing"), None);
        assert_eq!(ctx.cascaded_attribute("missing"), None);
    }

    #[test]
    fn test_attribute_names_union() {
        let mut ctx = AttributeContext::new();
        assert_eq!(ctx.attribute_names().count(), 0);

        ctx.put_attribute("a", Attribute::string("1"));
        ctx.put_attribute("b", Attribute::string("2"));
        ctx.put_attribute_cascade("b", Attribute::string("3"), true);
        ctx.put_attribute_cascade("c", Attribute::string("4"), true);

        let names: BTreeSet<&str> = ctx.attribute_names().collect();
        assert_eq!(names, BTreeSet::from(["a", "b", "c"]));
        assert_eq!(ctx.attribute_names().count(), 3);
    }

    #[test]
    fn test_with_attributes_seeds_local_partition() {
        let attrs = AttributeMap::from([("body".to_string(), Attribute::string("x"))]);
        let ctx = AttributeContext::with_attributes(attrs);

        assert_eq!(ctx.local_attribute("body"), Some(&Attribute::string("x")));
        assert_eq!(ctx.template(), None);
        assert!(ctx.roles().is_empty());
        assert_eq!(ctx.cascaded_attribute("body"), None);
    }

    #[test]
    fn test_clone_is_isolated() {
        let mut original = AttributeContext::new();
        original.set_template("/main.html");
        original.put_attribute("menu", list(&["a"], true));
        original.put_attribute_cascade("header", Attribute::string("h"), true);

        let mut copy = original.clone();
        copy.put_attribute("body", Attribute::string("b"));
        if let Some(menu) = copy.attributes.get_mut("menu").and_then(Attribute::as_list_mut) {
            menu.push(Attribute::string("b"));
        }
        copy.clear();

        assert_eq!(original.template(), Some("/main.html"));
        assert_eq!(original.local_attribute("menu"), Some(&list(&["a"], true)));
        assert_eq!(original.attribute("body"), None);
        assert_eq!(original.cascaded_attribute("header"), Some(&Attribute::string("h")));
    }

    #[test]
    fn test_from_source_copies_through_trait() {
        let source = FlatSource {
            roles: BTreeSet::from(["admin".to_string()]),
            local: vec![("body".into(), Attribute::string("b"))],
            cascaded: vec![("header".into(), Attribute::string("h"))],
        };

        let ctx = AttributeContext::from_source(&source);

        assert_eq!(ctx.template(), Some("/flat.html"));
        assert_eq!(ctx.role().as_deref(), Some("admin"));
        assert_eq!(ctx.local_attribute("body"), Some(&Attribute::string("b")));
        assert_eq!(ctx.cascaded_attribute("header"), Some(&Attribute::string("h")));
    }

    #[test]
    fn test_role_round_trip() {
        let mut ctx = AttributeContext::new();
        ctx.set_role("a, b ,c");

        let role = ctx.role().unwrap();
        let mut tokens: Vec<&str> = role.split(',').collect();
        tokens.sort_unstable();
        assert_eq!(tokens, ["a", "b", "c"]);

        ctx.set_role("   ");
        assert_eq!(ctx.role(), None);
    }

    #[test]
    fn test_is_permitted() {
        let mut ctx = AttributeContext::new();
        assert!(ctx.is_permitted(Vec::<String>::new()));

        ctx.set_role("admin,editor");
        assert!(ctx.is_permitted(["guest", "editor"]));
        assert!(!ctx.is_permitted(["guest"]));
    }

    #[test]
    fn test_add_all_replaces() {
        let mut ctx = AttributeContext::new();
        ctx.put_attribute("a", Attribute::string("old"));
        ctx.put_attribute("b", Attribute::string("keep"));

        ctx.add_all([
            ("a".to_string(), Attribute::string("new")),
            ("c".to_string(), Attribute::string("added")),
        ]);

        assert_eq!(ctx.local_attribute("a"), Some(&Attribute::string("new")));
        assert_eq!(ctx.local_attribute("b"), Some(&Attribute::string("keep")));
        assert_eq!(ctx.local_attribute("c"), Some(&Attribute::string("added")));
    }

    #[test]
    fn test_add_missing_without_cascaded_partition() {
        let mut ctx = AttributeContext::new();
        ctx.put_attribute("a", Attribute::string("mine"));

        ctx.add_missing([
            ("a".to_string(), Attribute::string("default")),
            ("b".to_string(), Attribute::string("default")),
        ]);

        assert_eq!(ctx.local_attribute("a"), Some(&Attribute::string("mine")));
        assert_eq!(ctx.local_attribute("b"), Some(&Attribute::string("default")));
    }

    // Surprising but intended: once a cascaded partition exists, defaults only
    // fill names that partition already binds.
    #[test]
    fn test_add_missing_guarded_by_cascaded_partition() {
        let mut ctx = AttributeContext::new();
        ctx.put_attribute_cascade("x", Attribute::string("cascaded"), true);

        ctx.add_missing([("x".to_string(), Attribute::string("v"))]);
        assert_eq!(ctx.local_attribute("x"), Some(&Attribute::string("v")));

        let mut other = AttributeContext::new();
        other.put_attribute_cascade("y", Attribute::string("cascaded"), true);

        other.add_missing([("x".to_string(), Attribute::string("v"))]);
        assert_eq!(other.local_attribute("x"), None);
    }

    #[test]
    fn test_clear_on_fresh_context() {
        let mut ctx = AttributeContext::new();
        ctx.clear();
        assert_eq!(ctx, AttributeContext::new());

        ctx.set_template("/t.html");
        ctx.set_preparer("prep");
        ctx.set_role("admin");
        ctx.put_attribute("a", Attribute::string("1"));
        ctx.put_attribute_cascade("b", Attribute::string("2"), true);
        ctx.clear();

        assert_eq!(ctx.template(), None);
        assert_eq!(ctx.preparer(), None);
        assert_eq!(ctx.role(), None);
        assert_eq!(ctx.attribute_names().count(), 0);
    }

    #[test]
    fn test_inherit_cascaded_replaces_wholesale() {
        let mut parent = AttributeContext::new();
        parent.put_attribute_cascade("header", Attribute::string("h"), true);
        parent.put_attribute("footer", Attribute::string("f"));

        let mut child = AttributeContext::new();
        child.put_attribute_cascade("stale", Attribute::string("s"), true);
        child.inherit_cascaded_attributes(&parent);

        assert_eq!(child.cascaded_attribute("header"), Some(&Attribute::string("h")));
        assert_eq!(child.cascaded_attribute("stale"), None);
        assert_eq!(child.attribute("footer"), None);

        parent.put_attribute_cascade("header", Attribute::string("changed"), true);
        assert_eq!(child.cascaded_attribute("header"), Some(&Attribute::string("h")));
    }

    #[test]
    fn test_inherit_scenario() {
        let mut parent = AttributeContext::new();
        parent.set_template("/layouts/classic.html");
        parent.set_preparer("menu");
        parent.set_role("admin");
        parent.put_attribute_cascade("header", Attribute::template("/header.html"), true);
        parent.put_attribute("footer", Attribute::template("/footer.html"));

        let mut child = AttributeContext::new();
        child.put_attribute("body", Attribute::string("X"));
        child.set_preparer("own");

        child.inherit(&parent);

        assert_eq!(child.attribute("body"), Some(&Attribute::string("X")));
        assert_eq!(
            child.cascaded_attribute("header"),
            Some(&Attribute::template("/header.html"))
        );
        assert_eq!(
            child.local_attribute("footer"),
            Some(&Attribute::template("/footer.html"))
        );
        assert_eq!(child.template(), parent.template());
        assert_eq!(child.preparer(), Some("own"));
        assert_eq!(child.role().as_deref(), Some("admin"));
    }

    #[test]
    fn test_inherit_keeps_child_roles() {
        let mut parent = AttributeContext::new();
        parent.set_role("admin");
        let mut child = AttributeContext::new();
        child.set_role("editor");

        child.inherit(&parent);

        assert_eq!(child.role().as_deref(), Some("editor"));
    }

    #[test]
    fn test_inherit_cascaded_skips_names_bound_locally() {
        let mut parent = AttributeContext::new();
        parent.put_attribute_cascade("title", Attribute::string("parent"), true);

        let mut child = AttributeContext::new();
        child.put_attribute("title", Attribute::string("child"));
        child.inherit(&parent);

        assert_eq!(child.attribute("title"), Some(&Attribute::string("child")));
        assert_eq!(child.cascaded_attribute("title"), None);
    }

    #[test]
    fn test_inherit_merges_inheriting_lists() {
        let mut parent = AttributeContext::new();
        parent.put_attribute("menu", list(&["home", "about"], false));
        parent.put_attribute_cascade("scripts", list(&["base.js"], false), true);

        let mut child = AttributeContext::new();
        child.put_attribute("menu", list(&["contact"], true));
        child.put_attribute_cascade("scripts", list(&["page.js"], true), true);

        child.inherit(&parent);

        assert_eq!(
            child.local_attribute("menu"),
            Some(&list(&["home", "about", "contact"], true))
        );
        assert_eq!(
            child.cascaded_attribute("scripts"),
            Some(&list(&["base.js", "page.js"], true))
        );
        assert_eq!(parent.local_attribute("menu"), Some(&list(&["home", "about"], false)));
    }

    #[test]
    fn test_inherit_merges_lists_within_partition_only() {
        let mut parent = AttributeContext::new();
        parent.put_attribute_cascade("menu", list(&["pc"], false), true);
        parent.put_attribute("menu", list(&["pl"], false));

        let mut child = AttributeContext::new();
        child.put_attribute("menu", list(&["c"], true));
        child.inherit(&parent);

        assert_eq!(child.local_attribute("menu"), Some(&list(&["pl", "c"], true)));
        assert_eq!(child.cascaded_attribute("menu"), None);
    }

    #[test]
    fn test_inherit_cascaded_list_into_cascaded_binding() {
        let mut parent = AttributeContext::new();
        parent.put_attribute_cascade("menu", list(&["pc"], false), true);

        let mut child = AttributeContext::new();
        child.put_attribute_cascade("menu", list(&["c"], true), true);
        child.inherit(&parent);

        assert_eq!(child.cascaded_attribute("menu"), Some(&list(&["pc", "c"], true)));
        assert_eq!(child.local_attribute("menu"), None);
    }

    #[test]
    fn test_inherit_keeps_non_inheriting_lists() {
        let mut parent = AttributeContext::new();
        parent.put_attribute("menu", list(&["home"], false));

        let mut child = AttributeContext::new();
        child.put_attribute("menu", list(&["contact"], false));
        child.inherit(&parent);

        assert_eq!(child.local_attribute("menu"), Some(&list(&["contact"], false)));
    }

    #[test]
    fn test_inherit_from_foreign_source() {
        let source = FlatSource {
            roles: BTreeSet::new(),
            local: vec![("menu".into(), list(&["a"], false))],
            cascaded: vec![("header".into(), Attribute::string("h"))],
        };

        let mut child = AttributeContext::new();
        child.put_attribute("menu", list(&["b"], true));
        child.inherit(&source);

        assert_eq!(child.template(), Some("/flat.html"));
        assert_eq!(child.local_attribute("menu"), Some(&list(&["a", "b"], true)));
        assert_eq!(child.cascaded_attribute("header"), Some(&Attribute::string("h")));
    }

    fn string_map() -> impl Strategy<Value = HashMap<String, String>> {
        prop::collection::hash_map("[a-z]{1,4}", "[a-z]{0,6}", 0..8)
    }

    fn to_attributes(map: &HashMap<String, String>) -> AttributeMap {
        map.iter()
            .map(|(k, v)| (k.clone(), Attribute::string(v.clone())))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_copy_mutation_leaves_source(local in string_map(), cascaded in string_map()) {
            let mut original = AttributeContext::with_attributes(to_attributes(&local));
            for (name, value) in to_attributes(&cascaded) {
                original.put_attribute_cascade(name, value, true);
            }
            let snapshot = original.clone();

            let mut copy = AttributeContext::from_source(&original);
            copy.put_attribute("new", Attribute::string("n"));
            copy.add_all(to_attributes(&cascaded));
            copy.clear();

            prop_assert_eq!(original, snapshot);
        }

        #[test]
        fn prop_inherit_disjoint_is_union(child_map in string_map(), parent_map in string_map()) {
            let parent_map: HashMap<String, String> = parent_map
                .into_iter()
                .filter(|(k, _)| !child_map.contains_key(k))
                .collect();
            let parent = AttributeContext::with_attributes(to_attributes(&parent_map));
            let mut child = AttributeContext::with_attributes(to_attributes(&child_map));

            child.inherit(&parent);

            prop_assert_eq!(child.attribute_names().count(), child_map.len() + parent_map.len());
            for (name, value) in &child_map {
                prop_assert_eq!(child.attribute(name), Some(&Attribute::string(value.clone())));
            }
        }

        #[test]
        fn prop_list_merge_order(parent_items in prop::collection::vec("[a-z]{1,3}", 0..5),
                                 child_items in prop::collection::vec("[a-z]{1,3}", 0..5),
                                 inherit in any::<bool>()) {
            let to_list = |items: &[String], inherit: bool| {
                let items = items.iter().map(|s| Attribute::string(s.clone())).collect();
                let mut list = ListAttribute::new(items);
                list.set_inherit(inherit);
                Attribute::List(list)
            };
            let mut parent = AttributeContext::new();
            parent.put_attribute("menu", to_list(&parent_items, false));
            let mut child = AttributeContext::new();
            child.put_attribute("menu", to_list(&child_items, inherit));

            child.inherit(&parent);

            let expected = if inherit {
                let mut all = parent_items.clone();
                all.extend(child_items.iter().cloned());
                to_list(&all, true)
            } else {
                to_list(&child_items, false)
            };
            prop_assert_eq!(child.local_attribute("menu"), Some(&expected));
        }
    }
}
